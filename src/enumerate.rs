//! The two-call batch protocol shared by Vulkan's enumeration entry points.
//!
//! Calls like vkEnumeratePhysicalDevices fill a caller-provided buffer: the
//! first call passes a null pointer to learn the count, the second call fills
//! the buffer. If more items appear between the two calls the fill reports
//! VK_INCOMPLETE and the whole sequence must be retried.

use ash::vk;

use crate::VulkanError;

/// Read a batch of values from a native two-call enumeration entry point.
///
/// `fill` is invoked exactly the way the native call expects: first with a
/// null data pointer to query the count, then with a buffer of that size.
/// The loop retries on [vk::Result::INCOMPLETE] and returns any other
/// non-success code as an [VulkanError::EnumerationFailed] naming
/// `function`.
///
/// On success the returned vector's length always equals the count reported
/// by the final native call.
pub(crate) fn read_batch<T: Default + Clone>(
    function: &'static str,
    mut fill: impl FnMut(&mut u32, *mut T) -> vk::Result,
) -> Result<Vec<T>, VulkanError> {
    loop {
        let mut count: u32 = 0;
        match fill(&mut count, std::ptr::null_mut()) {
            vk::Result::SUCCESS => (),
            error => return Err(VulkanError::EnumerationFailed(function, error)),
        }

        let mut data = vec![T::default(); count as usize];
        match fill(&mut count, data.as_mut_ptr()) {
            vk::Result::SUCCESS => {
                // the count can shrink between the two calls
                data.truncate(count as usize);
                return Ok(data);
            }
            vk::Result::INCOMPLETE => {
                // the count grew between the two calls, start over
                continue;
            }
            error => return Err(VulkanError::EnumerationFailed(function, error)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// A fake native entry point backed by a slice of values.
    fn native_call<'items>(
        items: &'items [u32],
    ) -> impl FnMut(&mut u32, *mut u32) -> vk::Result + 'items {
        move |count, data| {
            if data.is_null() {
                *count = items.len() as u32;
                return vk::Result::SUCCESS;
            }
            if (*count as usize) < items.len() {
                return vk::Result::INCOMPLETE;
            }
            *count = items.len() as u32;
            for (index, item) in items.iter().enumerate() {
                unsafe { *data.add(index) = *item };
            }
            vk::Result::SUCCESS
        }
    }

    #[test]
    fn batch_length_matches_the_reported_count() {
        let items = [10, 20, 30];
        let batch = read_batch("vkFake", native_call(&items)).unwrap();
        assert_eq!(batch, items);
    }

    #[test]
    fn empty_batches_are_not_an_error() {
        let batch = read_batch("vkFake", native_call(&[])).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn incomplete_results_retry_until_the_count_settles() {
        // the count grows by one on every query until the third attempt
        let mut queries = 0;
        let items = [1, 2, 3, 4, 5];
        let batch = read_batch::<u32>("vkFake", |count, data| {
            if data.is_null() {
                queries += 1;
                *count = queries.min(items.len() as u32);
                return vk::Result::SUCCESS;
            }
            let visible = queries.min(items.len() as u32) as usize;
            if (*count as usize) < items.len() && visible < items.len() {
                return vk::Result::INCOMPLETE;
            }
            *count = items.len() as u32;
            for (index, item) in items.iter().enumerate() {
                unsafe { *data.add(index) = *item };
            }
            vk::Result::SUCCESS
        })
        .unwrap();
        assert_eq!(batch, items);
        assert!(queries >= 2, "the count query must have been retried");
    }

    #[test]
    fn shrinking_counts_truncate_the_batch() {
        let batch = read_batch::<u32>("vkFake", |count, data| {
            if data.is_null() {
                *count = 4;
                return vk::Result::SUCCESS;
            }
            *count = 2;
            unsafe {
                *data = 7;
                *data.add(1) = 8;
            }
            vk::Result::SUCCESS
        })
        .unwrap();
        assert_eq!(batch, vec![7, 8]);
    }

    extern "system" fn fake_entry_point(
        count: *mut u32,
        data: *mut u32,
    ) -> vk::Result {
        unsafe {
            if data.is_null() {
                *count = 2;
                return vk::Result::SUCCESS;
            }
            *data = 11;
            *data.add(1) = 22;
        }
        vk::Result::SUCCESS
    }

    #[test]
    fn a_bare_function_pointer_can_drive_the_batch() {
        // resolved Vulkan entry points are plain function pointer values, so
        // the fill closure must be able to forward to one held in a local
        let fp: extern "system" fn(*mut u32, *mut u32) -> vk::Result =
            fake_entry_point;
        let batch =
            read_batch::<u32>("vkFake", |count, data| fp(count, data))
                .unwrap();
        assert_eq!(batch, vec![11, 22]);
    }

    #[test]
    fn failures_name_the_native_function() {
        let error = read_batch::<u32>("vkFake", |_, _| {
            vk::Result::ERROR_OUT_OF_HOST_MEMORY
        })
        .unwrap_err();
        match error {
            VulkanError::EnumerationFailed(function, result) => {
                assert_eq!(function, "vkFake");
                assert_eq!(result, vk::Result::ERROR_OUT_OF_HOST_MEMORY);
            }
            unexpected => panic!("unexpected error {:?}", unexpected),
        }
    }
}
