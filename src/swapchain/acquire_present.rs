//! Just the logic for acquiring and presenting swapchain images.
//!
//! Suboptimal and out-of-date results are routine during window resizes, so
//! both calls report them as a status value rather than an error.

use {super::Swapchain, crate::VulkanError, ash::vk};

/// Indicates that the swapchain needs a rebuild, or that the image was
/// acquired successfully.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum SwapchainStatus {
    /// Completed the operation with the given swapchain index.
    Index(usize),

    /// Indicates that the swapchain needs to be rebuilt.
    NeedsRebuild,
}

impl Swapchain {
    /// Acquire the next swapchain image.
    ///
    /// # Params
    ///
    /// * `semaphore` - a semaphore to signal when the swapchain image is
    ///   available.
    /// * `fence` - a fence to signal when the swapchain image is available,
    ///   may be null.
    ///
    /// # Safety
    ///
    /// The application must correctly handle a swapchain acquisition failure
    /// and rebuild the swapchain on demand.
    pub unsafe fn acquire_swapchain_image(
        &self,
        semaphore: vk::Semaphore,
        fence: vk::Fence,
    ) -> Result<SwapchainStatus, VulkanError> {
        let result = self.loader.acquire_next_image(
            self.swapchain_khr,
            u64::MAX,
            semaphore,
            fence,
        );
        interpret_acquire_result(result)
    }

    /// Present a swapchain image to the screen.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the application must correctly handle a swapchain presentation
    ///     failure and rebuild the swapchain on demand
    ///   - the application must transition the swapchain image to the
    ///     correct image layout. Typically this is done with a Render Pass.
    pub unsafe fn present_swapchain_image(
        &self,
        index: usize,
        wait_semaphores: &[vk::Semaphore],
    ) -> Result<SwapchainStatus, VulkanError> {
        let index_u32 = index as u32;
        let present_info = vk::PresentInfoKHR {
            p_wait_semaphores: wait_semaphores.as_ptr(),
            wait_semaphore_count: wait_semaphores.len() as u32,
            p_swapchains: &self.swapchain_khr,
            swapchain_count: 1,
            p_image_indices: &index_u32,
            ..Default::default()
        };
        let result = self.loader.queue_present(
            self.render_device.presentation_queue().raw(),
            &present_info,
        );
        interpret_present_result(index, result)
    }
}

/// Translate the result of vkAcquireNextImageKHR.
fn interpret_acquire_result(
    result: Result<(u32, bool), vk::Result>,
) -> Result<SwapchainStatus, VulkanError> {
    match result {
        // index acquired and the swapchain is optimal
        Ok((index, false)) => Ok(SwapchainStatus::Index(index as usize)),

        // index acquired but the swapchain is suboptimal for the surface
        Ok((_, true)) => {
            log::debug!("Acquire Image: Swapchain suboptimal, needs rebuild.");
            Ok(SwapchainStatus::NeedsRebuild)
        }

        // the swapchain is lost and needs to be rebuilt
        Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
            log::debug!("Acquire Image: Swapchain lost, needs rebuild.");
            Ok(SwapchainStatus::NeedsRebuild)
        }

        Err(error) => Err(VulkanError::RuntimeError(
            anyhow::Error::new(error)
                .context("Unexpected error while acquiring swapchain image!"),
        )),
    }
}

/// Translate the result of vkQueuePresentKHR.
fn interpret_present_result(
    index: usize,
    result: Result<bool, vk::Result>,
) -> Result<SwapchainStatus, VulkanError> {
    match result {
        // presentation succeeded and the swapchain is still optimal
        Ok(false) => Ok(SwapchainStatus::Index(index)),

        // presentation succeeded but the swapchain is suboptimal
        Ok(true) => {
            log::debug!("Present Image: Swapchain suboptimal, needs rebuild.");
            Ok(SwapchainStatus::NeedsRebuild)
        }

        // the swapchain is lost and needs to be rebuilt
        Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
            log::debug!("Present Image: Swapchain lost, needs rebuild.");
            Ok(SwapchainStatus::NeedsRebuild)
        }

        Err(error) => Err(VulkanError::RuntimeError(
            anyhow::Error::new(error)
                .context("Unexpected error while presenting swapchain image!"),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a_clean_acquire_yields_the_index() {
        let status = interpret_acquire_result(Ok((2, false))).unwrap();
        assert_eq!(status, SwapchainStatus::Index(2));
    }

    #[test]
    fn a_suboptimal_acquire_requests_a_rebuild() {
        let status = interpret_acquire_result(Ok((2, true))).unwrap();
        assert_eq!(status, SwapchainStatus::NeedsRebuild);
    }

    #[test]
    fn an_out_of_date_acquire_requests_a_rebuild() {
        let status =
            interpret_acquire_result(Err(vk::Result::ERROR_OUT_OF_DATE_KHR))
                .unwrap();
        assert_eq!(status, SwapchainStatus::NeedsRebuild);
    }

    #[test]
    fn device_loss_during_acquire_is_an_error() {
        let error =
            interpret_acquire_result(Err(vk::Result::ERROR_DEVICE_LOST))
                .unwrap_err();
        assert!(matches!(error, VulkanError::RuntimeError(_)));
    }

    #[test]
    fn a_clean_present_echoes_the_index() {
        let status = interpret_present_result(1, Ok(false)).unwrap();
        assert_eq!(status, SwapchainStatus::Index(1));
    }

    #[test]
    fn a_suboptimal_present_requests_a_rebuild() {
        let status = interpret_present_result(1, Ok(true)).unwrap();
        assert_eq!(status, SwapchainStatus::NeedsRebuild);
    }

    #[test]
    fn an_out_of_date_present_requests_a_rebuild() {
        let status =
            interpret_present_result(0, Err(vk::Result::ERROR_OUT_OF_DATE_KHR))
                .unwrap();
        assert_eq!(status, SwapchainStatus::NeedsRebuild);
    }
}
