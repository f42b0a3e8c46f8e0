use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// The outcome of waiting on a fence with a timeout.
///
/// A timeout is an expected outcome of the native call, not a failure, so it
/// is reported as a value rather than an error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WaitResult {
    /// The fence was signaled before the timeout expired.
    Complete,

    /// The timeout expired before the fence was signaled.
    TimedOut,
}

/// A fence's current state as reported by vkGetFenceStatus.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FenceStatus {
    Signaled,
    Unsignaled,
}

/// RAII Vulkan Fence.
pub struct Fence {
    fence: vk::Fence,
    render_device: Arc<RenderDevice>,
}

impl Fence {
    /// Create a new Vulkan fence.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The fence must be dropped before the render device.
    ///   - The fence must not be dropped while the GPU could still signal it.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::FenceCreateInfo,
    ) -> Result<Self, VulkanError> {
        let fence = render_device
            .device()
            .create_fence(create_info, None)
            .map_err(VulkanError::UnableToCreateFence)?;
        Ok(Self {
            fence,
            render_device,
        })
    }

    /// Block until the fence is signaled or the timeout expires. The timeout
    /// is forwarded to the native call unchanged, in nanoseconds.
    pub fn wait(&self, timeout_ns: u64) -> Result<WaitResult, VulkanError> {
        let result = unsafe {
            self.render_device.device().wait_for_fences(
                &[self.fence],
                true,
                timeout_ns,
            )
        };
        interpret_wait(result)
    }

    /// Block until the fence is signaled.
    pub fn wait_forever(&self) -> Result<(), VulkanError> {
        self.wait(u64::MAX).map(|_| ())
    }

    /// Block until the fence is signaled, then reset it.
    pub fn wait_and_reset(&self) -> Result<(), VulkanError> {
        self.wait_forever()?;
        self.reset()
    }

    /// Reset the fence for future signalling. No-op if the fence is already
    /// unsignaled.
    pub fn reset(&self) -> Result<(), VulkanError> {
        unsafe {
            self.render_device
                .device()
                .reset_fences(&[self.fence])
                .map_err(VulkanError::UnexpectedFenceResetError)
        }
    }

    /// Query the fence's status without blocking.
    pub fn status(&self) -> Result<FenceStatus, VulkanError> {
        let result =
            unsafe { self.render_device.device().get_fence_status(self.fence) };
        interpret_status(result)
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.fence,
            vk::ObjectType::FENCE,
            name,
        );
    }

    /// Get the raw Vulkan fence handle.
    pub fn raw(&self) -> vk::Fence {
        self.fence
    }
}

impl Drop for Fence {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().destroy_fence(self.fence, None);
        }
    }
}

impl std::fmt::Debug for Fence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fence").field("fence", &self.fence).finish()
    }
}

/// Translate the result of a fence wait. TIMEOUT is an expected outcome, not
/// a failure.
fn interpret_wait(
    result: Result<(), vk::Result>,
) -> Result<WaitResult, VulkanError> {
    match result {
        Ok(()) => Ok(WaitResult::Complete),
        Err(vk::Result::TIMEOUT) => Ok(WaitResult::TimedOut),
        Err(error) => Err(VulkanError::UnexpectedFenceWaitError(error)),
    }
}

/// Translate the result of a fence status query. Ash reports NOT_READY as
/// Ok(false).
fn interpret_status(
    result: Result<bool, vk::Result>,
) -> Result<FenceStatus, VulkanError> {
    match result {
        Ok(true) => Ok(FenceStatus::Signaled),
        Ok(false) => Ok(FenceStatus::Unsignaled),
        Err(error) => Err(VulkanError::UnexpectedFenceStatusError(error)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a_timeout_is_a_value_not_an_error() {
        let result = interpret_wait(Err(vk::Result::TIMEOUT)).unwrap();
        assert_eq!(result, WaitResult::TimedOut);
    }

    #[test]
    fn a_successful_wait_is_complete() {
        let result = interpret_wait(Ok(())).unwrap();
        assert_eq!(result, WaitResult::Complete);
    }

    #[test]
    fn device_loss_during_a_wait_is_an_error() {
        let error =
            interpret_wait(Err(vk::Result::ERROR_DEVICE_LOST)).unwrap_err();
        assert!(matches!(
            error,
            VulkanError::UnexpectedFenceWaitError(vk::Result::ERROR_DEVICE_LOST)
        ));
    }

    #[test]
    fn not_ready_means_unsignaled() {
        assert_eq!(interpret_status(Ok(false)).unwrap(), FenceStatus::Unsignaled);
        assert_eq!(interpret_status(Ok(true)).unwrap(), FenceStatus::Signaled);
    }
}
