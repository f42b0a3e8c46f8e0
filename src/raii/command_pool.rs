use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan CommandPool.
pub struct CommandPool {
    command_pool: vk::CommandPool,
    render_device: Arc<RenderDevice>,
}

impl CommandPool {
    /// Create a new Vulkan command pool.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pool must be dropped before the render device.
    ///   - The pool must not be dropped while command buffers allocated from
    ///     it are still pending on the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::CommandPoolCreateInfo,
    ) -> Result<Self, VulkanError> {
        let command_pool = render_device
            .device()
            .create_command_pool(create_info, None)
            .map_err(VulkanError::UnableToCreateCommandPool)?;
        Ok(Self {
            command_pool,
            render_device,
        })
    }

    pub(super) fn render_device(&self) -> &Arc<RenderDevice> {
        &self.render_device
    }

    /// Reset every command buffer allocated from this pool.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - None of the pool's command buffers may be pending on the GPU.
    pub unsafe fn reset(&self) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .reset_command_pool(
                self.command_pool,
                vk::CommandPoolResetFlags::empty(),
            )
            .map_err(VulkanError::UnableToResetCommandPool)
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.command_pool,
            vk::ObjectType::COMMAND_POOL,
            name,
        );
    }

    /// Get the raw Vulkan command pool handle.
    pub fn raw(&self) -> vk::CommandPool {
        self.command_pool
    }
}

impl Drop for CommandPool {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_command_pool(self.command_pool, None);
        }
    }
}

impl std::fmt::Debug for CommandPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPool")
            .field("command_pool", &self.command_pool)
            .finish()
    }
}
