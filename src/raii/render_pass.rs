use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan RenderPass.
pub struct RenderPass {
    render_pass: vk::RenderPass,
    render_device: Arc<RenderDevice>,
}

impl RenderPass {
    /// Create a new Vulkan render pass.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The render pass must be dropped before the render device.
    ///   - The render pass must not be dropped while it is in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::RenderPassCreateInfo,
    ) -> Result<Self, VulkanError> {
        let render_pass = render_device
            .device()
            .create_render_pass(create_info, None)
            .map_err(VulkanError::UnableToCreateRenderPass)?;
        Ok(Self {
            render_pass,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.render_pass,
            vk::ObjectType::RENDER_PASS,
            name,
        );
    }

    /// Get the raw Vulkan render pass handle.
    pub fn raw(&self) -> vk::RenderPass {
        self.render_pass
    }
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_render_pass(self.render_pass, None);
        }
    }
}

impl std::fmt::Debug for RenderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPass")
            .field("render_pass", &self.render_pass)
            .finish()
    }
}
