use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Framebuffer.
pub struct Framebuffer {
    framebuffer: vk::Framebuffer,
    extent: vk::Extent2D,
    render_device: Arc<RenderDevice>,
}

impl Framebuffer {
    /// Create a new Vulkan framebuffer.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The framebuffer must be dropped before the render device.
    ///   - The framebuffer must not be dropped while it is in use by the GPU.
    ///   - The image views named by the create info must outlive the
    ///     framebuffer.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::FramebufferCreateInfo,
    ) -> Result<Self, VulkanError> {
        let framebuffer = render_device
            .device()
            .create_framebuffer(create_info, None)
            .map_err(VulkanError::UnableToCreateFramebuffer)?;
        Ok(Self {
            framebuffer,
            extent: vk::Extent2D {
                width: create_info.width,
                height: create_info.height,
            },
            render_device,
        })
    }

    /// The width and height the framebuffer was created with.
    pub fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.framebuffer,
            vk::ObjectType::FRAMEBUFFER,
            name,
        );
    }

    /// Get the raw Vulkan framebuffer handle.
    pub fn raw(&self) -> vk::Framebuffer {
        self.framebuffer
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_framebuffer(self.framebuffer, None);
        }
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("framebuffer", &self.framebuffer)
            .field("extent", &self.extent)
            .finish()
    }
}
