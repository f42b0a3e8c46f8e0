use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan ImageView.
pub struct ImageView {
    image_view: vk::ImageView,
    render_device: Arc<RenderDevice>,
}

impl ImageView {
    /// Create a new Vulkan image view.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The image view must be dropped before the render device.
    ///   - The image view must not be dropped while it is in use by the GPU.
    ///   - The underlying image must outlive the view.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::ImageViewCreateInfo,
    ) -> Result<Self, VulkanError> {
        let image_view = render_device
            .device()
            .create_image_view(create_info, None)
            .map_err(VulkanError::UnableToCreateImageView)?;
        Ok(Self {
            image_view,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.image_view,
            vk::ObjectType::IMAGE_VIEW,
            name,
        );
    }

    /// Get the raw Vulkan image view handle.
    pub fn raw(&self) -> vk::ImageView {
        self.image_view
    }
}

impl Drop for ImageView {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_image_view(self.image_view, None);
        }
    }
}

impl std::fmt::Debug for ImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageView")
            .field("image_view", &self.image_view)
            .finish()
    }
}
