use {
    crate::{raii::DeviceMemory, RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Image.
///
/// Images come in two flavors: those created by this wrapper, which are
/// destroyed when the wrapper is dropped, and those adopted from an external
/// owner such as a swapchain, which are not. Swapchain images are destroyed
/// by the swapchain itself when it is destroyed.
pub struct Image {
    image: vk::Image,
    owns_image: bool,
    render_device: Arc<RenderDevice>,
}

impl Image {
    /// Create a new Vulkan image.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The image must be dropped before the render device.
    ///   - The image must not be dropped while it is in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::ImageCreateInfo,
    ) -> Result<Self, VulkanError> {
        let image = render_device
            .device()
            .create_image(create_info, None)
            .map_err(VulkanError::UnableToCreateImage)?;
        Ok(Self {
            image,
            owns_image: true,
            render_device,
        })
    }

    /// Wrap a raw image handle which is owned by something else, typically a
    /// swapchain. The wrapper will not destroy the handle when dropped.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The caller must ensure the image outlives this wrapper and every
    ///     view created from it.
    pub unsafe fn adopt(
        render_device: Arc<RenderDevice>,
        image: vk::Image,
    ) -> Self {
        Self {
            image,
            owns_image: false,
            render_device,
        }
    }

    /// The memory requirements for backing this image.
    pub fn memory_requirements(&self) -> vk::MemoryRequirements {
        unsafe {
            self.render_device
                .device()
                .get_image_memory_requirements(self.image)
        }
    }

    /// Bind device memory to this image.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The memory must satisfy this image's memory requirements.
    ///   - The memory must outlive the image.
    ///   - An image can only be bound to memory once.
    pub unsafe fn bind_memory(
        &self,
        memory: &DeviceMemory,
        offset: u64,
    ) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .bind_image_memory(self.image, memory.raw(), offset)
            .map_err(VulkanError::UnableToBindImageMemory)
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.image,
            vk::ObjectType::IMAGE,
            name,
        );
    }

    /// Get the raw Vulkan image handle.
    pub fn raw(&self) -> vk::Image {
        self.image
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        if !self.owns_image {
            return;
        }
        unsafe {
            self.render_device.device().destroy_image(self.image, None);
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("image", &self.image)
            .field("owns_image", &self.owns_image)
            .finish()
    }
}
