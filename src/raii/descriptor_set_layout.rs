use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan DescriptorSetLayout.
pub struct DescriptorSetLayout {
    descriptor_set_layout: vk::DescriptorSetLayout,
    render_device: Arc<RenderDevice>,
}

impl DescriptorSetLayout {
    /// Create a new Vulkan descriptor set layout.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The layout must be dropped before the render device.
    ///   - The layout must not be dropped while descriptor sets allocated
    ///     with it are still in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::DescriptorSetLayoutCreateInfo,
    ) -> Result<Self, VulkanError> {
        let descriptor_set_layout = render_device
            .device()
            .create_descriptor_set_layout(create_info, None)
            .map_err(VulkanError::UnableToCreateDescriptorSetLayout)?;
        Ok(Self {
            descriptor_set_layout,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.descriptor_set_layout,
            vk::ObjectType::DESCRIPTOR_SET_LAYOUT,
            name,
        );
    }

    /// Get the raw Vulkan descriptor set layout handle.
    pub fn raw(&self) -> vk::DescriptorSetLayout {
        self.descriptor_set_layout
    }
}

impl Drop for DescriptorSetLayout {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_descriptor_set_layout(self.descriptor_set_layout, None);
        }
    }
}

impl std::fmt::Debug for DescriptorSetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorSetLayout")
            .field("descriptor_set_layout", &self.descriptor_set_layout)
            .finish()
    }
}
