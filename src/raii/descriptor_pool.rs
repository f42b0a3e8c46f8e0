use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan DescriptorPool.
pub struct DescriptorPool {
    descriptor_pool: vk::DescriptorPool,
    can_free_sets: bool,
    render_device: Arc<RenderDevice>,
}

impl DescriptorPool {
    /// Create a new Vulkan descriptor pool.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pool must be dropped before the render device.
    ///   - The pool must not be dropped while descriptor sets allocated from
    ///     it are still in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::DescriptorPoolCreateInfo,
    ) -> Result<Self, VulkanError> {
        let descriptor_pool = render_device
            .device()
            .create_descriptor_pool(create_info, None)
            .map_err(VulkanError::UnableToCreateDescriptorPool)?;
        Ok(Self {
            descriptor_pool,
            can_free_sets: create_info
                .flags
                .contains(vk::DescriptorPoolCreateFlags::FREE_DESCRIPTOR_SET),
            render_device,
        })
    }

    pub(super) fn render_device(&self) -> &Arc<RenderDevice> {
        &self.render_device
    }

    pub(super) fn can_free_sets(&self) -> bool {
        self.can_free_sets
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.descriptor_pool,
            vk::ObjectType::DESCRIPTOR_POOL,
            name,
        );
    }

    /// Get the raw Vulkan descriptor pool handle.
    pub fn raw(&self) -> vk::DescriptorPool {
        self.descriptor_pool
    }
}

impl Drop for DescriptorPool {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_descriptor_pool(self.descriptor_pool, None);
        }
    }
}

impl std::fmt::Debug for DescriptorPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorPool")
            .field("descriptor_pool", &self.descriptor_pool)
            .field("can_free_sets", &self.can_free_sets)
            .finish()
    }
}
