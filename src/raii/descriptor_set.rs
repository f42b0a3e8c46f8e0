use {
    crate::{
        raii::{DescriptorPool, DescriptorSetLayout},
        RenderDevice, VulkanError,
    },
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan DescriptorSet.
///
/// A descriptor set frees itself back to its pool when dropped, but only if
/// the pool was created with FREE_DESCRIPTOR_SET. Otherwise the underlying
/// handle is reclaimed when the pool itself is destroyed, and dropping the
/// wrapper is a no-op.
pub struct DescriptorSet {
    descriptor_set: vk::DescriptorSet,
    descriptor_pool: Arc<DescriptorPool>,
    render_device: Arc<RenderDevice>,
}

impl DescriptorSet {
    /// Allocate descriptor sets from the given pool, one per layout.
    ///
    /// The native call allocates the whole batch at once. If the pool was
    /// created with FREE_DESCRIPTOR_SET then each returned wrapper frees
    /// itself back to the pool individually when dropped; otherwise the sets
    /// are reclaimed only when the pool itself is destroyed.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The descriptor sets must be dropped before the render device.
    ///   - A descriptor set must not be dropped while it is in use by the
    ///     GPU.
    pub unsafe fn allocate(
        descriptor_pool: &Arc<DescriptorPool>,
        layouts: &[&DescriptorSetLayout],
    ) -> Result<Vec<Self>, VulkanError> {
        let render_device = descriptor_pool.render_device();
        let raw_layouts: Vec<vk::DescriptorSetLayout> =
            layouts.iter().map(|layout| layout.raw()).collect();
        let allocate_info = vk::DescriptorSetAllocateInfo {
            descriptor_pool: descriptor_pool.raw(),
            descriptor_set_count: raw_layouts.len() as u32,
            p_set_layouts: raw_layouts.as_ptr(),
            ..Default::default()
        };
        let raw = render_device
            .device()
            .allocate_descriptor_sets(&allocate_info)
            .map_err(VulkanError::UnableToAllocateDescriptorSets)?;
        Ok(raw
            .into_iter()
            .map(|descriptor_set| Self {
                descriptor_set,
                descriptor_pool: descriptor_pool.clone(),
                render_device: render_device.clone(),
            })
            .collect())
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.descriptor_set,
            vk::ObjectType::DESCRIPTOR_SET,
            name,
        );
    }

    /// Get the raw Vulkan descriptor set handle.
    pub fn raw(&self) -> vk::DescriptorSet {
        self.descriptor_set
    }
}

impl Drop for DescriptorSet {
    fn drop(&mut self) {
        if !self.descriptor_pool.can_free_sets() {
            return;
        }
        unsafe {
            // The only failure modes for freeing a set are invalid handles,
            // which ownership already rules out.
            let result = self.render_device.device().free_descriptor_sets(
                self.descriptor_pool.raw(),
                &[self.descriptor_set],
            );
            if let Err(error) = result {
                log::warn!(
                    "unable to free descriptor set {:?}: {}",
                    self.descriptor_set,
                    VulkanError::UnableToFreeDescriptorSets(error)
                );
            }
        }
    }
}

impl std::fmt::Debug for DescriptorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorSet")
            .field("descriptor_set", &self.descriptor_set)
            .finish()
    }
}
