use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Sampler.
pub struct Sampler {
    sampler: vk::Sampler,
    render_device: Arc<RenderDevice>,
}

impl Sampler {
    /// Create a new Vulkan sampler.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The sampler must be dropped before the render device.
    ///   - The sampler must not be dropped while it is in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::SamplerCreateInfo,
    ) -> Result<Self, VulkanError> {
        let sampler = render_device
            .device()
            .create_sampler(create_info, None)
            .map_err(VulkanError::UnableToCreateSampler)?;
        Ok(Self {
            sampler,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.sampler,
            vk::ObjectType::SAMPLER,
            name,
        );
    }

    /// Get the raw Vulkan sampler handle.
    pub fn raw(&self) -> vk::Sampler {
        self.sampler
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_sampler(self.sampler, None);
        }
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("sampler", &self.sampler)
            .finish()
    }
}
