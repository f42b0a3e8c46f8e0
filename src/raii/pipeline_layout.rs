use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan PipelineLayout.
pub struct PipelineLayout {
    pipeline_layout: vk::PipelineLayout,
    render_device: Arc<RenderDevice>,
}

impl PipelineLayout {
    /// Create a new Vulkan pipeline layout.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pipeline layout must be dropped before the render device.
    ///   - The pipeline layout must not be dropped while pipelines created
    ///     from it are still in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::PipelineLayoutCreateInfo,
    ) -> Result<Self, VulkanError> {
        let pipeline_layout = render_device
            .device()
            .create_pipeline_layout(create_info, None)
            .map_err(VulkanError::UnableToCreatePipelineLayout)?;
        Ok(Self {
            pipeline_layout,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.pipeline_layout,
            vk::ObjectType::PIPELINE_LAYOUT,
            name,
        );
    }

    /// Get the raw Vulkan pipeline layout handle.
    pub fn raw(&self) -> vk::PipelineLayout {
        self.pipeline_layout
    }
}

impl Drop for PipelineLayout {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_pipeline_layout(self.pipeline_layout, None);
        }
    }
}

impl std::fmt::Debug for PipelineLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineLayout")
            .field("pipeline_layout", &self.pipeline_layout)
            .finish()
    }
}
