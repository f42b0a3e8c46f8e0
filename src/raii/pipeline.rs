use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Pipeline.
pub struct Pipeline {
    pipeline: vk::Pipeline,
    bind_point: vk::PipelineBindPoint,
    render_device: Arc<RenderDevice>,
}

impl Pipeline {
    /// Create graphics pipelines, one per create info.
    ///
    /// The native call creates all of the pipelines in a single batch. If
    /// any of them fails, the ones which succeeded are destroyed before the
    /// error is returned, so the caller never sees a partial batch.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - Pipelines must be dropped before the render device.
    ///   - Pipelines must not be dropped while they are in use by the GPU.
    pub unsafe fn new_graphics_pipelines(
        render_device: Arc<RenderDevice>,
        create_infos: &[vk::GraphicsPipelineCreateInfo],
    ) -> Result<Vec<Self>, VulkanError> {
        let raw = render_device
            .device()
            .create_graphics_pipelines(
                vk::PipelineCache::null(),
                create_infos,
                None,
            )
            .map_err(|(partial, result)| {
                destroy_partial_batch(&render_device, partial);
                VulkanError::UnableToCreateGraphicsPipelines(result)
            })?;
        Ok(Self::wrap_batch(
            render_device,
            raw,
            vk::PipelineBindPoint::GRAPHICS,
        ))
    }

    /// Create a single graphics pipeline.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pipeline must be dropped before the render device.
    ///   - The pipeline must not be dropped while it is in use by the GPU.
    pub unsafe fn new_graphics_pipeline(
        render_device: Arc<RenderDevice>,
        create_info: vk::GraphicsPipelineCreateInfo,
    ) -> Result<Self, VulkanError> {
        let mut pipelines =
            Self::new_graphics_pipelines(render_device, &[create_info])?;
        Ok(pipelines.pop().unwrap())
    }

    /// Create compute pipelines, one per create info.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - Pipelines must be dropped before the render device.
    ///   - Pipelines must not be dropped while they are in use by the GPU.
    pub unsafe fn new_compute_pipelines(
        render_device: Arc<RenderDevice>,
        create_infos: &[vk::ComputePipelineCreateInfo],
    ) -> Result<Vec<Self>, VulkanError> {
        let raw = render_device
            .device()
            .create_compute_pipelines(
                vk::PipelineCache::null(),
                create_infos,
                None,
            )
            .map_err(|(partial, result)| {
                destroy_partial_batch(&render_device, partial);
                VulkanError::UnableToCreateComputePipelines(result)
            })?;
        Ok(Self::wrap_batch(
            render_device,
            raw,
            vk::PipelineBindPoint::COMPUTE,
        ))
    }

    /// Create a single compute pipeline.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pipeline must be dropped before the render device.
    ///   - The pipeline must not be dropped while it is in use by the GPU.
    pub unsafe fn new_compute_pipeline(
        render_device: Arc<RenderDevice>,
        create_info: vk::ComputePipelineCreateInfo,
    ) -> Result<Self, VulkanError> {
        let mut pipelines =
            Self::new_compute_pipelines(render_device, &[create_info])?;
        Ok(pipelines.pop().unwrap())
    }

    /// The bind point this pipeline was created for.
    pub fn bind_point(&self) -> vk::PipelineBindPoint {
        self.bind_point
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.pipeline,
            vk::ObjectType::PIPELINE,
            name,
        );
    }

    /// Get the raw Vulkan pipeline handle.
    pub fn raw(&self) -> vk::Pipeline {
        self.pipeline
    }

    fn wrap_batch(
        render_device: Arc<RenderDevice>,
        raw: Vec<vk::Pipeline>,
        bind_point: vk::PipelineBindPoint,
    ) -> Vec<Self> {
        raw.into_iter()
            .map(|pipeline| Self {
                pipeline,
                bind_point,
                render_device: render_device.clone(),
            })
            .collect()
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_pipeline(self.pipeline, None);
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("pipeline", &self.pipeline)
            .field("bind_point", &self.bind_point)
            .finish()
    }
}

/// Destroy whatever pipelines the driver managed to create before the batch
/// failed. The driver hands back a null handle for each failed slot.
fn destroy_partial_batch(
    render_device: &RenderDevice,
    partial: Vec<vk::Pipeline>,
) {
    for pipeline in partial {
        if pipeline != vk::Pipeline::null() {
            unsafe {
                render_device.device().destroy_pipeline(pipeline, None);
            }
        }
    }
}
