use {
    crate::{
        raii::{
            Buffer, CommandPool, DescriptorSet, Framebuffer, Pipeline,
            PipelineLayout, RenderPass,
        },
        RenderDevice, VulkanError,
    },
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan CommandBuffer.
///
/// Command buffers are allocated in batches by
/// [`CommandPool::allocate_command_buffers`], but each wrapper frees itself
/// back to its pool individually when dropped. The wrapper keeps its pool
/// alive, so the pool is never destroyed while buffers remain.
pub struct CommandBuffer {
    command_buffer: vk::CommandBuffer,
    command_pool: Arc<CommandPool>,
    render_device: Arc<RenderDevice>,
}

impl CommandBuffer {
    /// Allocate command buffers from the given pool.
    ///
    /// The native call allocates the whole batch at once; each returned
    /// wrapper frees itself back to the pool individually when dropped.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The command buffers must be dropped before the render device.
    ///   - A command buffer must not be dropped while it is pending on the
    ///     GPU.
    pub unsafe fn allocate(
        command_pool: &Arc<CommandPool>,
        level: vk::CommandBufferLevel,
        count: u32,
    ) -> Result<Vec<Self>, VulkanError> {
        let render_device = command_pool.render_device();
        let allocate_info = vk::CommandBufferAllocateInfo {
            command_pool: command_pool.raw(),
            level,
            command_buffer_count: count,
            ..Default::default()
        };
        let raw = render_device
            .device()
            .allocate_command_buffers(&allocate_info)
            .map_err(VulkanError::UnableToAllocateCommandBuffers)?;
        Ok(raw
            .into_iter()
            .map(|command_buffer| Self {
                command_buffer,
                command_pool: command_pool.clone(),
                render_device: render_device.clone(),
            })
            .collect())
    }

    /// Allocate a single primary command buffer from the given pool.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The command buffer must be dropped before the render device.
    ///   - The command buffer must not be dropped while it is pending on the
    ///     GPU.
    pub unsafe fn allocate_primary(
        command_pool: &Arc<CommandPool>,
    ) -> Result<Self, VulkanError> {
        let mut buffers = Self::allocate(
            command_pool,
            vk::CommandBufferLevel::PRIMARY,
            1,
        )?;
        Ok(buffers.pop().unwrap())
    }

    /// Begin recording commands.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The command buffer must not be pending on the GPU.
    pub unsafe fn begin(
        &self,
        begin_info: &vk::CommandBufferBeginInfo,
    ) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .begin_command_buffer(self.command_buffer, begin_info)
            .map_err(VulkanError::UnableToBeginCommandBuffer)
    }

    /// Begin recording commands for a buffer which will be submitted once
    /// and re-recorded.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The command buffer must not be pending on the GPU.
    pub unsafe fn begin_one_time_submit(&self) -> Result<(), VulkanError> {
        let begin_info = vk::CommandBufferBeginInfo {
            flags: vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT,
            ..Default::default()
        };
        self.begin(&begin_info)
    }

    /// Finish recording commands.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The command buffer must be in the recording state.
    pub unsafe fn end(&self) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .end_command_buffer(self.command_buffer)
            .map_err(VulkanError::UnableToEndCommandBuffer)
    }

    /// Reset the command buffer so it can be re-recorded. The pool must have
    /// been created with RESET_COMMAND_BUFFER.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The command buffer must not be pending on the GPU.
    pub unsafe fn reset(&self) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .reset_command_buffer(
                self.command_buffer,
                vk::CommandBufferResetFlags::empty(),
            )
            .map_err(VulkanError::UnableToResetCommandBuffer)
    }

    // ------------------------------------------------------------------- //
    // Recorded commands. Each of these forwards to the corresponding      //
    // vkCmd* call; none of them can fail at the API level, so none return //
    // a Result unless this wrapper adds a check of its own.               //
    // ------------------------------------------------------------------- //

    /// # Safety
    ///
    /// Unsafe because:
    ///   - The render pass and framebuffer must outlive the recorded
    ///     commands.
    pub unsafe fn begin_render_pass_inline(
        &self,
        render_pass: &RenderPass,
        framebuffer: &Framebuffer,
        clear_values: &[vk::ClearValue],
    ) {
        let begin_info = vk::RenderPassBeginInfo {
            render_pass: render_pass.raw(),
            framebuffer: framebuffer.raw(),
            render_area: vk::Rect2D {
                offset: vk::Offset2D { x: 0, y: 0 },
                extent: framebuffer.extent(),
            },
            clear_value_count: clear_values.len() as u32,
            p_clear_values: clear_values.as_ptr(),
            ..Default::default()
        };
        self.render_device.device().cmd_begin_render_pass(
            self.command_buffer,
            &begin_info,
            vk::SubpassContents::INLINE,
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - A render pass must currently be active in this command buffer.
    pub unsafe fn end_render_pass(&self) {
        self.render_device
            .device()
            .cmd_end_render_pass(self.command_buffer);
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pipeline must outlive the recorded commands.
    pub unsafe fn bind_pipeline(&self, pipeline: &Pipeline) {
        self.render_device.device().cmd_bind_pipeline(
            self.command_buffer,
            pipeline.bind_point(),
            pipeline.raw(),
        );
    }

    /// Bind vertex buffers starting at the given binding index.
    ///
    /// Every buffer needs a matching offset; mismatched slice lengths are
    /// rejected before anything is recorded.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The buffers must outlive the recorded commands.
    pub unsafe fn bind_vertex_buffers(
        &self,
        first_binding: u32,
        buffers: &[&Buffer],
        offsets: &[u64],
    ) -> Result<(), VulkanError> {
        check_binding_counts(buffers.len(), offsets.len())?;
        let raw_buffers: Vec<vk::Buffer> =
            buffers.iter().map(|buffer| buffer.raw()).collect();
        self.render_device.device().cmd_bind_vertex_buffers(
            self.command_buffer,
            first_binding,
            &raw_buffers,
            offsets,
        );
        Ok(())
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - The buffer must outlive the recorded commands.
    pub unsafe fn bind_index_buffer(
        &self,
        buffer: &Buffer,
        offset: u64,
        index_type: vk::IndexType,
    ) {
        self.render_device.device().cmd_bind_index_buffer(
            self.command_buffer,
            buffer.raw(),
            offset,
            index_type,
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - The layout and descriptor sets must outlive the recorded
    ///     commands.
    pub unsafe fn bind_descriptor_sets(
        &self,
        bind_point: vk::PipelineBindPoint,
        layout: &PipelineLayout,
        first_set: u32,
        descriptor_sets: &[&DescriptorSet],
    ) {
        let raw_sets: Vec<vk::DescriptorSet> =
            descriptor_sets.iter().map(|set| set.raw()).collect();
        self.render_device.device().cmd_bind_descriptor_sets(
            self.command_buffer,
            bind_point,
            layout.raw(),
            first_set,
            &raw_sets,
            &[],
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pipeline layout must outlive the recorded commands.
    ///   - The constants must match the layout's push constant ranges.
    pub unsafe fn push_constants(
        &self,
        layout: &PipelineLayout,
        stages: vk::ShaderStageFlags,
        offset: u32,
        constants: &[u8],
    ) {
        self.render_device.device().cmd_push_constants(
            self.command_buffer,
            layout.raw(),
            stages,
            offset,
            constants,
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - A pipeline with a dynamic viewport must be bound when the
    ///     recorded commands execute.
    pub unsafe fn set_viewport(&self, viewport: vk::Viewport) {
        self.render_device.device().cmd_set_viewport(
            self.command_buffer,
            0,
            &[viewport],
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - A pipeline with a dynamic scissor must be bound when the recorded
    ///     commands execute.
    pub unsafe fn set_scissor(&self, scissor: vk::Rect2D) {
        self.render_device.device().cmd_set_scissor(
            self.command_buffer,
            0,
            &[scissor],
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - All bound resources must be valid when the recorded commands
    ///     execute.
    pub unsafe fn draw(
        &self,
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    ) {
        self.render_device.device().cmd_draw(
            self.command_buffer,
            vertex_count,
            instance_count,
            first_vertex,
            first_instance,
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - All bound resources must be valid when the recorded commands
    ///     execute.
    pub unsafe fn draw_indexed(
        &self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    ) {
        self.render_device.device().cmd_draw_indexed(
            self.command_buffer,
            index_count,
            instance_count,
            first_index,
            vertex_offset,
            first_instance,
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - A compute pipeline must be bound when the recorded commands
    ///     execute.
    pub unsafe fn dispatch(&self, x: u32, y: u32, z: u32) {
        self.render_device
            .device()
            .cmd_dispatch(self.command_buffer, x, y, z);
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - The regions must lie inside both buffers.
    ///   - The buffers must outlive the recorded commands.
    pub unsafe fn copy_buffer(
        &self,
        src: &Buffer,
        dst: &Buffer,
        regions: &[vk::BufferCopy],
    ) {
        self.render_device.device().cmd_copy_buffer(
            self.command_buffer,
            src.raw(),
            dst.raw(),
            regions,
        );
    }

    /// # Safety
    ///
    /// Unsafe because:
    ///   - The barriers must describe valid transitions for the resources
    ///     they name.
    pub unsafe fn pipeline_barrier(
        &self,
        src_stage: vk::PipelineStageFlags,
        dst_stage: vk::PipelineStageFlags,
        memory_barriers: &[vk::MemoryBarrier],
        buffer_barriers: &[vk::BufferMemoryBarrier],
        image_barriers: &[vk::ImageMemoryBarrier],
    ) {
        self.render_device.device().cmd_pipeline_barrier(
            self.command_buffer,
            src_stage,
            dst_stage,
            vk::DependencyFlags::empty(),
            memory_barriers,
            buffer_barriers,
            image_barriers,
        );
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.command_buffer,
            vk::ObjectType::COMMAND_BUFFER,
            name,
        );
    }

    /// Get the raw Vulkan command buffer handle.
    pub fn raw(&self) -> vk::CommandBuffer {
        self.command_buffer
    }
}

impl Drop for CommandBuffer {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().free_command_buffers(
                self.command_pool.raw(),
                &[self.command_buffer],
            );
        }
    }
}

impl std::fmt::Debug for CommandBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBuffer")
            .field("command_buffer", &self.command_buffer)
            .finish()
    }
}

fn check_binding_counts(
    buffers: usize,
    offsets: usize,
) -> Result<(), VulkanError> {
    if buffers != offsets {
        return Err(VulkanError::InvalidArguments {
            operation: "bind_vertex_buffers",
            reason: format!(
                "got {} buffers but {} offsets, counts must match",
                buffers, offsets
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matched_buffer_and_offset_counts_are_accepted() {
        assert!(check_binding_counts(3, 3).is_ok());
        assert!(check_binding_counts(0, 0).is_ok());
    }

    #[test]
    fn mismatched_buffer_and_offset_counts_are_rejected() {
        let error = check_binding_counts(2, 1).unwrap_err();
        assert!(matches!(
            error,
            VulkanError::InvalidArguments {
                operation: "bind_vertex_buffers",
                ..
            }
        ));
    }
}
