use {
    crate::{raii::DeviceMemory, RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Buffer.
///
/// The buffer does not own any backing memory. Memory is allocated
/// separately as a [`DeviceMemory`] and attached with [`Buffer::bind_memory`].
pub struct Buffer {
    buffer: vk::Buffer,
    size_in_bytes: u64,
    render_device: Arc<RenderDevice>,
}

impl Buffer {
    /// Create a new Vulkan buffer.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The buffer must be dropped before the render device.
    ///   - The buffer must not be dropped while it is in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::BufferCreateInfo,
    ) -> Result<Self, VulkanError> {
        let buffer = render_device
            .device()
            .create_buffer(create_info, None)
            .map_err(VulkanError::UnableToCreateBuffer)?;
        Ok(Self {
            buffer,
            size_in_bytes: create_info.size,
            render_device,
        })
    }

    /// The buffer's size, as requested at creation time.
    pub fn size_in_bytes(&self) -> u64 {
        self.size_in_bytes
    }

    /// The memory requirements for backing this buffer.
    pub fn memory_requirements(&self) -> vk::MemoryRequirements {
        unsafe {
            self.render_device
                .device()
                .get_buffer_memory_requirements(self.buffer)
        }
    }

    /// Bind device memory to this buffer.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The memory must satisfy this buffer's memory requirements.
    ///   - The memory must outlive the buffer.
    ///   - A buffer can only be bound to memory once.
    pub unsafe fn bind_memory(
        &self,
        memory: &DeviceMemory,
        offset: u64,
    ) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .bind_buffer_memory(self.buffer, memory.raw(), offset)
            .map_err(VulkanError::UnableToBindBufferMemory)
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.buffer,
            vk::ObjectType::BUFFER,
            name,
        );
    }

    /// Get the raw Vulkan buffer handle.
    pub fn raw(&self) -> vk::Buffer {
        self.buffer
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_buffer(self.buffer, None);
        }
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("buffer", &self.buffer)
            .field("size_in_bytes", &self.size_in_bytes)
            .finish()
    }
}
