use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::{ffi::c_void, sync::Arc},
};

/// RAII Vulkan DeviceMemory.
pub struct DeviceMemory {
    memory: vk::DeviceMemory,
    size_in_bytes: u64,
    render_device: Arc<RenderDevice>,
}

impl DeviceMemory {
    /// Allocate a block of device memory.
    ///
    /// Use [`RenderDevice::memory_type_index`] to pick the
    /// `memory_type_index` for the allocate info based on a resource's
    /// memory requirements.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The memory must be dropped before the render device.
    ///   - The memory must not be dropped while any resource bound to it is
    ///     still in use by the GPU.
    pub unsafe fn allocate(
        render_device: Arc<RenderDevice>,
        allocate_info: &vk::MemoryAllocateInfo,
    ) -> Result<Self, VulkanError> {
        let memory = render_device
            .device()
            .allocate_memory(allocate_info, None)
            .map_err(VulkanError::UnableToAllocateDeviceMemory)?;
        Ok(Self {
            memory,
            size_in_bytes: allocate_info.allocation_size,
            render_device,
        })
    }

    /// The allocation's size, as requested at allocation time.
    pub fn size_in_bytes(&self) -> u64 {
        self.size_in_bytes
    }

    /// Map a region of the allocation into host address space.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The memory must have been allocated from a HOST_VISIBLE memory
    ///     type.
    ///   - The returned pointer is invalidated by [`Self::unmap`] and by
    ///     dropping the allocation.
    ///   - The memory must not already be mapped.
    pub unsafe fn map(
        &self,
        offset: u64,
        size: u64,
    ) -> Result<*mut c_void, VulkanError> {
        self.render_device
            .device()
            .map_memory(self.memory, offset, size, vk::MemoryMapFlags::empty())
            .map_err(VulkanError::UnableToMapDeviceMemory)
    }

    /// Unmap a previously-mapped allocation.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The memory must currently be mapped.
    ///   - Any pointers returned by [`Self::map`] are invalidated.
    pub unsafe fn unmap(&self) {
        self.render_device.device().unmap_memory(self.memory);
    }

    /// Flush host writes to the given mapped ranges so the device can see
    /// them. Not needed for HOST_COHERENT memory types.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The ranges must refer to currently-mapped memory.
    pub unsafe fn flush_mapped_ranges(
        &self,
        ranges: &[vk::MappedMemoryRange],
    ) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .flush_mapped_memory_ranges(ranges)
            .map_err(VulkanError::UnableToFlushMappedMemoryRanges)
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.memory,
            vk::ObjectType::DEVICE_MEMORY,
            name,
        );
    }

    /// Get the raw Vulkan device memory handle.
    pub fn raw(&self) -> vk::DeviceMemory {
        self.memory
    }
}

impl Drop for DeviceMemory {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().free_memory(self.memory, None);
        }
    }
}

impl std::fmt::Debug for DeviceMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceMemory")
            .field("memory", &self.memory)
            .field("size_in_bytes", &self.size_in_bytes)
            .finish()
    }
}
