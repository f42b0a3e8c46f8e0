use ash::vk;

use super::RenderDevice;
use crate::VulkanError;

impl RenderDevice {
    /// Stall the thread until the GPU is done with all operations.
    pub fn wait_idle(&self) -> Result<(), VulkanError> {
        unsafe {
            self.logical_device
                .device_wait_idle()
                .map_err(VulkanError::UnableToWaitForDeviceToIdle)
        }
    }

    /// Stall the thread until the graphics queue has drained.
    pub fn wait_for_graphics_queue_idle(&self) -> Result<(), VulkanError> {
        unsafe {
            self.logical_device
                .queue_wait_idle(self.graphics_queue.raw())
                .map_err(VulkanError::UnableToWaitForQueueToIdle)
        }
    }

    /// Submit command buffers to the graphics queue.
    ///
    /// `signal_fence` may be null; when it is not, it is signaled once all
    /// submitted command buffers have finished executing.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the submitted command buffers and every
    /// resource they reference live until the commands finish executing.
    pub unsafe fn submit_graphics_commands(
        &self,
        submit_infos: &[vk::SubmitInfo],
        signal_fence: vk::Fence,
    ) -> Result<(), VulkanError> {
        self.logical_device
            .queue_submit(self.graphics_queue.raw(), submit_infos, signal_fence)
            .map_err(VulkanError::UnableToSubmitCommands)
    }

    /// Write and copy descriptor set bindings.
    ///
    /// # Safety
    ///
    /// The caller must ensure that none of the referenced descriptor sets is
    /// in use by the GPU.
    pub unsafe fn update_descriptor_sets(
        &self,
        writes: &[vk::WriteDescriptorSet],
        copies: &[vk::CopyDescriptorSet],
    ) {
        self.logical_device.update_descriptor_sets(writes, copies)
    }

    /// Find a memory type which satisfies the given requirements and
    /// property flags. Returns None when no memory type qualifies.
    pub fn memory_type_index(
        &self,
        requirements: &vk::MemoryRequirements,
        property_flags: vk::MemoryPropertyFlags,
    ) -> Option<u32> {
        let memory_properties = self
            .instance
            .get_physical_device_memory_properties(&self.physical_device);
        find_memory_type_index(
            &memory_properties,
            requirements.memory_type_bits,
            property_flags,
        )
    }

    /// Get the raw surface handle.
    ///
    /// # Safety
    ///
    /// The handle is owned by this device and must not be destroyed by the
    /// caller. It is safe to reference from any object which keeps this
    /// device alive.
    pub unsafe fn surface_khr(&self) -> vk::SurfaceKHR {
        self.window_surface.raw()
    }

    /// Get the surface's current capabilities.
    pub fn surface_capabilities(
        &self,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError> {
        unsafe {
            self.window_surface
                .surface_capabilities(&self.physical_device)
        }
    }

    /// Get the surface formats this device can present.
    pub fn surface_formats(
        &self,
    ) -> Result<Vec<vk::SurfaceFormatKHR>, VulkanError> {
        unsafe { self.window_surface.supported_formats(&self.physical_device) }
    }

    /// Get the presentation modes this device supports for the surface.
    pub fn surface_present_modes(
        &self,
    ) -> Result<Vec<vk::PresentModeKHR>, VulkanError> {
        unsafe {
            self.window_surface
                .supported_presentation_modes(&self.physical_device)
        }
    }

    /// The distinct queue family indices a swapchain must support.
    pub fn swapchain_queue_family_indices(&self) -> Vec<u32> {
        let mut indices = vec![self.graphics_queue.family_index()];
        if self.present_queue.family_index()
            != self.graphics_queue.family_index()
        {
            indices.push(self.present_queue.family_index());
        }
        indices
    }

    /// Build an ash extension loader for the swapchain functions.
    pub(crate) fn create_swapchain_loader(
        &self,
    ) -> ash::extensions::khr::Swapchain {
        ash::extensions::khr::Swapchain::new(
            self.instance.ash(),
            &self.logical_device,
        )
    }
}

/// Pick the index of the first memory type which is allowed by the type bits
/// and supports all of the requested property flags.
fn find_memory_type_index(
    memory_properties: &vk::PhysicalDeviceMemoryProperties,
    type_bits: u32,
    property_flags: vk::MemoryPropertyFlags,
) -> Option<u32> {
    (0..memory_properties.memory_type_count).find(|&index| {
        let type_is_allowed = (type_bits & (1 << index)) != 0;
        let properties =
            memory_properties.memory_types[index as usize].property_flags;
        type_is_allowed && properties.contains(property_flags)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn memory_properties_with(
        types: &[vk::MemoryPropertyFlags],
    ) -> vk::PhysicalDeviceMemoryProperties {
        let mut properties = vk::PhysicalDeviceMemoryProperties {
            memory_type_count: types.len() as u32,
            ..Default::default()
        };
        for (index, &flags) in types.iter().enumerate() {
            properties.memory_types[index].property_flags = flags;
        }
        properties
    }

    #[test]
    fn the_first_matching_type_wins() {
        let properties = memory_properties_with(&[
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
            vk::MemoryPropertyFlags::HOST_VISIBLE
                | vk::MemoryPropertyFlags::HOST_COHERENT,
            vk::MemoryPropertyFlags::HOST_VISIBLE
                | vk::MemoryPropertyFlags::HOST_COHERENT,
        ]);
        let index = find_memory_type_index(
            &properties,
            0b111,
            vk::MemoryPropertyFlags::HOST_VISIBLE,
        );
        assert_eq!(index, Some(1));
    }

    #[test]
    fn type_bits_exclude_otherwise_valid_types() {
        let properties = memory_properties_with(&[
            vk::MemoryPropertyFlags::HOST_VISIBLE,
            vk::MemoryPropertyFlags::HOST_VISIBLE,
        ]);
        let index = find_memory_type_index(
            &properties,
            0b10,
            vk::MemoryPropertyFlags::HOST_VISIBLE,
        );
        assert_eq!(index, Some(1));
    }

    #[test]
    fn no_matching_type_yields_none() {
        let properties =
            memory_properties_with(&[vk::MemoryPropertyFlags::DEVICE_LOCAL]);
        let index = find_memory_type_index(
            &properties,
            0b1,
            vk::MemoryPropertyFlags::HOST_VISIBLE,
        );
        assert_eq!(index, None);
    }
}
