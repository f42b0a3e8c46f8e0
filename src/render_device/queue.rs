use ash::vk;

/// A Vulkan device queue.
///
/// Queues are owned by the logical device, so this type has no destructor:
/// the handle simply becomes invalid when the device is destroyed.
#[derive(Debug, Copy, Clone)]
pub struct Queue {
    queue: vk::Queue,
    family_index: u32,
    index: u32,
}

impl Queue {
    /// The queue family index for this queue.
    pub fn family_index(&self) -> u32 {
        self.family_index
    }

    /// Get the raw queue handle for unwrapped native calls.
    ///
    /// Ownership is not transferred.
    pub fn raw(&self) -> vk::Queue {
        self.queue
    }

    pub(crate) fn new(
        logical_device: &ash::Device,
        family_index: u32,
        index: u32,
    ) -> Self {
        let queue =
            unsafe { logical_device.get_device_queue(family_index, index) };
        Self {
            queue,
            family_index,
            index,
        }
    }
}

impl std::fmt::Display for Queue {
    fn fmt(&self, format: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format.write_fmt(format_args!(
            "Queue {}:{}",
            self.family_index, self.index
        ))
    }
}
