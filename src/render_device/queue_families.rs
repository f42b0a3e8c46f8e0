use ash::vk;

use super::{Queue, WindowSurface};
use crate::{Instance, VulkanError};

const SINGLE_QUEUE_PRIORITY: [f32; 1] = [1.0];

/// The indices for the queue families this crate requires: one family with
/// graphics+compute support and one which can present to the surface.
pub(super) struct QueueFamilies {
    graphics_family_index: u32,
    present_family_index: u32,
}

impl QueueFamilies {
    /// Find the queue family indexes for the queues this crate needs.
    pub fn find_for_physical_device(
        instance: &Instance,
        window_surface: &WindowSurface,
        physical_device: &vk::PhysicalDevice,
    ) -> Result<Self, VulkanError> {
        let queue_family_properties = instance
            .get_physical_device_queue_family_properties(physical_device);

        let mut graphics_family = None;
        let mut present_family = None;

        for (i, family) in queue_family_properties.iter().enumerate() {
            if graphics_family.is_none()
                && family.queue_flags.contains(
                    vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE,
                )
            {
                graphics_family = Some(i as u32);
            }

            let present_support = unsafe {
                window_surface.get_physical_device_surface_support(
                    physical_device,
                    i as u32,
                )
            };
            match present_support {
                Ok(true) => {
                    if present_family.is_none() {
                        present_family = Some(i as u32);
                    }
                }
                Err(ref error) => {
                    // Not necessarily a problem - there could be other queues
                    // to check - but it's good to know if it's happening.
                    log::warn!(
                        "Error while checking surface support for device: {:?}",
                        error
                    );
                }
                _ => {}
            }
        }

        let graphics_family_index =
            graphics_family.ok_or(VulkanError::UnableToFindGraphicsQueue)?;
        let present_family_index =
            present_family.ok_or(VulkanError::UnableToFindPresentQueue)?;

        Ok(Self {
            graphics_family_index,
            present_family_index,
        })
    }

    /// Create a vector of queue create infos. Automatically handles the
    /// situation where the graphics and present queue are the same family.
    pub fn as_queue_create_infos(&self) -> Vec<vk::DeviceQueueCreateInfo> {
        let mut create_infos = vec![vk::DeviceQueueCreateInfo {
            queue_family_index: self.graphics_family_index,
            p_queue_priorities: SINGLE_QUEUE_PRIORITY.as_ptr(),
            queue_count: 1,
            ..Default::default()
        }];

        if self.graphics_family_index != self.present_family_index {
            create_infos.push(vk::DeviceQueueCreateInfo {
                queue_family_index: self.present_family_index,
                p_queue_priorities: SINGLE_QUEUE_PRIORITY.as_ptr(),
                queue_count: 1,
                ..Default::default()
            });
        }

        create_infos
    }

    /// Get the graphics and present queues from the logical device.
    pub fn get_queues(&self, logical_device: &ash::Device) -> (Queue, Queue) {
        let graphics_queue =
            Queue::new(logical_device, self.graphics_family_index, 0);
        let present_queue =
            if self.graphics_family_index == self.present_family_index {
                graphics_queue
            } else {
                Queue::new(logical_device, self.present_family_index, 0)
            };
        (graphics_queue, present_queue)
    }
}
