use ash::vk;

use super::Instance;
use crate::{enumerate, VulkanError};

impl Instance {
    /// Get the set of all physical devices available to this instance.
    ///
    /// Driven through the instance's resolved function pointer table so the
    /// count/fill protocol (including the incomplete-retry case) is handled
    /// explicitly.
    pub fn enumerate_physical_devices(
        &self,
    ) -> Result<Vec<vk::PhysicalDevice>, VulkanError> {
        let raw_instance = self.ash.handle();
        let enumerate_fn = self.ash.fp_v1_0().enumerate_physical_devices;
        enumerate::read_batch("vkEnumeratePhysicalDevices", |count, data| {
            unsafe { enumerate_fn(raw_instance, count, data) }
        })
    }

    /// Get the properties of queues associated with the given physical device.
    pub fn get_physical_device_queue_family_properties(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        unsafe {
            self.ash
                .get_physical_device_queue_family_properties(*physical_device)
        }
    }

    /// Get all device extensions for the given physical device.
    pub fn enumerate_device_extension_properties(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> Vec<vk::ExtensionProperties> {
        unsafe {
            self.ash
                .enumerate_device_extension_properties(*physical_device)
                .unwrap_or_else(|_| vec![])
        }
    }

    /// Get the physical device's properties.
    pub fn get_physical_device_properties(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        unsafe { self.ash.get_physical_device_properties(*physical_device) }
    }

    /// Get the physical device's supported features.
    pub fn get_physical_device_features(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceFeatures {
        unsafe { self.ash.get_physical_device_features(*physical_device) }
    }

    /// Get the physical device's memory properties.
    pub fn get_physical_device_memory_properties(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceMemoryProperties {
        unsafe {
            self.ash
                .get_physical_device_memory_properties(*physical_device)
        }
    }
}
