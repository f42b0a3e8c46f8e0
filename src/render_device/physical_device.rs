use ash::vk;

use super::{queue_families::QueueFamilies, WindowSurface};
use crate::{ffi::string_from_i8_buffer, logging::PrettyList, Instance, VulkanError};

/// Get the set of required device extensions for this crate.
pub(super) fn required_device_extensions() -> Vec<String> {
    let swapchain = ash::extensions::khr::Swapchain::name()
        .to_owned()
        .into_string()
        .unwrap();
    vec![swapchain]
}

/// Pick a physical device which supports everything this crate needs,
/// preferring discrete GPUs when more than one device qualifies.
pub(super) fn find_optimal_physical_device(
    instance: &Instance,
    window_surface: &WindowSurface,
) -> Result<vk::PhysicalDevice, VulkanError> {
    let mut suitable_devices: Vec<vk::PhysicalDevice> = instance
        .enumerate_physical_devices()?
        .into_iter()
        .filter(|device| is_device_suitable(instance, window_surface, device))
        .collect();

    suitable_devices.sort_by_key(|device| {
        let properties = instance.get_physical_device_properties(device);
        match properties.device_type {
            vk::PhysicalDeviceType::DISCRETE_GPU => 0,
            vk::PhysicalDeviceType::INTEGRATED_GPU => 1,
            _ => 2,
        }
    });

    suitable_devices
        .into_iter()
        .next()
        .ok_or(VulkanError::NoSuitableDeviceFound)
}

fn is_device_suitable(
    instance: &Instance,
    window_surface: &WindowSurface,
    physical_device: &vk::PhysicalDevice,
) -> bool {
    if any_missing_extensions(instance, physical_device) {
        return false;
    }

    if QueueFamilies::find_for_physical_device(
        instance,
        window_surface,
        physical_device,
    )
    .is_err()
    {
        log::trace!(
            "Could not find suitable queue families for physical device {:?}",
            physical_device
        );
        return false;
    }

    unsafe {
        match window_surface.supported_formats(physical_device) {
            Ok(formats) if !formats.is_empty() => (),
            _ => {
                log::trace!(
                    "No supported format for physical device {:?}",
                    physical_device
                );
                return false;
            }
        }

        match window_surface.supported_presentation_modes(physical_device) {
            Ok(modes) if !modes.is_empty() => (),
            _ => {
                log::trace!(
                    "No presentation modes for physical device {:?}",
                    physical_device
                );
                return false;
            }
        }
    }

    true
}

/// Check that all required device extensions are available. Returns true if
/// any required device extension is missing.
fn any_missing_extensions(
    instance: &Instance,
    physical_device: &vk::PhysicalDevice,
) -> bool {
    let available_device_extensions: Vec<String> = instance
        .enumerate_device_extension_properties(physical_device)
        .iter()
        .map(|extension| string_from_i8_buffer(&extension.extension_name))
        .collect();

    log::trace!(
        "Available physical device extensions: {}",
        PrettyList(&available_device_extensions),
    );

    required_device_extensions().iter().any(|required_name| {
        let is_missing = !available_device_extensions
            .iter()
            .any(|name| name.contains(required_name));
        if is_missing {
            log::trace!("Device extension {} is not available", required_name);
        }
        is_missing
    })
}
