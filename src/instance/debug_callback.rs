use std::{ffi::CStr, os::raw::c_void};

use ash::{extensions::ext::DebugUtils, vk};

use crate::VulkanError;

/// Create the debug messenger which routes validation layer output into the
/// log crate.
pub(super) fn create_debug_logger(
    entry: &ash::Entry,
    instance: &ash::Instance,
) -> Result<(DebugUtils, vk::DebugUtilsMessengerEXT), VulkanError> {
    let debug = DebugUtils::new(entry, instance);
    let create_info = vk::DebugUtilsMessengerCreateInfoEXT {
        message_severity: vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
            | vk::DebugUtilsMessageSeverityFlagsEXT::INFO
            | vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE,
        message_type: vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        pfn_user_callback: Some(debug_callback),
        ..Default::default()
    };
    let debug_messenger = unsafe {
        debug
            .create_debug_utils_messenger(&create_info, None)
            .map_err(VulkanError::UnableToCreateDebugMessenger)?
    };
    Ok((debug, debug_messenger))
}

/// Route validation messages to the log crate at a level matching the
/// message's severity.
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _p_user_data: *mut c_void,
) -> vk::Bool32 {
    let message = CStr::from_ptr((*p_callback_data).p_message).to_string_lossy();

    if message_severity
        .contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR)
    {
        log::error!("Vulkan [{:?}]: {}", message_type, message);
    } else if message_severity
        .contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING)
    {
        log::warn!("Vulkan [{:?}]: {}", message_type, message);
    } else if message_severity
        .contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO)
    {
        log::info!("Vulkan [{:?}]: {}", message_type, message);
    } else {
        log::debug!("Vulkan [{:?}]: {}", message_type, message);
    }

    // never abort the triggering call
    vk::FALSE
}
