use ash::{extensions::ext::DebugUtils, vk};

use crate::{ffi::to_os_ptrs, logging::PrettyList, VulkanError};

mod api;
mod debug_callback;
mod extensions;
mod layers;

/// The Vulkan library instance.
///
/// Owns the ash entry, the instance handle, and the debug messenger which
/// routes validation output into the `log` crate. Every other wrapper in
/// this crate is a descendant of an [Instance] and must be dropped before it.
pub struct Instance {
    debug_messenger: vk::DebugUtilsMessengerEXT,
    debug: DebugUtils,
    layers: Vec<String>,
    ash: ash::Instance,
    entry: ash::Entry,
}

impl Instance {
    /// Create a new Vulkan instance with the given extensions.
    ///
    /// Layer and extension availability is checked before the native create
    /// call, so missing requirements are reported by name rather than as a
    /// raw error code. The debug messenger is always created because the
    /// debug-utils extension also provides resource naming.
    pub fn new(required_extensions: &[String]) -> Result<Self, VulkanError> {
        let entry = unsafe {
            ash::Entry::load()
                .map_err(VulkanError::UnableToLoadVulkanLibrary)?
        };
        let layers = debug_layers();
        let ash = create_instance(&entry, required_extensions, &layers)?;
        let (debug, debug_messenger) =
            debug_callback::create_debug_logger(&entry, &ash)?;
        Ok(Self {
            debug_messenger,
            debug,
            layers,
            ash,
            entry,
        })
    }

    /// Get the raw ash instance for unwrapped native calls.
    ///
    /// Ownership is not transferred. The caller must not destroy the
    /// instance.
    pub fn ash(&self) -> &ash::Instance {
        &self.ash
    }

    /// The Ash Vulkan library entrypoint.
    pub fn entry(&self) -> &ash::Entry {
        &self.entry
    }

    /// Create the logical device used by a [crate::RenderDevice].
    ///
    /// # Safety
    ///
    /// The caller is responsible for destroying the device before this
    /// instance is dropped.
    pub(crate) unsafe fn create_logical_device(
        &self,
        physical_device: vk::PhysicalDevice,
        physical_device_features: vk::PhysicalDeviceFeatures,
        physical_device_extensions: &[String],
        queue_create_infos: &[vk::DeviceQueueCreateInfo],
    ) -> Result<ash::Device, VulkanError> {
        let (_c_layer_names, layer_name_ptrs) = to_os_ptrs(&self.layers);
        let (_c_ext_names, ext_name_ptrs) =
            to_os_ptrs(physical_device_extensions);

        let create_info = vk::DeviceCreateInfo {
            queue_create_info_count: queue_create_infos.len() as u32,
            p_queue_create_infos: queue_create_infos.as_ptr(),
            p_enabled_features: &physical_device_features,
            pp_enabled_layer_names: layer_name_ptrs.as_ptr(),
            enabled_layer_count: layer_name_ptrs.len() as u32,
            pp_enabled_extension_names: ext_name_ptrs.as_ptr(),
            enabled_extension_count: ext_name_ptrs.len() as u32,
            ..Default::default()
        };

        self.ash
            .create_device(physical_device, &create_info, None)
            .map_err(VulkanError::UnableToCreateLogicalDevice)
    }

    /// Give a debug name to a Vulkan object owned by the given device. The
    /// name shows up in validation layer logs.
    ///
    /// Naming failures are logged rather than returned - a missing debug
    /// name never aborts an operation.
    pub(crate) fn debug_utils_set_object_name(
        &self,
        logical_device: &ash::Device,
        name_info: &vk::DebugUtilsObjectNameInfoEXT,
    ) {
        let result = unsafe {
            self.debug
                .set_debug_utils_object_name(logical_device.handle(), name_info)
        };
        if let Err(error) = result {
            log::warn!("Unable to set a Vulkan debug name: {:?}", error);
        }
    }
}

impl Drop for Instance {
    /// The application must ensure that the Instance is only dropped after
    /// every resource which depends on it. There is no internal
    /// synchronization.
    fn drop(&mut self) {
        unsafe {
            self.debug
                .destroy_debug_utils_messenger(self.debug_messenger, None);
            self.ash.destroy_instance(None);
        }
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("layers", &self.layers)
            .finish()
    }
}

/// The layers applied to every instance created by this crate.
#[cfg(feature = "validation")]
fn debug_layers() -> Vec<String> {
    vec!["VK_LAYER_KHRONOS_validation".to_owned()]
}

#[cfg(not(feature = "validation"))]
fn debug_layers() -> Vec<String> {
    vec![]
}

/// Create a Vulkan instance with the required extensions plus debug utils.
fn create_instance(
    entry: &ash::Entry,
    required_extensions: &[String],
    layers: &[String],
) -> Result<ash::Instance, VulkanError> {
    use std::ffi::CString;

    let mut required_with_debug = Vec::new();
    required_with_debug.extend_from_slice(required_extensions);
    required_with_debug.push(
        DebugUtils::name()
            .to_str()
            .map_err(VulkanError::InvalidDebugLayerName)?
            .to_owned(),
    );

    extensions::check_extensions(entry, &required_with_debug)?;
    layers::check_layers(entry, layers)?;

    log::debug!("Required Extensions: {}", PrettyList(&required_with_debug));

    let app_name = CString::new("ash raii").unwrap();
    let engine_name = CString::new("no engine").unwrap();

    let app_info = vk::ApplicationInfo {
        p_engine_name: engine_name.as_ptr(),
        p_application_name: app_name.as_ptr(),
        application_version: vk::make_api_version(0, 1, 0, 0),
        engine_version: vk::make_api_version(0, 1, 0, 0),
        api_version: vk::make_api_version(0, 1, 3, 0),
        ..Default::default()
    };

    let (_layer_names, layer_ptrs) = unsafe { to_os_ptrs(layers) };
    let (_ext_names, ext_ptrs) = unsafe { to_os_ptrs(&required_with_debug) };

    let create_info = vk::InstanceCreateInfo {
        p_application_info: &app_info,
        pp_enabled_layer_names: layer_ptrs.as_ptr(),
        enabled_layer_count: layer_ptrs.len() as u32,
        pp_enabled_extension_names: ext_ptrs.as_ptr(),
        enabled_extension_count: ext_ptrs.len() as u32,
        ..Default::default()
    };

    unsafe {
        entry
            .create_instance(&create_info, None)
            .map_err(VulkanError::UnableToCreateInstance)
    }
}
