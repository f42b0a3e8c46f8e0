use crate::{ffi::string_from_i8_buffer, logging::PrettyList, VulkanError};

/// Check that each of the provided extensions is available on the current
/// platform.
pub fn check_extensions(
    entry: &ash::Entry,
    required_extensions: &[String],
) -> Result<(), VulkanError> {
    let missing = missing_extensions(entry, required_extensions)?;
    if !missing.is_empty() {
        Err(VulkanError::RequiredExtensionsNotFound(missing))
    } else {
        Ok(())
    }
}

/// Get a list of all extensions which are required but not available for this
/// vulkan instance.
fn missing_extensions(
    entry: &ash::Entry,
    required_extensions: &[String],
) -> Result<Vec<String>, VulkanError> {
    let available_extensions = entry
        .enumerate_instance_extension_properties(None)
        .map_err(VulkanError::UnableToListAvailableExtensions)?;

    let available_names: Vec<String> = available_extensions
        .iter()
        .map(|ext| string_from_i8_buffer(&ext.extension_name))
        .collect();

    log::debug!("Available extensions: {}", PrettyList(&available_names));

    Ok(required_extensions
        .iter()
        .cloned()
        .filter(|name| !available_names.iter().any(|item| item.contains(name)))
        .collect())
}
