use crate::{ffi::string_from_i8_buffer, logging::PrettyList, VulkanError};

/// Check that each of the required layers is available on the current
/// platform.
pub fn check_layers(
    entry: &ash::Entry,
    required_layers: &[String],
) -> Result<(), VulkanError> {
    let missing = missing_layers(entry, required_layers)?;
    if !missing.is_empty() {
        Err(VulkanError::RequiredLayersNotFound(missing))
    } else {
        Ok(())
    }
}

/// Get a list of all layers which are required but not available for this
/// vulkan instance.
fn missing_layers(
    entry: &ash::Entry,
    required_layers: &[String],
) -> Result<Vec<String>, VulkanError> {
    let available_layer_properties = entry
        .enumerate_instance_layer_properties()
        .map_err(VulkanError::UnableToListAvailableLayers)?;

    let available_names: Vec<String> = available_layer_properties
        .iter()
        .map(|layer| string_from_i8_buffer(&layer.layer_name))
        .collect();

    log::debug!("Available layers: {}", PrettyList(&available_names));

    Ok(required_layers
        .iter()
        .cloned()
        .filter(|name| !available_names.iter().any(|item| item.contains(name)))
        .collect())
}
