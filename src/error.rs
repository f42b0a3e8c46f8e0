use ash::vk;
use thiserror::Error;

/// Errors reported by the wrappers in this crate.
///
/// Each fallible native call gets its own variant so the failing entry point
/// is always identifiable from the error alone, with the raw [vk::Result]
/// attached as the source.
#[derive(Debug, Error)]
pub enum VulkanError {
    #[error("Unable to load the Vulkan library")]
    UnableToLoadVulkanLibrary(#[source] ash::LoadingError),

    #[error(transparent)]
    InvalidDebugLayerName(#[from] std::str::Utf8Error),

    #[error("The following extensions are required but unavailable {:?}", .0)]
    RequiredExtensionsNotFound(Vec<String>),

    #[error("Unable to get the available Vulkan extensions {:?}", .0)]
    UnableToListAvailableExtensions(#[source] vk::Result),

    #[error("The following layers are required but unavailable {:?}", .0)]
    RequiredLayersNotFound(Vec<String>),

    #[error("Unable to get the available Vulkan layers {:?}", .0)]
    UnableToListAvailableLayers(#[source] vk::Result),

    #[error("Unable to create a Vulkan instance {:?}", .0)]
    UnableToCreateInstance(#[source] vk::Result),

    #[error("Unable to create the Vulkan debug messenger {:?}", .0)]
    UnableToCreateDebugMessenger(#[source] vk::Result),

    #[error("The call to {} failed while enumerating results {:?}", .0, .1)]
    EnumerationFailed(&'static str, #[source] vk::Result),

    #[error("No physical device supports everything this crate requires")]
    NoSuitableDeviceFound,

    #[error("No queue family on the device supports graphics operations")]
    UnableToFindGraphicsQueue,

    #[error("No queue family on the device can present to the surface")]
    UnableToFindPresentQueue,

    #[error("Unable to check for physical device surface support {:?}", .0)]
    UnableToCheckSurfaceSupport(#[source] vk::Result),

    #[error("Unable to get the surface capabilities {:?}", .0)]
    UnableToGetSurfaceCapabilities(#[source] vk::Result),

    #[error("Unable to create the Vulkan logical device {:?}", .0)]
    UnableToCreateLogicalDevice(#[source] vk::Result),

    #[error("Unable to wait for the device to idle {:?}", .0)]
    UnableToWaitForDeviceToIdle(#[source] vk::Result),

    #[error("Unable to wait for a queue to idle {:?}", .0)]
    UnableToWaitForQueueToIdle(#[source] vk::Result),

    #[error("Unable to submit command buffers to a queue {:?}", .0)]
    UnableToSubmitCommands(#[source] vk::Result),

    #[error("Unable to create a buffer {:?}", .0)]
    UnableToCreateBuffer(#[source] vk::Result),

    #[error("Unable to allocate device memory {:?}", .0)]
    UnableToAllocateDeviceMemory(#[source] vk::Result),

    #[error("Unable to bind device memory to a buffer {:?}", .0)]
    UnableToBindBufferMemory(#[source] vk::Result),

    #[error("Unable to bind device memory to an image {:?}", .0)]
    UnableToBindImageMemory(#[source] vk::Result),

    #[error("Unable to map device memory {:?}", .0)]
    UnableToMapDeviceMemory(#[source] vk::Result),

    #[error("Unable to flush mapped memory ranges {:?}", .0)]
    UnableToFlushMappedMemoryRanges(#[source] vk::Result),

    #[error("Unable to create an image {:?}", .0)]
    UnableToCreateImage(#[source] vk::Result),

    #[error("Unable to create an image view {:?}", .0)]
    UnableToCreateImageView(#[source] vk::Result),

    #[error("Unable to create a sampler {:?}", .0)]
    UnableToCreateSampler(#[source] vk::Result),

    #[error("Unable to create a shader module {:?}", .0)]
    UnableToCreateShaderModule(#[source] vk::Result),

    #[error("Unable to create a pipeline layout {:?}", .0)]
    UnableToCreatePipelineLayout(#[source] vk::Result),

    #[error("Unable to create a descriptor set layout {:?}", .0)]
    UnableToCreateDescriptorSetLayout(#[source] vk::Result),

    #[error("Unable to create graphics pipelines {:?}", .0)]
    UnableToCreateGraphicsPipelines(#[source] vk::Result),

    #[error("Unable to create compute pipelines {:?}", .0)]
    UnableToCreateComputePipelines(#[source] vk::Result),

    #[error("Unable to create a render pass {:?}", .0)]
    UnableToCreateRenderPass(#[source] vk::Result),

    #[error("Unable to create a framebuffer {:?}", .0)]
    UnableToCreateFramebuffer(#[source] vk::Result),

    #[error("Unable to create a command pool {:?}", .0)]
    UnableToCreateCommandPool(#[source] vk::Result),

    #[error("Unable to reset a command pool {:?}", .0)]
    UnableToResetCommandPool(#[source] vk::Result),

    #[error("Unable to allocate command buffers {:?}", .0)]
    UnableToAllocateCommandBuffers(#[source] vk::Result),

    #[error("Unable to begin a command buffer {:?}", .0)]
    UnableToBeginCommandBuffer(#[source] vk::Result),

    #[error("Unable to end a command buffer {:?}", .0)]
    UnableToEndCommandBuffer(#[source] vk::Result),

    #[error("Unable to reset a command buffer {:?}", .0)]
    UnableToResetCommandBuffer(#[source] vk::Result),

    #[error("Unable to create a descriptor pool {:?}", .0)]
    UnableToCreateDescriptorPool(#[source] vk::Result),

    #[error("Unable to allocate descriptor sets from the pool {:?}", .0)]
    UnableToAllocateDescriptorSets(#[source] vk::Result),

    #[error("Unable to free descriptor sets back to the pool {:?}", .0)]
    UnableToFreeDescriptorSets(#[source] vk::Result),

    #[error("Unable to create a fence {:?}", .0)]
    UnableToCreateFence(#[source] vk::Result),

    #[error("Error while waiting for a fence {:?}", .0)]
    UnexpectedFenceWaitError(#[source] vk::Result),

    #[error("Error while resetting a fence {:?}", .0)]
    UnexpectedFenceResetError(#[source] vk::Result),

    #[error("Error while checking a fence's status {:?}", .0)]
    UnexpectedFenceStatusError(#[source] vk::Result),

    #[error("Unable to create a semaphore {:?}", .0)]
    UnableToCreateSemaphore(#[source] vk::Result),

    #[error("Unable to create the swapchain {:?}", .0)]
    UnableToCreateSwapchain(#[source] vk::Result),

    #[error("The surface does not report any usable formats")]
    NoSuitableSurfaceFormat,

    #[error("Invalid arguments for {}: {}", .operation, .reason)]
    InvalidArguments {
        operation: &'static str,
        reason: String,
    },

    #[error(transparent)]
    RuntimeError(#[from] anyhow::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn creation_errors_keep_the_native_result_as_source() {
        use std::error::Error;

        let error = VulkanError::UnableToCreateFence(
            vk::Result::ERROR_OUT_OF_DEVICE_MEMORY,
        );
        let source = error.source().expect("source must be set");
        // vk::Result renders its variant name through Debug; Display is the
        // prose description.
        assert!(
            format!("{:?}", source).contains("ERROR_OUT_OF_DEVICE_MEMORY")
        );
    }

    #[test]
    fn invalid_arguments_name_the_operation() {
        let error = VulkanError::InvalidArguments {
            operation: "bind_vertex_buffers",
            reason: "buffers and offsets must have the same length".to_owned(),
        };
        let message = error.to_string();
        assert!(message.contains("bind_vertex_buffers"));
        assert!(message.contains("same length"));
    }
}
