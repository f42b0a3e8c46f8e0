use {
    crate::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan ShaderModule.
pub struct ShaderModule {
    shader_module: vk::ShaderModule,
    render_device: Arc<RenderDevice>,
}

impl ShaderModule {
    /// Create a new Vulkan shader module.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The shader module must be dropped before the render device.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::ShaderModuleCreateInfo,
    ) -> Result<Self, VulkanError> {
        let shader_module = render_device
            .device()
            .create_shader_module(create_info, None)
            .map_err(VulkanError::UnableToCreateShaderModule)?;
        Ok(Self {
            shader_module,
            render_device,
        })
    }

    /// Create a shader module from raw SPIR-V bytes, e.g. the output of
    /// `include_bytes!`.
    ///
    /// The bytes are copied into a properly-aligned u32 buffer before the
    /// native call; a byte count which is not a multiple of four is rejected
    /// before any native call is made.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The shader module must be dropped before the render device.
    pub unsafe fn from_spirv_bytes(
        render_device: Arc<RenderDevice>,
        bytes: &[u8],
    ) -> Result<Self, VulkanError> {
        let words = copy_to_spirv_words(bytes)?;
        let create_info = vk::ShaderModuleCreateInfo {
            p_code: words.as_ptr(),
            code_size: words.len() * std::mem::size_of::<u32>(),
            ..Default::default()
        };
        Self::new(render_device, &create_info)
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.shader_module,
            vk::ObjectType::SHADER_MODULE,
            name,
        );
    }

    /// Get the raw Vulkan shader module handle.
    pub fn raw(&self) -> vk::ShaderModule {
        self.shader_module
    }
}

impl Drop for ShaderModule {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_shader_module(self.shader_module, None);
        }
    }
}

impl std::fmt::Debug for ShaderModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderModule")
            .field("shader_module", &self.shader_module)
            .finish()
    }
}

/// Copy a byte slice into a properly-aligned u32 array.
///
/// A full copy is leveraged to handle endianness and alignment: `include_bytes!`
/// yields u8 bytes while Vulkan expects SPIR-V as u32 words. Assumes the data
/// is little endian.
fn copy_to_spirv_words(bytes: &[u8]) -> Result<Vec<u32>, VulkanError> {
    use std::convert::TryInto;

    const U32_SIZE: usize = std::mem::size_of::<u32>();
    if bytes.is_empty() || bytes.len() % U32_SIZE != 0 {
        return Err(VulkanError::InvalidArguments {
            operation: "from_spirv_bytes",
            reason: format!(
                "SPIR-V sources must be a non-zero multiple of {} bytes, got {}",
                U32_SIZE,
                bytes.len()
            ),
        });
    }

    let mut buffer: Vec<u32> = Vec::with_capacity(bytes.len() / U32_SIZE);
    let mut input: &[u8] = bytes;
    while !input.is_empty() {
        let (word_bytes, rest) = input.split_at(U32_SIZE);
        input = rest;
        buffer.push(u32::from_le_bytes(word_bytes.try_into().unwrap()));
    }

    Ok(buffer)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn aligned_bytes_become_little_endian_words() {
        let bytes = [0x03, 0x02, 0x23, 0x07, 0x00, 0x00, 0x01, 0x00];
        let words = copy_to_spirv_words(&bytes).unwrap();
        assert_eq!(words, vec![0x0723_0203, 0x0001_0000]);
    }

    #[test]
    fn unaligned_byte_counts_are_rejected_before_any_native_call() {
        let error = copy_to_spirv_words(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            error,
            VulkanError::InvalidArguments {
                operation: "from_spirv_bytes",
                ..
            }
        ));
    }

    #[test]
    fn empty_sources_are_rejected() {
        assert!(copy_to_spirv_words(&[]).is_err());
    }
}
