//! Owning wrappers for device-scoped Vulkan handles.
//!
//! Each type in this module owns exactly one raw handle. The handle is
//! created by the type's constructor and destroyed exactly once by its
//! destructor, using the `Arc<RenderDevice>` stored alongside it. None of
//! these types implement Clone: a live handle always has exactly one owner,
//! and moving the wrapper moves the ownership.
//!
//! Pool-allocated handles (command buffers, descriptor sets) are the one
//! wrinkle: they are produced in batches by a single native call, and each
//! wrapper frees itself back to its pool individually.

mod buffer;
mod command_buffer;
mod command_pool;
mod descriptor_pool;
mod descriptor_set;
mod descriptor_set_layout;
mod device_memory;
mod fence;
mod framebuffer;
mod image;
mod image_view;
mod pipeline;
mod pipeline_layout;
mod render_pass;
mod sampler;
mod semaphore;
mod shader_module;

pub use self::{
    buffer::Buffer,
    command_buffer::CommandBuffer,
    command_pool::CommandPool,
    descriptor_pool::DescriptorPool,
    descriptor_set::DescriptorSet,
    descriptor_set_layout::DescriptorSetLayout,
    device_memory::DeviceMemory,
    fence::{Fence, FenceStatus, WaitResult},
    framebuffer::Framebuffer,
    image::Image,
    image_view::ImageView,
    pipeline::Pipeline,
    pipeline_layout::PipelineLayout,
    render_pass::RenderPass,
    sampler::Sampler,
    semaphore::Semaphore,
    shader_module::ShaderModule,
};
