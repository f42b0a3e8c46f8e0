//! Owning RAII wrappers for Vulkan handles, built on [ash].
//!
//! Every wrapper in this crate owns exactly one Vulkan handle: it creates the
//! handle in its constructor, destroys it exactly once when dropped, and
//! forwards operations on the handle to the matching native entry point.
//! Wrappers are move-only - there is never more than one owner for a live
//! handle - and they hold their ancestors (the [RenderDevice], which holds
//! the [Instance]) by `Arc` so the device's dispatch tables always outlive
//! the resources created from them.
//!
//! Constructors are `unsafe` because Vulkan itself imposes obligations the
//! type system cannot see: resources must not be dropped while the GPU is
//! still using them. Each constructor documents the specific obligation.

mod enumerate;
mod error;
mod instance;
mod render_device;
mod swapchain;

pub mod ffi;
pub mod logging;
pub mod raii;

pub use self::{
    error::VulkanError,
    instance::Instance,
    render_device::{Queue, RenderDevice},
    swapchain::{Swapchain, SwapchainStatus},
};
