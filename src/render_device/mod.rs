mod api;
mod physical_device;
mod queue;
mod queue_families;
mod window_surface;

use ash::vk;

use self::{queue_families::QueueFamilies, window_surface::WindowSurface};
use crate::{Instance, VulkanError};

pub use self::queue::Queue;

/// The Vulkan logical device and the queues and surface that go with it.
///
/// This is the shared ancestor for every wrapper in [crate::raii]: each of
/// them holds an `Arc<RenderDevice>`, so the device (and through it the
/// instance and its dispatch tables) cannot be destroyed while any
/// descendant resource is still alive.
pub struct RenderDevice {
    graphics_queue: Queue,
    present_queue: Queue,
    physical_device: vk::PhysicalDevice,
    logical_device: ash::Device,

    // Declaration order matters below this comment: the logical device is
    // destroyed in drop(), then the surface, then the instance.
    window_surface: WindowSurface,
    instance: Instance,
}

impl RenderDevice {
    /// Create the logical Vulkan device, picking the first physical device
    /// which supports presentation to the given surface.
    ///
    /// The instance and the surface are owned by the new device from this
    /// point on; the surface is destroyed when the device is dropped.
    ///
    /// # Safety
    ///
    /// The surface must have been created from the same instance.
    pub unsafe fn new(
        instance: Instance,
        surface_khr: vk::SurfaceKHR,
    ) -> Result<Self, VulkanError> {
        let window_surface = WindowSurface::new(&instance, surface_khr);
        let physical_device = physical_device::find_optimal_physical_device(
            &instance,
            &window_surface,
        )?;
        let queue_families = QueueFamilies::find_for_physical_device(
            &instance,
            &window_surface,
            &physical_device,
        )?;
        let logical_device = instance.create_logical_device(
            physical_device,
            vk::PhysicalDeviceFeatures::default(),
            &physical_device::required_device_extensions(),
            &queue_families.as_queue_create_infos(),
        )?;
        let (graphics_queue, present_queue) =
            queue_families.get_queues(&logical_device);

        log::debug!(
            "Created render device with queues {} and {}",
            graphics_queue,
            present_queue
        );

        Ok(Self {
            graphics_queue,
            present_queue,
            physical_device,
            logical_device,
            window_surface,
            instance,
        })
    }

    /// Get the raw ash device for unwrapped native calls.
    ///
    /// Ownership is not transferred. The caller must not destroy the device.
    pub fn device(&self) -> &ash::Device {
        &self.logical_device
    }

    /// The instance this device was created from.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The raw physical device backing the logical device.
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// The queue used for graphics and compute commands.
    pub fn graphics_queue(&self) -> &Queue {
        &self.graphics_queue
    }

    /// The queue used for presenting swapchain images.
    pub fn presentation_queue(&self) -> &Queue {
        &self.present_queue
    }

    /// Give a debug name for a Vulkan object owned by this device. The name
    /// set here is visible in the Vulkan validation layer logs.
    pub fn set_debug_name<Name, Handle>(
        &self,
        handle: Handle,
        object_type: vk::ObjectType,
        name: Name,
    ) where
        Name: Into<String>,
        Handle: vk::Handle + Copy,
    {
        let owned_name = name.into();
        let cname = std::ffi::CString::new(owned_name).unwrap();
        let name_info = vk::DebugUtilsObjectNameInfoEXT {
            object_type,
            p_object_name: cname.as_ptr(),
            object_handle: handle.as_raw(),
            ..Default::default()
        };
        self.instance
            .debug_utils_set_object_name(&self.logical_device, &name_info);
    }
}

impl Drop for RenderDevice {
    /// The application must ensure every resource created from this device
    /// is dropped first. There is no internal synchronization.
    fn drop(&mut self) {
        unsafe {
            self.logical_device
                .device_wait_idle()
                .expect("Error while idling the device before destruction!");
            self.logical_device.destroy_device(None);
        }
    }
}

impl std::fmt::Debug for RenderDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderDevice")
            .field("physical_device", &self.physical_device)
            .field("graphics_queue", &self.graphics_queue)
            .field("present_queue", &self.present_queue)
            .finish()
    }
}
