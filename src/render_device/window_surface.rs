use ash::{extensions, vk};

use crate::{enumerate, Instance, VulkanError};

/// The presentation surface and the ash extension loader which provides
/// access to the KHR surface functions.
///
/// The raw surface handle is adopted from the caller - typically it comes
/// from the windowing system - but destruction is owned here: the surface is
/// destroyed when this struct is dropped, which the [super::RenderDevice]
/// arranges to happen before the instance is destroyed.
pub(super) struct WindowSurface {
    surface: vk::SurfaceKHR,
    surface_loader: extensions::khr::Surface,
}

impl WindowSurface {
    /// Wrap an existing surface handle.
    ///
    /// No native create call is made; the handle is adopted as-is.
    pub fn new(instance: &Instance, surface: vk::SurfaceKHR) -> Self {
        let surface_loader =
            extensions::khr::Surface::new(instance.entry(), instance.ash());
        Self {
            surface,
            surface_loader,
        }
    }

    /// Get the raw surface handle for unwrapped native calls.
    pub fn raw(&self) -> vk::SurfaceKHR {
        self.surface
    }

    /// Check that a physical device can present swapchain images to this
    /// surface with the given queue family.
    ///
    /// # Safety
    ///
    /// The queue family index is assumed to be valid for the given physical
    /// device.
    pub unsafe fn get_physical_device_surface_support(
        &self,
        physical_device: &vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> Result<bool, VulkanError> {
        self.surface_loader
            .get_physical_device_surface_support(
                *physical_device,
                queue_family_index,
                self.surface,
            )
            .map_err(VulkanError::UnableToCheckSurfaceSupport)
    }

    /// Get the surface formats the physical device can present with.
    ///
    /// # Safety
    ///
    /// The physical device is assumed to still exist.
    pub unsafe fn supported_formats(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> Result<Vec<vk::SurfaceFormatKHR>, VulkanError> {
        let fp = self
            .surface_loader
            .fp()
            .get_physical_device_surface_formats_khr;
        let surface = self.surface;
        let device = *physical_device;
        enumerate::read_batch(
            "vkGetPhysicalDeviceSurfaceFormatsKHR",
            |count, data| fp(device, surface, count, data),
        )
    }

    /// Get the presentation modes the physical device supports for this
    /// surface.
    ///
    /// # Safety
    ///
    /// The physical device is assumed to still exist.
    pub unsafe fn supported_presentation_modes(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> Result<Vec<vk::PresentModeKHR>, VulkanError> {
        let fp = self
            .surface_loader
            .fp()
            .get_physical_device_surface_present_modes_khr;
        let surface = self.surface;
        let device = *physical_device;
        enumerate::read_batch(
            "vkGetPhysicalDeviceSurfacePresentModesKHR",
            |count, data| fp(device, surface, count, data),
        )
    }

    /// Get the surface's capabilities for the given physical device.
    ///
    /// # Safety
    ///
    /// The physical device is assumed to still exist.
    pub unsafe fn surface_capabilities(
        &self,
        physical_device: &vk::PhysicalDevice,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError> {
        self.surface_loader
            .get_physical_device_surface_capabilities(
                *physical_device,
                self.surface,
            )
            .map_err(VulkanError::UnableToGetSurfaceCapabilities)
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        unsafe {
            self.surface_loader.destroy_surface(self.surface, None);
        }
    }
}

impl std::fmt::Debug for WindowSurface {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("WindowSurface")
            .field("surface", &self.surface)
            .finish()
    }
}
