//! Pure decision logic for swapchain creation. Each function takes the
//! device's reported options and picks one, so the choices can be tested
//! without a live device.

use {crate::VulkanError, ash::vk};

/// Pick the surface format for swapchain images. Prefers SRGB, falls back to
/// whatever the device lists first.
pub fn choose_surface_format(
    formats: &[vk::SurfaceFormatKHR],
) -> Result<vk::SurfaceFormatKHR, VulkanError> {
    let preferred = formats.iter().copied().find(|format| {
        format.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
            && format.format == vk::Format::B8G8R8A8_SRGB
    });
    let format = preferred
        .or_else(|| formats.first().copied())
        .ok_or(VulkanError::NoSuitableSurfaceFormat)?;
    log::debug!("Chose Surface Format: {:#?}", format);
    Ok(format)
}

/// Pick the presentation mode. MAILBOX when available, otherwise FIFO, which
/// every conformant device supports.
pub fn choose_present_mode(modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    let mode = if modes.contains(&vk::PresentModeKHR::MAILBOX) {
        vk::PresentModeKHR::MAILBOX
    } else {
        vk::PresentModeKHR::FIFO
    };
    log::debug!("Chose Present Mode: {:#?}", mode);
    mode
}

/// Pick the swapchain extent. The surface dictates the extent unless it
/// reports the u32::MAX sentinel, in which case the framebuffer size is
/// clamped to the surface's limits.
pub fn choose_swap_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    framebuffer_size: (u32, u32),
) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        log::debug!(
            "use current swapchain extent {:?}",
            capabilities.current_extent
        );
        capabilities.current_extent
    } else {
        let (width, height) = framebuffer_size;
        let extent = vk::Extent2D {
            width: width.clamp(
                capabilities.min_image_extent.width,
                capabilities.max_image_extent.width,
            ),
            height: height.clamp(
                capabilities.min_image_extent.height,
                capabilities.max_image_extent.height,
            ),
        };
        log::debug!("use computed extent {:?}", extent);
        extent
    }
}

/// Pick the minimum image count. One more than the surface's minimum gives
/// the driver room to pipeline, capped at the maximum when the surface
/// reports one. A maximum of zero means unbounded.
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let proposed_image_count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 {
        std::cmp::min(proposed_image_count, capabilities.max_image_count)
    } else {
        proposed_image_count
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn format(
        format: vk::Format,
        color_space: vk::ColorSpaceKHR,
    ) -> vk::SurfaceFormatKHR {
        vk::SurfaceFormatKHR {
            format,
            color_space,
        }
    }

    #[test]
    fn srgb_formats_are_preferred() {
        let formats = [
            format(
                vk::Format::R8G8B8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
            format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
        ];
        let chosen = choose_surface_format(&formats).unwrap();
        assert_eq!(chosen.format, vk::Format::B8G8R8A8_SRGB);
    }

    #[test]
    fn the_first_format_is_the_fallback() {
        let formats = [
            format(
                vk::Format::R8G8B8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
            format(
                vk::Format::R5G6B5_UNORM_PACK16,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
        ];
        let chosen = choose_surface_format(&formats).unwrap();
        assert_eq!(chosen.format, vk::Format::R8G8B8A8_UNORM);
    }

    #[test]
    fn no_formats_is_an_error() {
        assert!(matches!(
            choose_surface_format(&[]),
            Err(VulkanError::NoSuitableSurfaceFormat)
        ));
    }

    #[test]
    fn mailbox_wins_when_available() {
        let modes =
            [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::MAILBOX];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::MAILBOX);
    }

    #[test]
    fn fifo_is_the_fallback_mode() {
        let modes =
            [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::IMMEDIATE];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn the_surface_extent_wins_when_fixed() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D {
                width: 800,
                height: 600,
            },
            ..Default::default()
        };
        let extent = choose_swap_extent(&capabilities, (1024, 768));
        assert_eq!(extent.width, 800);
        assert_eq!(extent.height, 600);
    }

    #[test]
    fn the_framebuffer_size_is_clamped_when_the_surface_is_flexible() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D {
                width: u32::MAX,
                height: u32::MAX,
            },
            min_image_extent: vk::Extent2D {
                width: 100,
                height: 100,
            },
            max_image_extent: vk::Extent2D {
                width: 1920,
                height: 1080,
            },
            ..Default::default()
        };
        let extent = choose_swap_extent(&capabilities, (4000, 50));
        assert_eq!(extent.width, 1920);
        assert_eq!(extent.height, 100);
    }

    #[test]
    fn image_count_is_one_more_than_the_minimum() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            min_image_count: 2,
            max_image_count: 0,
            ..Default::default()
        };
        assert_eq!(choose_image_count(&capabilities), 3);
    }

    #[test]
    fn image_count_respects_the_surface_maximum() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            min_image_count: 3,
            max_image_count: 3,
            ..Default::default()
        };
        assert_eq!(choose_image_count(&capabilities), 3);
    }
}
