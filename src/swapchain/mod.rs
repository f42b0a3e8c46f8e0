mod acquire_present;
mod selection;

use {
    crate::{
        enumerate,
        raii::{Image, ImageView},
        RenderDevice, VulkanError,
    },
    ash::vk,
    scopeguard::ScopeGuard,
    std::sync::Arc,
};

pub use self::acquire_present::SwapchainStatus;

/// The swapchain and all related resources.
pub struct Swapchain {
    image_views: Vec<ImageView>,
    images: Vec<Image>,
    loader: ash::extensions::khr::Swapchain,
    swapchain_khr: vk::SwapchainKHR,
    extent: vk::Extent2D,
    format: vk::SurfaceFormatKHR,
    render_device: Arc<RenderDevice>,
}

impl Swapchain {
    /// Create a new Swapchain, accounting for the previous swapchain if one
    /// existed.
    ///
    /// The previous swapchain is consumed: its handle is passed to the
    /// driver as `old_swapchain` so in-flight presentation can be carried
    /// over, then it is destroyed when this function returns.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The swapchain must be dropped before the render device.
    ///   - The caller must ensure all use of the previous swapchain's images
    ///     is complete before rebuilding.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        framebuffer_size: (u32, u32),
        previous: Option<Self>,
    ) -> Result<Self, VulkanError> {
        let format =
            selection::choose_surface_format(&render_device.surface_formats()?)?;
        let mode = selection::choose_present_mode(
            &render_device.surface_present_modes()?,
        );
        let capabilities = render_device.surface_capabilities()?;
        let extent =
            selection::choose_swap_extent(&capabilities, framebuffer_size);
        let image_count = selection::choose_image_count(&capabilities);

        let mut create_info = vk::SwapchainCreateInfoKHR {
            // it is safe to use the surface KHR reference here because the
            // swapchain keeps a reference to the RenderDevice until dropped.
            surface: render_device.surface_khr(),

            // image settings
            image_format: format.format,
            image_color_space: format.color_space,
            image_extent: extent,
            min_image_count: image_count,
            image_array_layers: 1,
            image_usage: vk::ImageUsageFlags::COLOR_ATTACHMENT,

            // window system presentation settings
            present_mode: mode,
            composite_alpha: vk::CompositeAlphaFlagsKHR::OPAQUE,
            pre_transform: vk::SurfaceTransformFlagsKHR::IDENTITY,
            old_swapchain: previous
                .as_ref()
                .map(|swapchain| swapchain.swapchain_khr)
                .unwrap_or_else(vk::SwapchainKHR::null),
            clipped: 1,

            ..Default::default()
        };

        let indices = render_device.swapchain_queue_family_indices();
        if indices.len() == 1 {
            create_info.image_sharing_mode = vk::SharingMode::EXCLUSIVE;
        } else {
            create_info.image_sharing_mode = vk::SharingMode::CONCURRENT;
            create_info.p_queue_family_indices = indices.as_ptr();
            create_info.queue_family_index_count = indices.len() as u32;
        }

        let loader = render_device.create_swapchain_loader();
        let swapchain_khr = loader
            .create_swapchain(&create_info, None)
            .map_err(VulkanError::UnableToCreateSwapchain)?;

        // If anything below fails, the fresh swapchain handle must still be
        // destroyed before the error propagates.
        let swapchain_khr = scopeguard::guard(swapchain_khr, |swapchain_khr| {
            loader.destroy_swapchain(swapchain_khr, None);
        });

        let images = get_swapchain_images(
            &render_device,
            &loader,
            *swapchain_khr,
        )?;
        let image_views = create_image_views(
            &render_device,
            &images,
            format.format,
        )?;
        let swapchain_khr = ScopeGuard::into_inner(swapchain_khr);

        Ok(Self {
            image_views,
            images,
            loader,
            swapchain_khr,
            extent,
            format,
            render_device,
        })
    }

    /// Get the 2D extent used to create the swapchain images and views.
    pub fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    /// The surface format the swapchain images were created with.
    pub fn format(&self) -> vk::SurfaceFormatKHR {
        self.format
    }

    /// The number of images owned by the swapchain. The driver is free to
    /// create more images than the requested minimum.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// The swapchain's images. The images are owned by the swapchain itself
    /// and are destroyed with it.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// One view per swapchain image, in image order.
    pub fn image_views(&self) -> &[ImageView] {
        &self.image_views
    }

    /// Get the raw Vulkan swapchain handle.
    pub fn raw(&self) -> vk::SwapchainKHR {
        self.swapchain_khr
    }
}

impl Drop for Swapchain {
    /// # Safety
    ///
    /// The application must ensure that all usage of the Swapchain is
    /// complete before dropping.
    fn drop(&mut self) {
        // views reference the swapchain's images and must go first
        self.image_views.clear();
        self.images.clear();
        unsafe {
            self.loader.destroy_swapchain(self.swapchain_khr, None);
        }
    }
}

impl std::fmt::Debug for Swapchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Swapchain")
            .field("swapchain_khr", &self.swapchain_khr)
            .field("extent", &self.extent)
            .field("format", &self.format)
            .field("image_count", &self.images.len())
            .finish()
    }
}

/// Read the swapchain's images and adopt each one. The images are owned by
/// the swapchain, so the wrappers never destroy them.
unsafe fn get_swapchain_images(
    render_device: &Arc<RenderDevice>,
    loader: &ash::extensions::khr::Swapchain,
    swapchain_khr: vk::SwapchainKHR,
) -> Result<Vec<Image>, VulkanError> {
    let fp = loader.fp().get_swapchain_images_khr;
    let device_handle = render_device.device().handle();
    let raw_images =
        enumerate::read_batch("vkGetSwapchainImagesKHR", |count, values| {
            fp(device_handle, swapchain_khr, count, values)
        })?;
    Ok(raw_images
        .into_iter()
        .map(|image| Image::adopt(render_device.clone(), image))
        .collect())
}

unsafe fn create_image_views(
    render_device: &Arc<RenderDevice>,
    images: &[Image],
    format: vk::Format,
) -> Result<Vec<ImageView>, VulkanError> {
    let mut image_views = vec![];
    for (i, image) in images.iter().enumerate() {
        let create_info = vk::ImageViewCreateInfo {
            image: image.raw(),
            format,
            view_type: vk::ImageViewType::TYPE_2D,
            subresource_range: vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            },
            components: vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            },
            ..Default::default()
        };
        let image_view = ImageView::new(render_device.clone(), &create_info)?;
        image_view.set_debug_name(format!("swapchain image view {}", i));
        image_views.push(image_view);
    }
    Ok(image_views)
}
