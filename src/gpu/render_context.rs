use std::fmt;

use super::texture::DepthTarget;

/// Why the GPU context could not be brought up.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not be turned into a surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    Device(wgpu::RequestDeviceError),
    /// The adapter reports no usable configuration for the surface.
    NoSurfaceConfig,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create window surface: {e}"),
            Self::Adapter(e) => write!(f, "no adapter can present to the window: {e}"),
            Self::Device(e) => write!(f, "cannot open GPU device: {e}"),
            Self::NoSurfaceConfig => f.write_str("adapter has no configuration for this surface"),
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::NoSurfaceConfig => None,
        }
    }
}

/// Device, queue and window surface, plus the depth buffer that tracks the
/// surface size.
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    /// The window surface for presentation.
    pub surface: wgpu::Surface<'static>,
    /// Current surface configuration (format, size, present mode).
    pub config: wgpu::SurfaceConfiguration,
    /// Depth buffer matching the surface size.
    pub depth: DepthTarget,
    /// Whether swapchain textures can be copied out (screenshots).
    pub supports_readback: bool,
}

impl RenderContext {
    /// Open a device that can present to `window` and configure the surface
    /// at `initial_size` (zero dimensions are bumped to 1).
    ///
    /// # Errors
    ///
    /// Any of the [`RenderContextError`] cases.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::Surface)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderContextError::Adapter)?;
        let info = adapter.get_info();
        log::info!("using adapter {:?} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("orbview device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::Device)?;

        let (config, supports_readback) =
            Self::surface_config(&surface, &adapter, initial_size)?;
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, config.width, config.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth,
            supports_readback,
        })
    }

    /// Vsync'd default configuration, with `COPY_SRC` added when the
    /// surface allows it so frames can be read back.
    fn surface_config(
        surface: &wgpu::Surface<'_>,
        adapter: &wgpu::Adapter,
        (width, height): (u32, u32),
    ) -> Result<(wgpu::SurfaceConfiguration, bool), RenderContextError> {
        let mut config = surface
            .get_default_config(adapter, width.max(1), height.max(1))
            .ok_or(RenderContextError::NoSurfaceConfig)?;
        config.present_mode = wgpu::PresentMode::Fifo;

        let readback = surface
            .get_capabilities(adapter)
            .usages
            .contains(wgpu::TextureUsages::COPY_SRC);
        if readback {
            config.usage |= wgpu::TextureUsages::COPY_SRC;
        } else {
            log::warn!("surface does not allow COPY_SRC; screenshots are disabled");
        }
        Ok((config, readback))
    }

    /// The surface texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Follow a new window size. Zero-sized and unchanged sizes are ignored;
    /// otherwise the surface is reconfigured and the depth buffer rebuilt.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        log::debug!("surface {:?} -> {width}x{height}", self.size());
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        self.depth = DepthTarget::new(&self.device, width, height);
    }

    /// Configure the surface again at its current size, after a `Lost` or
    /// `Outdated` error.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next swapchain texture.
    ///
    /// # Errors
    ///
    /// [`wgpu::SurfaceError`] if the surface is lost, outdated or timed out.
    pub fn get_next_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// New command encoder for one frame.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Finish `encoder` and submit it after any `extra` command buffers
    /// (egui's buffer uploads).
    pub fn submit(
        &self,
        extra: Vec<wgpu::CommandBuffer>,
        encoder: wgpu::CommandEncoder,
    ) -> wgpu::SubmissionIndex {
        self.queue
            .submit(extra.into_iter().chain(std::iter::once(encoder.finish())))
    }
}
