use crate::error::KonusError;

/// Container for the GPU objects meshes upload to and draw with.
pub struct Gpu {
    /// The WGPU device.
    pub device: wgpu::Device,
    /// The WGPU queue.
    pub queue: wgpu::Queue,
}

/// Parameters for when creating a new GPU adapter.
pub struct GpuOptions {
    /// Provides a **hint** to indicate which GPU to use. `LowPower` means to
    /// use an integrated GPU, while `HighPower` means to use a dedicated GPU.
    /// Default is `None` (provides no hint).
    pub power_preference: wgpu::PowerPreference,
    /// Forces the use of a fallback (usually software) adapter. Default is
    /// `false`.
    pub force_fallback_adapter: bool,
}

impl Default for GpuOptions {
    /// Returns the default GPU adapter parameters.
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::None,
            force_fallback_adapter: false,
        }
    }
}

impl Gpu {
    /// Creates a new GPU object with the specified options.
    ///
    /// The adapter is requested without a compatible surface: meshes only
    /// need a device and a queue, and presentation belongs to the host
    /// application.
    ///
    /// # Errors
    ///
    /// Returns [`KonusError::NoAdapter`] if no adapter matches the options,
    /// or [`KonusError::RequestDevice`] if the device request fails. Device
    /// requests are not retried.
    pub async fn new(options: GpuOptions) -> Result<Self, KonusError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: options.power_preference,
                force_fallback_adapter: options.force_fallback_adapter,
                compatible_surface: None,
            })
            .await
            .ok_or(KonusError::NoAdapter)?;

        log::debug!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        Ok(Gpu { device, queue })
    }
}
