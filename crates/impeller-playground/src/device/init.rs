/// Construction parameters for the rendering context.
///
/// Keep this structure small. The stencil format and surface format are not
/// configurable; the context picks them from adapter capabilities.
#[derive(Debug, Clone)]
pub struct ContextInit {
    /// Backends wgpu may choose from.
    pub backends: wgpu::Backends,

    /// Adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features, in addition to the ones the context enables itself.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,
}

impl Default for ContextInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}
