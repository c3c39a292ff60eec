use crate::device::AllocationError;

/// How a playground run ended without error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlaygroundExit {
    /// Nothing was opened: no callback, or the playground is disabled.
    Skipped,

    /// The user closed the window.
    Closed,
}

/// Why a playground run failed.
///
/// Setup failures leave no window open. Per-frame failures end the run
/// without presenting the failed frame.
#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    #[error("the renderer has no valid rendering context")]
    InvalidRenderer,

    #[error("could not initialize the windowing subsystem: {0}")]
    WindowSystemInit(String),

    #[error("could not create the playground window: {0}")]
    WindowCreation(String),

    #[error("could not bind the window to a GPU surface: {0}")]
    SurfaceCreation(String),

    #[error("could not acquire the next drawable: {0}")]
    DrawableUnavailable(#[source] wgpu::SurfaceError),

    #[error("could not build the render target: {0}")]
    RenderTarget(#[source] AllocationError),

    #[error("could not render into the surface")]
    RenderFailed,
}
