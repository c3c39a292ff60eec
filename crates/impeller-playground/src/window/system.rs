use std::time::Duration;

use anyhow::Result;
use winit::dpi::{LogicalSize, PhysicalSize};

use crate::input::InputEvent;

/// Size of the playground window. Fixed: the render target is never rebuilt
/// for a new window size.
pub const WINDOW_SIZE: LogicalSize<u32> = LogicalSize::new(1024, 768);

/// Upper bound on a single event wait.
pub const POLL_TIMEOUT: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub size: LogicalSize<u32>,
    pub resizable: bool,
}

impl WindowConfig {
    /// Non-resizable window at [`WINDOW_SIZE`], titled after `test_name`.
    pub fn for_test(test_name: &str) -> Self {
        Self {
            title: window_title(test_name),
            size: WINDOW_SIZE,
            resizable: false,
        }
    }
}

/// Title of the playground window for `test_name`.
pub fn window_title(test_name: &str) -> String {
    format!("Impeller Playground for '{test_name}' (Press ESC or 'q' to quit)")
}

/// Name of the running test.
///
/// libtest names each test thread after the test's path; outside a test this
/// is the thread name, or "unknown" for unnamed threads.
pub fn current_test_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or("unknown")
        .to_string()
}

/// Windowing library operations the playground loop needs.
pub trait WindowSystem {
    type Window;

    /// Brings up the windowing subsystem.
    fn init(&mut self) -> Result<()>;

    /// Shuts the subsystem down. Called once per successful `init`.
    fn terminate(&mut self);

    fn create_window(&mut self, config: &WindowConfig) -> Result<Self::Window>;

    fn destroy_window(&mut self, window: Self::Window);

    /// Blocks until events arrive or `timeout` elapses, forwarding every
    /// translated event to `on_event`.
    fn wait_events(
        &mut self,
        window: &Self::Window,
        timeout: Duration,
        on_event: &mut dyn FnMut(InputEvent),
    );

    /// Binds `window` to a presentable surface created from `instance`.
    ///
    /// Returns the surface and the window's size in physical pixels.
    fn create_surface(
        &mut self,
        window: &Self::Window,
        instance: &wgpu::Instance,
    ) -> Result<(wgpu::Surface<'static>, PhysicalSize<u32>)>;

    /// Called right before a drawable is presented.
    fn pre_present(&mut self, window: &Self::Window) {
        let _ = window;
    }
}

/// Keeps the windowing subsystem initialized; terminates it on drop.
pub struct SubsystemGuard<'a, W: WindowSystem> {
    system: &'a mut W,
}

impl<'a, W: WindowSystem> SubsystemGuard<'a, W> {
    /// Initializes `system`. Nothing needs tearing down if this fails.
    pub fn init(system: &'a mut W) -> Result<Self> {
        system.init()?;
        Ok(Self { system })
    }

    /// Creates a window that is destroyed before this guard terminates the
    /// subsystem.
    pub fn create_window(&mut self, config: &WindowConfig) -> Result<WindowGuard<'_, W>> {
        let window = self.system.create_window(config)?;
        Ok(WindowGuard {
            system: &mut *self.system,
            window: Some(window),
        })
    }
}

impl<W: WindowSystem> Drop for SubsystemGuard<'_, W> {
    fn drop(&mut self) {
        self.system.terminate();
    }
}

/// Owns an open window; destroys it on drop.
pub struct WindowGuard<'a, W: WindowSystem> {
    system: &'a mut W,

    /// Taken only in `drop`.
    window: Option<W::Window>,
}

impl<W: WindowSystem> WindowGuard<'_, W> {
    /// Borrows the window system and the window together.
    pub fn split(&mut self) -> (&mut W, &W::Window) {
        match self.window.as_ref() {
            Some(window) => (&mut *self.system, window),
            None => unreachable!("window is only released when the guard drops"),
        }
    }
}

impl<W: WindowSystem> Drop for WindowGuard<'_, W> {
    fn drop(&mut self) {
        if let Some(window) = self.window.take() {
            self.system.destroy_window(window);
        }
    }
}
