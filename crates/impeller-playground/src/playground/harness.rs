use winit::dpi::LogicalSize;

use crate::coords::Vec2;
use crate::device::{Context, ContextInit, PlaygroundSurface};
use crate::fixtures::{self, FixtureDirectory, FixtureError, FixtureSource};
use crate::input::{InputEvent, InputState, PointerMoveEvent};
use crate::render::{RenderCallback, RenderTarget, Renderer, PASS_LABEL};
use crate::shaders;
use crate::time::FrameClock;
use crate::window::{
    current_test_name, SubsystemGuard, WindowConfig, WindowSystem, WinitWindowSystem, POLL_TIMEOUT,
    WINDOW_SIZE,
};

use super::{PlaygroundError, PlaygroundExit};

/// Environment variable that lets playground runs open a window.
pub const ENABLE_PLAYGROUND_ENV: &str = "IMPELLER_ENABLE_PLAYGROUND";

/// Whether `IMPELLER_ENABLE_PLAYGROUND` allows opening windows.
pub fn playground_enabled() -> bool {
    parse_enabled(std::env::var(ENABLE_PLAYGROUND_ENV).ok().as_deref())
}

fn parse_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Interactive harness that renders a callback into a window.
///
/// One playground is built per test. It owns the renderer (and through it the
/// rendering context) and the fixture source; windows only live for the
/// duration of a run.
pub struct Playground {
    renderer: Renderer,
    fixtures: Box<dyn FixtureSource>,

    /// Last pointer position over the window, in logical pixels.
    cursor_position: Vec2,
}

impl Playground {
    /// Builds the renderer from the shader bundles next to the executable.
    ///
    /// If the context cannot be built the playground is still usable, but
    /// [`context`](Self::context) reports `None` and runs fail.
    pub fn new() -> Self {
        let paths = shaders::shader_library_paths();
        Self::with_renderer(Renderer::new(&paths, ContextInit::default()))
    }

    pub fn with_renderer(renderer: Renderer) -> Self {
        Self {
            renderer,
            fixtures: Box::new(FixtureDirectory::from_env()),
            cursor_position: Vec2::zero(),
        }
    }

    /// Replaces the fixture source.
    pub fn with_fixtures(mut self, fixtures: impl FixtureSource + 'static) -> Self {
        self.fixtures = Box::new(fixtures);
        self
    }

    /// The rendering context, if the renderer is valid.
    pub fn context(&self) -> Option<&Context> {
        self.renderer.context()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Size of the playground window. Fixed; windows cannot be resized.
    pub fn window_size(&self) -> LogicalSize<u32> {
        WINDOW_SIZE
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    pub fn set_cursor_position(&mut self, pos: Vec2) {
        self.cursor_position = pos;
    }

    /// Opens a window and renders `callback` every frame until it is closed.
    ///
    /// Returns `true` when the user closed the window or there was nothing to
    /// open, `false` on any failure (logged). Use [`run`](Self::run) to tell
    /// the outcomes apart.
    ///
    /// While the playground is disabled this returns `true` without checking
    /// the renderer; see [`run`](Self::run).
    pub fn open_playground_here(&mut self, callback: Option<&mut RenderCallback<'_>>) -> bool {
        report(self.run(callback))
    }

    /// Like [`open_playground_here`](Self::open_playground_here) with a typed outcome.
    ///
    /// Skips without opening anything unless `IMPELLER_ENABLE_PLAYGROUND` is set.
    /// The gate is checked first: while disabled, even an invalid renderer
    /// reports [`PlaygroundExit::Skipped`]. Use [`run_with`](Self::run_with)
    /// to have an invalid renderer always fail.
    pub fn run(
        &mut self,
        callback: Option<&mut RenderCallback<'_>>,
    ) -> Result<PlaygroundExit, PlaygroundError> {
        self.run_gated(playground_enabled(), &mut WinitWindowSystem::default(), callback)
    }

    fn run_gated<W: WindowSystem>(
        &mut self,
        enabled: bool,
        system: &mut W,
        callback: Option<&mut RenderCallback<'_>>,
    ) -> Result<PlaygroundExit, PlaygroundError> {
        if callback.is_some() && !enabled {
            log::info!("playground disabled; set {ENABLE_PLAYGROUND_ENV}=1 to open a window");
            return Ok(PlaygroundExit::Skipped);
        }
        self.run_with(system, callback)
    }

    /// [`open_playground_here`](Self::open_playground_here) on an explicit window system.
    pub fn open_playground_with<W: WindowSystem>(
        &mut self,
        system: &mut W,
        callback: Option<&mut RenderCallback<'_>>,
    ) -> bool {
        report(self.run_with(system, callback))
    }

    /// Runs the playground on `system`. Does not consult the environment, so
    /// an invalid renderer always yields [`PlaygroundError::InvalidRenderer`].
    pub fn run_with<W: WindowSystem>(
        &mut self,
        system: &mut W,
        callback: Option<&mut RenderCallback<'_>>,
    ) -> Result<PlaygroundExit, PlaygroundError> {
        let Some(callback) = callback else {
            return Ok(PlaygroundExit::Skipped);
        };

        let Some(context) = self.renderer.context() else {
            return Err(PlaygroundError::InvalidRenderer);
        };

        let mut subsystem = SubsystemGuard::init(system)
            .map_err(|e| PlaygroundError::WindowSystemInit(format!("{e:#}")))?;

        let config = WindowConfig::for_test(&current_test_name());
        let mut window = subsystem
            .create_window(&config)
            .map_err(|e| PlaygroundError::WindowCreation(format!("{e:#}")))?;
        let (system, handle) = window.split();

        let (raw_surface, size) = system
            .create_surface(handle, context.instance())
            .map_err(|e| PlaygroundError::SurfaceCreation(format!("{e:#}")))?;
        let surface = PlaygroundSurface::new(context, raw_surface, size)
            .map_err(|e| PlaygroundError::SurfaceCreation(format!("{e:#}")))?;

        let mut labeled = |pass: &mut wgpu::RenderPass<'_>| {
            pass.insert_debug_marker(PASS_LABEL);
            callback(pass)
        };

        let mut input = InputState::default();
        let mut clock = FrameClock::new();

        loop {
            if wait_for_close(system, handle, &mut input, &mut self.cursor_position) {
                log::info!(
                    "playground closed after {} frames ({:.1} fps)",
                    clock.frames(),
                    clock.average_fps()
                );
                return Ok(PlaygroundExit::Closed);
            }

            let drawable = surface
                .acquire()
                .map_err(PlaygroundError::DrawableUnavailable)?;

            let target = RenderTarget::for_drawable(context, &drawable.texture)
                .map_err(PlaygroundError::RenderTarget)?;

            if !self.renderer.render(&target, &mut labeled) {
                return Err(PlaygroundError::RenderFailed);
            }

            system.pre_present(handle);
            drawable.present();

            let frame = clock.tick();
            log::trace!("presented frame {} (dt {:.4}s)", frame.frame_index, frame.dt);
        }
    }

    /// Loads image fixture `name` into a new RGBA8 texture labeled `name`.
    ///
    /// Failures are logged and yield `None`.
    pub fn create_texture_for_fixture(&self, name: &str) -> Option<wgpu::Texture> {
        match self.load_fixture_texture(name) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }

    /// Like [`create_texture_for_fixture`](Self::create_texture_for_fixture) with the error.
    pub fn load_fixture_texture(&self, name: &str) -> Result<wgpu::Texture, FixtureError> {
        fixtures::load_fixture_texture(self.context(), self.fixtures.as_ref(), name)
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits for one batch of events; returns whether the window should close.
fn wait_for_close<W: WindowSystem>(
    system: &mut W,
    window: &W::Window,
    input: &mut InputState,
    cursor: &mut Vec2,
) -> bool {
    system.wait_events(window, POLL_TIMEOUT, &mut |event| {
        if let InputEvent::PointerMoved(PointerMoveEvent { x, y }) = event {
            *cursor = Vec2::new(x, y);
        }
        input.apply_event(&event);
    });
    input.close_requested()
}

fn report(result: Result<PlaygroundExit, PlaygroundError>) -> bool {
    match result {
        Ok(exit) => {
            log::debug!("playground finished: {exit:?}");
            true
        }
        Err(e) => {
            log::error!("{e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::path::Path;

    use super::*;
    use crate::input::{Key, KeyState};
    use crate::window::mock::{Call, RecordingWindowSystem};

    fn draw_nothing(_pass: &mut wgpu::RenderPass<'_>) -> bool {
        true
    }

    fn headless() -> Playground {
        Playground::with_renderer(Renderer::invalid())
    }

    #[test]
    fn empty_callback_never_touches_the_window_system() {
        let mut system = RecordingWindowSystem::default();
        let mut playground = headless();

        assert!(playground.open_playground_with(&mut system, None));
        assert!(system.calls.is_empty());
    }

    #[test]
    fn empty_callback_is_skipped_not_closed() {
        let mut system = RecordingWindowSystem::default();
        let exit = headless().run_with(&mut system, None).unwrap();
        assert_eq!(exit, PlaygroundExit::Skipped);
    }

    #[test]
    fn invalid_renderer_fails_before_window_system_init() {
        let mut system = RecordingWindowSystem::default();
        let mut playground = headless();
        let mut callback = draw_nothing;

        assert!(!playground.open_playground_with(&mut system, Some(&mut callback)));
        assert!(system.calls.is_empty());

        let err = playground
            .run_with(&mut system, Some(&mut callback))
            .unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidRenderer));
        assert!(system.calls.is_empty());
    }

    #[test]
    fn missing_shader_bundles_leave_no_context() {
        let paths = shaders::shader_library_paths_in(Path::new("/nonexistent/shaders"));
        let playground = Playground::with_renderer(Renderer::new(&paths, ContextInit::default()));
        assert!(playground.context().is_none());
        assert!(!playground.renderer().is_valid());
    }

    #[test]
    fn disabled_playground_skips_before_checking_the_renderer() {
        let mut system = RecordingWindowSystem::default();
        let mut callback = draw_nothing;

        let exit = headless()
            .run_gated(false, &mut system, Some(&mut callback))
            .unwrap();
        assert_eq!(exit, PlaygroundExit::Skipped);
        assert!(system.calls.is_empty());
    }

    #[test]
    fn enabled_playground_reports_invalid_renderer() {
        let mut system = RecordingWindowSystem::default();
        let mut callback = draw_nothing;

        let err = headless()
            .run_gated(true, &mut system, Some(&mut callback))
            .unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidRenderer));
        assert!(system.calls.is_empty());
    }

    #[test]
    fn window_size_is_fixed() {
        let playground = headless();
        assert_eq!(playground.window_size(), LogicalSize::new(1024, 768));
    }

    #[test]
    fn cursor_accessors_round_trip() {
        let mut playground = headless();
        assert_eq!(playground.cursor_position(), Vec2::zero());
        playground.set_cursor_position(Vec2::new(12.0, 34.0));
        assert_eq!(playground.cursor_position(), Vec2::new(12.0, 34.0));
    }

    #[test]
    fn close_key_release_ends_the_next_wait() {
        let mut system = RecordingWindowSystem {
            event_batches: VecDeque::from([
                vec![InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 20.0 })],
                vec![InputEvent::Key {
                    key: Key::Escape,
                    state: KeyState::Released,
                }],
            ]),
            ..Default::default()
        };
        let mut input = InputState::default();
        let mut cursor = Vec2::zero();

        assert!(!wait_for_close(&mut system, &(), &mut input, &mut cursor));
        assert_eq!(cursor, Vec2::new(10.0, 20.0));

        assert!(wait_for_close(&mut system, &(), &mut input, &mut cursor));
        assert_eq!(system.calls, vec![Call::WaitEvents, Call::WaitEvents]);
    }

    #[test]
    fn q_release_closes_too() {
        let mut system = RecordingWindowSystem {
            event_batches: VecDeque::from([vec![
                InputEvent::Key {
                    key: Key::Q,
                    state: KeyState::Pressed,
                },
                InputEvent::Key {
                    key: Key::Q,
                    state: KeyState::Released,
                },
            ]]),
            ..Default::default()
        };
        let mut input = InputState::default();
        let mut cursor = Vec2::zero();
        assert!(wait_for_close(&mut system, &(), &mut input, &mut cursor));
    }

    #[test]
    fn idle_wait_keeps_running() {
        let mut system = RecordingWindowSystem::default();
        let mut input = InputState::default();
        let mut cursor = Vec2::new(5.0, 5.0);
        assert!(!wait_for_close(&mut system, &(), &mut input, &mut cursor));
        assert_eq!(cursor, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn unknown_fixture_yields_none() {
        let playground = headless().with_fixtures(HashMap::<String, Vec<u8>>::new());
        for name in ["missing.png", "also_missing.jpg", ""] {
            assert!(playground.create_texture_for_fixture(name).is_none());
        }
    }

    #[test]
    fn fixture_directory_without_file_yields_none() {
        let dir = std::env::temp_dir().join(format!("impeller-empty-fixtures-{}", std::process::id()));
        let playground = headless().with_fixtures(FixtureDirectory::new(dir));
        assert!(playground.create_texture_for_fixture("bay_bridge.jpg").is_none());
    }

    #[test]
    fn enable_flag_parsing() {
        assert!(parse_enabled(Some("1")));
        assert!(parse_enabled(Some("TRUE")));
        assert!(parse_enabled(Some(" yes ")));
        assert!(!parse_enabled(Some("0")));
        assert!(!parse_enabled(Some("")));
        assert!(!parse_enabled(None));
    }
}
