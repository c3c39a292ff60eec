use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::input::platform::winit::translate_window_event;
use crate::input::InputEvent;

use super::{WindowConfig, WindowSystem};

/// Work the windowing thread does on behalf of a playground run.
enum Request {
    CreateWindow {
        config: WindowConfig,
        reply: Sender<Result<Arc<Window>, String>>,
    },
    DestroyWindow {
        window: Arc<Window>,
        reply: Sender<()>,
    },
    WaitEvents {
        window: Arc<Window>,
        timeout: Duration,
        reply: Sender<Vec<InputEvent>>,
    },
}

// winit allows one event loop per process and never lets it be recreated.
// The loop lives on one thread for the life of the process; every test thread
// reaches it through this channel.
static WINDOW_THREAD: OnceLock<Result<Sender<Request>, String>> = OnceLock::new();

/// [`WindowSystem`] backed by a winit event loop pumped on a dedicated thread.
#[derive(Default)]
pub struct WinitWindowSystem {
    requests: Option<Sender<Request>>,
}

impl WinitWindowSystem {
    /// Sends a request to the windowing thread and waits for its reply.
    fn call<T>(&self, request: impl FnOnce(Sender<T>) -> Request) -> Result<T> {
        let requests = self
            .requests
            .as_ref()
            .context("windowing subsystem is not initialized")?;

        let (reply, response) = mpsc::channel();
        requests
            .send(request(reply))
            .map_err(|_| anyhow!("windowing thread has exited"))?;
        response
            .recv()
            .context("windowing thread dropped the request")
    }
}

impl WindowSystem for WinitWindowSystem {
    type Window = Arc<Window>;

    fn init(&mut self) -> Result<()> {
        if self.requests.is_some() {
            return Ok(());
        }

        self.requests = Some(window_thread()?);
        log::debug!("windowing subsystem initialized");
        Ok(())
    }

    fn terminate(&mut self) {
        // The event loop stays alive for the next run.
        if self.requests.take().is_some() {
            log::debug!("windowing subsystem terminated");
        }
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<Arc<Window>> {
        let window = self
            .call(|reply| Request::CreateWindow {
                config: config.clone(),
                reply,
            })?
            .map_err(anyhow::Error::msg)
            .context("failed to create window")?;

        log::debug!("created window \"{}\"", config.title);
        Ok(window)
    }

    fn destroy_window(&mut self, window: Arc<Window>) {
        if let Err(e) = self.call(|reply| Request::DestroyWindow { window, reply }) {
            log::warn!("could not destroy window on the windowing thread: {e:#}");
        }
    }

    fn wait_events(
        &mut self,
        window: &Arc<Window>,
        timeout: Duration,
        on_event: &mut dyn FnMut(InputEvent),
    ) {
        let events = self.call(|reply| Request::WaitEvents {
            window: Arc::clone(window),
            timeout,
            reply,
        });

        match events {
            Ok(events) => {
                for event in events {
                    on_event(event);
                }
            }
            Err(e) => {
                log::error!("{e:#}");
                on_event(InputEvent::CloseRequested);
            }
        }
    }

    fn create_surface(
        &mut self,
        window: &Arc<Window>,
        instance: &wgpu::Instance,
    ) -> Result<(wgpu::Surface<'static>, PhysicalSize<u32>)> {
        let surface = instance
            .create_surface(Arc::clone(window))
            .context("failed to create wgpu surface")?;
        Ok((surface, window.inner_size()))
    }

    fn pre_present(&mut self, window: &Arc<Window>) {
        window.pre_present_notify();
    }
}

/// Returns a handle to the windowing thread, starting it on first use.
///
/// A startup failure is remembered; later calls report the same error.
fn window_thread() -> Result<Sender<Request>> {
    match WINDOW_THREAD.get_or_init(spawn_window_thread) {
        Ok(requests) => Ok(requests.clone()),
        Err(e) => Err(anyhow!("{e}")),
    }
}

fn spawn_window_thread() -> Result<Sender<Request>, String> {
    let (requests, incoming) = mpsc::channel();
    let (ready, started) = mpsc::channel();

    std::thread::Builder::new()
        .name("impeller-playground-windows".to_string())
        .spawn(move || match new_event_loop() {
            Ok(event_loop) => {
                let _ = ready.send(Ok(()));
                serve(event_loop, incoming);
            }
            Err(e) => {
                let _ = ready.send(Err(format!("{e:#}")));
            }
        })
        .map_err(|e| format!("failed to spawn the windowing thread: {e}"))?;

    started
        .recv()
        .map_err(|_| "windowing thread exited during startup".to_string())??;
    Ok(requests)
}

/// Serves requests until every sender is gone.
fn serve(mut event_loop: EventLoop<()>, requests: Receiver<Request>) {
    for request in requests {
        match request {
            Request::CreateWindow { config, reply } => {
                let window = create_window(&event_loop, &config).map_err(|e| format!("{e:#}"));
                let _ = reply.send(window);
            }

            Request::DestroyWindow { window, reply } => {
                window.set_visible(false);
                drop(window);

                // Let the platform process the destruction.
                event_loop.pump_app_events(Some(Duration::ZERO), &mut DiscardEvents);
                let _ = reply.send(());
            }

            Request::WaitEvents {
                window,
                timeout,
                reply,
            } => {
                let mut events = Vec::new();
                let mut forwarder = ForwardEvents {
                    window: window.as_ref(),
                    events: &mut events,
                };

                if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(timeout), &mut forwarder) {
                    log::debug!("event loop exited with code {code}");
                    events.push(InputEvent::CloseRequested);
                }
                let _ = reply.send(events);
            }
        }
    }
}

fn create_window(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Arc<Window>> {
    let attrs = Window::default_attributes()
        .with_title(config.title.as_str())
        .with_inner_size(config.size)
        .with_resizable(config.resizable);

    // The loop is pumped, not run, so there is no ActiveEventLoop to create from.
    #[allow(deprecated)]
    let window = event_loop.create_window(attrs)?;
    Ok(Arc::new(window))
}

fn new_event_loop() -> Result<EventLoop<()>> {
    let mut builder = EventLoop::builder();

    // The loop runs on the windowing thread, never on main.
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    {
        use winit::platform::wayland::EventLoopBuilderExtWayland;
        use winit::platform::x11::EventLoopBuilderExtX11;
        EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    }
    #[cfg(target_os = "windows")]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;
        builder.with_any_thread(true);
    }

    builder
        .build()
        .context("failed to initialize the windowing subsystem")
}

/// Collects translated events of the playground window.
struct ForwardEvents<'a> {
    window: &'a Window,
    events: &'a mut Vec<InputEvent>,
}

impl ApplicationHandler for ForwardEvents<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        // Late events of windows from earlier runs are dropped.
        if window_id != self.window.id() {
            return;
        }
        if let Some(ev) = translate_window_event(self.window, &event) {
            self.events.push(ev);
        }
    }
}

struct DiscardEvents;

impl ApplicationHandler for DiscardEvents {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, _event: WindowEvent) {}
}
