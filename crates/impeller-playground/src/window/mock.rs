use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{bail, Result};
use winit::dpi::PhysicalSize;

use crate::input::InputEvent;

use super::{WindowConfig, WindowSystem};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Init,
    Terminate,
    CreateWindow(String),
    DestroyWindow,
    WaitEvents,
    CreateSurface,
}

/// Window system that records calls and replays scripted events.
#[derive(Default)]
pub(crate) struct RecordingWindowSystem {
    pub calls: Vec<Call>,
    pub fail_init: bool,
    pub fail_create_window: bool,

    /// One batch of events per `wait_events` call.
    pub event_batches: VecDeque<Vec<InputEvent>>,
}

impl WindowSystem for RecordingWindowSystem {
    type Window = ();

    fn init(&mut self) -> Result<()> {
        self.calls.push(Call::Init);
        if self.fail_init {
            bail!("scripted init failure");
        }
        Ok(())
    }

    fn terminate(&mut self) {
        self.calls.push(Call::Terminate);
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<()> {
        self.calls.push(Call::CreateWindow(config.title.clone()));
        if self.fail_create_window {
            bail!("scripted window failure");
        }
        Ok(())
    }

    fn destroy_window(&mut self, _window: ()) {
        self.calls.push(Call::DestroyWindow);
    }

    fn wait_events(
        &mut self,
        _window: &(),
        _timeout: Duration,
        on_event: &mut dyn FnMut(InputEvent),
    ) {
        self.calls.push(Call::WaitEvents);
        for event in self.event_batches.pop_front().unwrap_or_default() {
            on_event(event);
        }
    }

    fn create_surface(
        &mut self,
        _window: &(),
        _instance: &wgpu::Instance,
    ) -> Result<(wgpu::Surface<'static>, PhysicalSize<u32>)> {
        self.calls.push(Call::CreateSurface);
        bail!("no surfaces without a display")
    }
}
