use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::{AssetLoader, FsFetcher};
use crate::bootstrap::Host;
use crate::config::HostConfig;
use crate::engine::{Engine, EngineFactory};
use crate::frame::{FrameError, FrameScheduler};
use crate::input::platform::winit::{translate_window_event, PointerTracker};
use crate::surface::{SurfaceDimensions, SurfaceHost};

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub width: f64,
    pub height: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "possum".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// The window as a sizing host.
///
/// The container is the window's inner area in logical pixels. The applied
/// surface size is kept here for the engine to read; the engine owns the
/// actual drawable.
pub struct WindowSurface {
    window: Arc<Window>,
    surface_size: Option<SurfaceDimensions>,
}

impl WindowSurface {
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Size most recently applied by the sizing policy.
    pub fn surface_size(&self) -> Option<SurfaceDimensions> {
        self.surface_size
    }
}

impl SurfaceHost for WindowSurface {
    fn container_size(&self) -> (i64, i64) {
        let logical: LogicalSize<f64> = self.window.inner_size().to_logical(self.window.scale_factor());
        (logical.width.floor() as i64, logical.height.floor() as i64)
    }

    fn set_surface_size(&mut self, dims: SurfaceDimensions) {
        self.surface_size = Some(dims);
    }
}

/// Frame scheduling through winit redraw requests.
struct RedrawScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

/// Entry point for the desktop host.
pub struct Runtime;

impl Runtime {
    /// Opens a window, runs startup, then drives frames until the window
    /// closes or the frame loop halts.
    pub fn run<C, E>(config: HostConfig, factory: C) -> Result<()>
    where
        C: EngineFactory<WindowSurface, Engine = E>,
        E: Engine,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, factory);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct WindowEntry<E> {
    id: WindowId,
    surface: WindowSurface,
    scheduler: RedrawScheduler,
    tracker: PointerTracker,
    host: Host<E>,
}

struct AppState<C, E> {
    config: HostConfig,
    factory: Option<C>,
    entry: Option<WindowEntry<E>>,
    failure: Option<anyhow::Error>,
}

impl<C, E> AppState<C, E>
where
    C: EngineFactory<WindowSurface, Engine = E>,
    E: Engine,
{
    fn new(config: HostConfig, factory: C) -> Self {
        Self {
            config,
            factory: Some(factory),
            entry: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.failure = Some(error);
        event_loop.exit();
    }

    fn create_entry(&mut self, event_loop: &ActiveEventLoop, factory: C) -> Result<WindowEntry<E>> {
        let window_config = &self.config.window;
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let mut surface = WindowSurface {
            window: Arc::clone(&window),
            surface_size: None,
        };
        let mut scheduler = RedrawScheduler {
            window: Arc::clone(&window),
        };

        let loader = AssetLoader::new(FsFetcher::new(&self.config.fetch.root));
        let host = pollster::block_on(Host::start(
            &self.config,
            &loader,
            &mut surface,
            &mut scheduler,
            factory,
        ))
        .context("startup failed")?;

        Ok(WindowEntry {
            id: window.id(),
            surface,
            scheduler,
            tracker: PointerTracker::default(),
            host,
        })
    }
}

impl<C, E> ApplicationHandler for AppState<C, E>
where
    C: EngineFactory<WindowSurface, Engine = E>,
    E: Engine,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let Some(factory) = self.factory.take() else {
            return;
        };

        match self.create_entry(event_loop, factory) {
            Ok(entry) => self.entry = Some(entry),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Frames are requested by the frame loop itself.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.id != window_id {
            return;
        }

        let scale_factor = entry.surface.window().scale_factor();
        if let Some(ev) = translate_window_event(scale_factor, &mut entry.tracker, &event) {
            entry.host.on_input(ev);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry
                    .host
                    .on_resize(&mut entry.surface, &mut entry.scheduler, Instant::now());
            }

            WindowEvent::RedrawRequested => {
                let result = entry.host.on_frame(&mut entry.scheduler, Instant::now());
                // NotRunning only happens while sizing is deferred.
                if let Err(e @ FrameError::Halted { .. }) = result {
                    self.fail(event_loop, anyhow!(e));
                }
            }

            _ => {}
        }
    }
}
