use std::time::Instant;

use crate::assets::{AssetLoader, Fetch, LoadError};
use crate::config::HostConfig;
use crate::engine::{Engine, EngineFactory, EngineInitError};
use crate::frame::{FrameError, FrameLoop, FrameScheduler, LoopState};
use crate::input::{InputEvent, InputRouter, PendingEventQueue};
use crate::surface::{SurfaceDimensions, SurfaceHost, SurfaceSizer};
use crate::time::FrameTime;

/// Fatal startup failure. No frame loop runs after one of these.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    EngineInit(#[from] EngineInitError),
}

/// Owns the engine and the four host-side components.
///
/// Startup order:
/// 1. every asset resolves (or startup fails, engine never constructed)
/// 2. engine constructed, shaders then textures uploaded
/// 3. initial sizing
/// 4. `init_game_data` / `init_render_data`, input accepted, loop started
///
/// If step 3 fails the host waits in a deferred state; the first valid
/// resize completes steps 3 and 4.
pub struct Host<E> {
    engine: E,
    sizer: SurfaceSizer,
    router: InputRouter,
    frame: FrameLoop,
    initialized: bool,
}

impl<E: Engine> Host<E> {
    /// Loads assets, constructs the engine and brings the host up.
    pub async fn start<F, S, Sch, C>(
        config: &HostConfig,
        loader: &AssetLoader<F>,
        surface: &mut S,
        scheduler: &mut Sch,
        factory: C,
    ) -> Result<Self, StartupError>
    where
        F: Fetch,
        S: SurfaceHost + ?Sized,
        Sch: FrameScheduler + ?Sized,
        C: EngineFactory<S, Engine = E>,
    {
        let manifest = &config.assets;
        log::info!(
            "startup: loading shaders and {} texture(s)",
            manifest.textures.len()
        );

        let assets = loader.load_manifest(manifest).await.map_err(|e| {
            log::error!("startup aborted: {e}");
            StartupError::Load(e)
        })?;

        let mut engine = factory.construct(surface).map_err(|e| {
            log::error!("startup aborted: {e}");
            StartupError::EngineInit(e)
        })?;

        engine.load_shader(&assets.shaders.vertex, &assets.shaders.fragment);
        for (slot, texture) in (0u32..).zip(assets.textures) {
            engine.load_texture(slot, texture);
        }

        let mut host = Self {
            engine,
            sizer: SurfaceSizer::new(config.surface.policy),
            router: InputRouter::new(config.input.mode),
            frame: FrameLoop::new(&config.frame),
            initialized: false,
        };

        host.bring_up(surface, scheduler, Instant::now());
        Ok(host)
    }

    /// Host resize notification: recompute and re-apply the surface size.
    pub fn on_resize<S, Sch>(&mut self, surface: &mut S, scheduler: &mut Sch, now: Instant)
    where
        S: SurfaceHost + ?Sized,
        Sch: FrameScheduler + ?Sized,
    {
        self.bring_up(surface, scheduler, now);
    }

    /// Host input notification.
    ///
    /// Events arriving before the engine data is initialized are dropped.
    pub fn on_input(&mut self, event: InputEvent) {
        if !self.initialized {
            log::trace!("input: dropped before init: {event}");
            return;
        }
        self.router.route(&mut self.engine, event);
    }

    /// Host frame callback.
    pub fn on_frame<Sch>(&mut self, scheduler: &mut Sch, now: Instant) -> Result<FrameTime, FrameError>
    where
        Sch: FrameScheduler + ?Sized,
    {
        self.frame.run_frame(now, &mut self.engine, &self.router, scheduler)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Producer handle for hosts that collect input away from the frame
    /// thread. `None` in immediate mode; use [`on_input`](Self::on_input).
    ///
    /// Events pushed here before the engine data is initialized are
    /// discarded at initialization, same as `on_input` drops them.
    pub fn input_queue(&self) -> Option<PendingEventQueue> {
        self.router.queue().cloned()
    }

    pub fn surface_dimensions(&self) -> Option<SurfaceDimensions> {
        self.sizer.current()
    }

    pub fn loop_state(&self) -> LoopState {
        self.frame.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn bring_up<S, Sch>(&mut self, surface: &mut S, scheduler: &mut Sch, now: Instant)
    where
        S: SurfaceHost + ?Sized,
        Sch: FrameScheduler + ?Sized,
    {
        if self.sizer.refresh(surface, &mut self.engine).is_err() || self.initialized {
            return;
        }

        let stale = self.router.discard_pending();
        if stale > 0 {
            log::trace!("input: dropped {stale} event(s) queued before init");
        }

        self.engine.init_game_data();
        self.engine.init_render_data();
        self.initialized = true;
        log::info!("startup: engine data initialized");

        self.frame.start(now, scheduler);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::input::DeliveryMode;
    use crate::testing::{png_bytes, Call, FakeScheduler, FakeSurface, MapFetcher, RecordingEngine};

    fn config(mode: DeliveryMode) -> HostConfig {
        let mut config = HostConfig::from_toml_str(
            r#"
            [assets]
            vertex_shader = "sprite_vert.glsl"
            fragment_shader = "sprite_frag.glsl"
            textures = ["background.png", "possum.png"]

            [surface]
            policy = { padded_multiple = 100 }
            "#,
        )
        .unwrap();
        config.input.mode = mode;
        config
    }

    fn fetcher() -> MapFetcher {
        MapFetcher::new()
            .with("sprite_vert.glsl", b"vert", 1)
            .with("sprite_frag.glsl", b"frag", 0)
            .with("background.png", &png_bytes(2, 2), 2)
            .with("possum.png", &png_bytes(3, 1), 0)
    }

    fn recording(_: &FakeSurface) -> Result<RecordingEngine, EngineInitError> {
        Ok(RecordingEngine::default())
    }

    fn start(
        config: &HostConfig,
        fetcher: &MapFetcher,
        surface: &mut FakeSurface,
        scheduler: &mut FakeScheduler,
    ) -> Result<Host<RecordingEngine>, StartupError> {
        let loader = AssetLoader::new(fetcher);
        pollster::block_on(Host::start(config, &loader, surface, scheduler, recording))
    }

    // ── startup order ─────────────────────────────────────────────────────

    #[test]
    fn startup_uploads_then_sizes_then_initializes() {
        let mut surface = FakeSurface::new(650, 320);
        let mut scheduler = FakeScheduler::default();

        let host = start(&config(DeliveryMode::Batched), &fetcher(), &mut surface, &mut scheduler).unwrap();

        assert_eq!(
            host.engine().calls,
            vec![
                Call::Shader { vertex: "vert".into(), fragment: "frag".into() },
                Call::Texture { slot: 0, width: 2, height: 2 },
                Call::Texture { slot: 1, width: 3, height: 1 },
                Call::Dimensions(700, 400),
                Call::InitGameData,
                Call::InitRenderData,
            ]
        );
        assert_eq!(surface.applied, vec![SurfaceDimensions::new(700, 400).unwrap()]);
        assert_eq!(host.loop_state(), LoopState::Running);
        assert_eq!(scheduler.requests, 1);
    }

    #[test]
    fn load_failure_never_constructs_engine() {
        let fetcher = MapFetcher::new()
            .with("sprite_vert.glsl", b"vert", 0)
            .with("sprite_frag.glsl", b"frag", 0)
            .with("background.png", &png_bytes(2, 2), 0);
        let mut surface = FakeSurface::new(650, 320);
        let mut scheduler = FakeScheduler::default();
        let constructed = std::cell::Cell::new(false);

        let loader = AssetLoader::new(&fetcher);
        let result = pollster::block_on(Host::start(
            &config(DeliveryMode::Batched),
            &loader,
            &mut surface,
            &mut scheduler,
            |_: &FakeSurface| {
                constructed.set(true);
                Ok::<_, EngineInitError>(RecordingEngine::default())
            },
        ));

        match result {
            Err(StartupError::Load(e)) => assert!(e.contains_url("possum.png")),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("startup should fail"),
        }
        assert!(!constructed.get());
        assert!(surface.applied.is_empty());
        assert_eq!(scheduler.requests, 0);
    }

    #[test]
    fn engine_init_error_aborts_startup() {
        let mut surface = FakeSurface::new(650, 320);
        let mut scheduler = FakeScheduler::default();

        let loader = AssetLoader::new(fetcher());
        let result = pollster::block_on(Host::start(
            &config(DeliveryMode::Batched),
            &loader,
            &mut surface,
            &mut scheduler,
            |_: &FakeSurface| Err::<RecordingEngine, _>(EngineInitError::new("no webgl2 context")),
        ));

        assert!(matches!(result, Err(StartupError::EngineInit(_))));
        assert!(surface.applied.is_empty());
        assert_eq!(scheduler.requests, 0);
    }

    // ── deferred sizing ───────────────────────────────────────────────────

    #[test]
    fn invalid_container_defers_init_until_resize() {
        let mut surface = FakeSurface::new(0, 0);
        let mut scheduler = FakeScheduler::default();

        let mut host = start(&config(DeliveryMode::Batched), &fetcher(), &mut surface, &mut scheduler).unwrap();
        assert!(!host.is_initialized());
        assert_eq!(host.loop_state(), LoopState::Idle);
        assert!(!host.engine().calls.contains(&Call::InitGameData));

        surface.container = (320, 200);
        host.on_resize(&mut surface, &mut scheduler, Instant::now());

        assert!(host.is_initialized());
        assert_eq!(host.loop_state(), LoopState::Running);
        let tail = &host.engine().calls[host.engine().calls.len() - 3..];
        assert_eq!(tail, &[Call::Dimensions(400, 300), Call::InitGameData, Call::InitRenderData]);
    }

    #[test]
    fn resize_after_init_only_reapplies() {
        let mut surface = FakeSurface::new(650, 320);
        let mut scheduler = FakeScheduler::default();
        let mut host = start(&config(DeliveryMode::Batched), &fetcher(), &mut surface, &mut scheduler).unwrap();
        let before = host.engine().calls.len();

        host.on_resize(&mut surface, &mut scheduler, Instant::now());

        assert_eq!(&host.engine().calls[before..], &[Call::Dimensions(700, 400)]);
        assert_eq!(scheduler.requests, 1);
    }

    // ── input and frames ──────────────────────────────────────────────────

    #[test]
    fn batched_input_reaches_engine_on_next_frame() {
        let mut surface = FakeSurface::new(650, 320);
        let mut scheduler = FakeScheduler::default();
        let mut host = start(&config(DeliveryMode::Batched), &fetcher(), &mut surface, &mut scheduler).unwrap();
        let before = host.engine().calls.len();

        host.on_input(InputEvent::key(true, "A"));
        host.on_input(InputEvent::key(false, "A"));
        host.input_queue().unwrap().push(InputEvent::pointer(true, 10, 10));
        host.on_frame(&mut scheduler, Instant::now() + Duration::from_millis(16)).unwrap();

        let calls = &host.engine().calls[before..];
        assert_eq!(
            calls[0],
            Call::Events(vec![
                InputEvent::key(true, "A"),
                InputEvent::key(false, "A"),
                InputEvent::pointer(true, 10, 10),
            ])
        );
        assert!(matches!(calls[1], Call::Update(_)));
        assert_eq!(calls[2], Call::Render);
        assert!(host.input_queue().unwrap().is_empty());
    }

    #[test]
    fn immediate_input_bypasses_frame() {
        let mut surface = FakeSurface::new(650, 320);
        let mut scheduler = FakeScheduler::default();
        let mut host = start(&config(DeliveryMode::Immediate), &fetcher(), &mut surface, &mut scheduler).unwrap();

        host.on_input(InputEvent::pointer_move(4, 2));
        assert_eq!(
            host.engine().calls.last(),
            Some(&Call::Event(InputEvent::pointer_move(4, 2)))
        );
    }

    #[test]
    fn input_before_init_is_dropped() {
        let mut surface = FakeSurface::new(-5, 10);
        let mut scheduler = FakeScheduler::default();
        let mut host = start(&config(DeliveryMode::Immediate), &fetcher(), &mut surface, &mut scheduler).unwrap();
        let before = host.engine().calls.len();

        host.on_input(InputEvent::key(true, "KeyW"));
        assert_eq!(host.engine().calls.len(), before);
    }

    #[test]
    fn frame_before_init_is_rejected() {
        let mut surface = FakeSurface::new(0, 10);
        let mut scheduler = FakeScheduler::default();
        let mut host = start(&config(DeliveryMode::Batched), &fetcher(), &mut surface, &mut scheduler).unwrap();

        let err = host.on_frame(&mut scheduler, Instant::now()).unwrap_err();
        assert_eq!(err, FrameError::NotRunning(LoopState::Idle));
    }

    #[test]
    fn immediate_mode_hands_out_no_queue() {
        let mut surface = FakeSurface::new(650, 320);
        let mut scheduler = FakeScheduler::default();
        let host = start(&config(DeliveryMode::Immediate), &fetcher(), &mut surface, &mut scheduler).unwrap();

        assert!(host.input_queue().is_none());
    }

    #[test]
    fn queued_input_before_init_never_reaches_engine() {
        let mut surface = FakeSurface::new(0, 0);
        let mut scheduler = FakeScheduler::default();
        let mut host = start(&config(DeliveryMode::Batched), &fetcher(), &mut surface, &mut scheduler).unwrap();

        let queue = host.input_queue().unwrap();
        queue.push(InputEvent::key(true, "KeyW"));
        queue.push(InputEvent::pointer_move(8, 8));

        surface.container = (320, 200);
        let now = Instant::now();
        host.on_resize(&mut surface, &mut scheduler, now);
        assert!(queue.is_empty());

        let before = host.engine().calls.len();
        host.on_frame(&mut scheduler, now + Duration::from_millis(16)).unwrap();
        assert_eq!(host.engine().calls[before], Call::Events(vec![]));
    }
}
