use std::collections::BTreeSet;

use anyhow::{ensure, Result};

use possum_host::assets::Drawable;
use possum_host::engine::Engine;
use possum_host::input::{InputEvent, KeyEvent};

/// Frames between two status lines.
const REPORT_EVERY: u64 = 120;

/// Diagnostic engine: logs every contract call and keeps counters.
///
/// Stands in for the real simulation so the host side can be exercised on
/// the desktop.
pub struct ConsoleEngine {
    title: String,
    textures: Vec<(u32, u32)>,
    canvas: Option<(u32, u32)>,
    initialized: bool,
    keys_down: BTreeSet<String>,
    pointer: Option<(i32, i32)>,
    frames: u64,
    elapsed_ms: f64,
    events: u64,
}

impl ConsoleEngine {
    pub fn new(title: String) -> Self {
        log::info!("engine[{title}]: constructed");
        Self {
            title,
            textures: Vec::new(),
            canvas: None,
            initialized: false,
            keys_down: BTreeSet::new(),
            pointer: None,
            frames: 0,
            elapsed_ms: 0.0,
            events: 0,
        }
    }
}

impl Engine for ConsoleEngine {
    fn load_shader(&mut self, vertex_source: &str, fragment_source: &str) {
        log::info!(
            "engine[{}]: shader program ({} + {} bytes)",
            self.title,
            vertex_source.len(),
            fragment_source.len()
        );
    }

    fn load_texture(&mut self, slot: u32, image: Drawable) {
        log::info!(
            "engine[{}]: texture slot {slot} = {}x{}",
            self.title,
            image.width(),
            image.height()
        );
        self.textures.push((image.width(), image.height()));
    }

    fn set_canvas_dimensions(&mut self, width: u32, height: u32) {
        log::info!("engine[{}]: canvas {width}x{height}", self.title);
        self.canvas = Some((width, height));
    }

    fn init_game_data(&mut self) {
        log::info!("engine[{}]: game data ready", self.title);
    }

    fn init_render_data(&mut self) {
        self.initialized = true;
        log::info!(
            "engine[{}]: render data ready ({} texture(s))",
            self.title,
            self.textures.len()
        );
    }

    fn process_event(&mut self, event: &InputEvent) {
        self.events += 1;
        match event {
            InputEvent::Key(KeyEvent { state, code }) => {
                if state.is_pressed() {
                    self.keys_down.insert(code.clone());
                } else {
                    self.keys_down.remove(code);
                }
            }
            InputEvent::Pointer(p) => self.pointer = Some((p.x, p.y)),
            InputEvent::PointerMove(m) => self.pointer = Some((m.x, m.y)),
        }
        log::debug!("engine[{}]: {event}", self.title);
    }

    fn update(&mut self, delta_ms: f32) -> Result<()> {
        ensure!(self.initialized, "update before render data init");
        self.frames += 1;
        self.elapsed_ms += f64::from(delta_ms);
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if self.frames % REPORT_EVERY == 0 {
            let fps = self.frames as f64 * 1000.0 / self.elapsed_ms.max(1.0);
            log::info!(
                "engine[{}]: frame {} ({fps:.1} fps avg), canvas {:?}, {} event(s), keys {:?}, pointer {:?}",
                self.title,
                self.frames,
                self.canvas,
                self.events,
                self.keys_down,
                self.pointer
            );
        }
        Ok(())
    }
}
