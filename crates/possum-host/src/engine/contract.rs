use anyhow::Result;

use crate::assets::Drawable;
use crate::input::InputEvent;

use super::error::EngineInitError;

/// Operations the host performs on the engine.
///
/// Semantics of each call belong to the engine. The host guarantees ordering:
/// shaders, then textures, then `set_canvas_dimensions`, then
/// `init_game_data` / `init_render_data`, then the per-frame sequence
/// `process_events` (batched mode) -> `update` -> `render`.
pub trait Engine {
    /// Compiles and links the shader program.
    fn load_shader(&mut self, vertex_source: &str, fragment_source: &str);

    /// Uploads a decoded image into texture slot `slot`.
    fn load_texture(&mut self, slot: u32, image: Drawable);

    /// Informs the engine of the surface size in host pixels.
    fn set_canvas_dimensions(&mut self, width: u32, height: u32);

    /// Builds initial game state. Called once, after uploads and sizing.
    fn init_game_data(&mut self);

    /// Builds render buffers. Called once, after uploads and sizing.
    fn init_render_data(&mut self);

    /// Consumes a single input event (immediate delivery).
    fn process_event(&mut self, event: &InputEvent);

    /// Consumes every event gathered during one frame, in arrival order.
    ///
    /// Called once per frame in batched mode, with an empty slice when
    /// nothing arrived.
    fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Advances the simulation by `delta_ms` milliseconds.
    fn update(&mut self, delta_ms: f32) -> Result<()>;

    /// Draws the current state.
    fn render(&mut self) -> Result<()>;
}

/// Constructs an engine bound to a surface host.
///
/// Implemented for every `FnOnce(&H) -> Result<E, EngineInitError>` so plain
/// closures can be handed to startup.
pub trait EngineFactory<H: ?Sized> {
    type Engine: Engine;

    fn construct(self, host: &H) -> std::result::Result<Self::Engine, EngineInitError>;
}

impl<H, E, F> EngineFactory<H> for F
where
    H: ?Sized,
    E: Engine,
    F: FnOnce(&H) -> std::result::Result<E, EngineInitError>,
{
    type Engine = E;

    fn construct(self, host: &H) -> std::result::Result<E, EngineInitError> {
        self(host)
    }
}
