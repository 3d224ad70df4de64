use ::winit::dpi::PhysicalPosition;
use ::winit::event::{ElementState, MouseButton, WindowEvent};
use ::winit::keyboard::PhysicalKey;

use crate::input::InputEvent;

/// Pointer position tracked across winit events.
///
/// winit 0.30 reports the cursor only on `CursorMoved`; button events carry
/// no position, so the last known one is attached to them.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerTracker {
    position: Option<(i32, i32)>,
}

impl PointerTracker {
    pub fn position(&self) -> Option<(i32, i32)> {
        self.position
    }

    /// Primary button change at the last known cursor position.
    ///
    /// Dropped while the position is unknown (before the first move, or
    /// after the cursor left the window).
    fn button_event(&self, pressed: bool) -> Option<InputEvent> {
        match self.position {
            Some((x, y)) => Some(InputEvent::pointer(pressed, x, y)),
            None => {
                log::trace!("input: button change without a cursor position dropped");
                None
            }
        }
    }
}

/// Translates a winit `WindowEvent` into a host `InputEvent`.
///
/// Pointer coordinates are logical pixels relative to the window's top-left
/// corner. Only the primary mouse button maps to pointer events, and only
/// once the cursor position is known. Returns
/// `None` for events the router does not carry.
pub fn translate_window_event(
    scale_factor: f64,
    tracker: &mut PointerTracker,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_i32(scale_factor, *position);
            tracker.position = Some((x, y));
            Some(InputEvent::pointer_move(x, y))
        }

        WindowEvent::CursorLeft { .. } => {
            tracker.position = None;
            None
        }

        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => tracker.button_event(*state == ElementState::Pressed),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::key(
            event.state == ElementState::Pressed,
            key_code_name(event.physical_key),
        )),

        _ => None,
    }
}

fn to_logical_i32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (i32, i32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x.round() as i32, logical.y.round() as i32)
}

/// winit's `KeyCode` variants follow the W3C `code` naming, so the debug name
/// is already the symbolic code the engine expects.
fn key_code_name(pk: PhysicalKey) -> String {
    match pk {
        PhysicalKey::Code(code) => format!("{code:?}"),
        PhysicalKey::Unidentified(_) => "Unidentified".to_string(),
    }
}
