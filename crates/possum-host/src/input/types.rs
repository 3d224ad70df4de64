use std::fmt;

/// Pressed/released flag carried by key and pointer button events.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

/// Keyboard event.
///
/// `code` is the symbolic physical key name in DOM `KeyboardEvent.code` form
/// (`"KeyA"`, `"ArrowLeft"`, `"Space"`).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub state: ButtonState,
    pub code: String,
}

/// Pointer button event in host pixel units.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PointerEvent {
    pub state: ButtonState,
    pub x: i32,
    pub y: i32,
}

/// Pointer move event in host pixel units.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PointerMoveEvent {
    pub x: i32,
    pub y: i32,
}

/// Host input event forwarded to the engine.
///
/// Produced by the host adapter, consumed by the engine. The router never
/// interprets these.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
    PointerMove(PointerMoveEvent),
}

impl InputEvent {
    pub fn key(pressed: bool, code: impl Into<String>) -> Self {
        InputEvent::Key(KeyEvent {
            state: pressed.into(),
            code: code.into(),
        })
    }

    pub fn pointer(pressed: bool, x: i32, y: i32) -> Self {
        InputEvent::Pointer(PointerEvent {
            state: pressed.into(),
            x,
            y,
        })
    }

    pub fn pointer_move(x: i32, y: i32) -> Self {
        InputEvent::PointerMove(PointerMoveEvent { x, y })
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Key(k) => write!(f, "key {:?} {}", k.state, k.code),
            InputEvent::Pointer(p) => write!(f, "pointer {:?} ({}, {})", p.state, p.x, p.y),
            InputEvent::PointerMove(m) => write!(f, "pointer move ({}, {})", m.x, m.y),
        }
    }
}
