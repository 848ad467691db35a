#![forbid(unsafe_code)]

//! Input events the list engine reacts to.
//!
//! Hosts reading a terminal through crossterm convert with
//! [`Event::from_crossterm`]; tests and embedders build the values by hand.
//! Mouse coordinates are cell offsets from the top-left of the receiver.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// An input event routed to a list box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press.
    Key(KeyEvent),
    /// Pointer activity.
    Mouse(MouseEvent),
    /// The viewport changed size.
    Resize {
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },
    /// The viewport gained (`true`) or lost input focus.
    Focus(bool),
}

#[cfg(not(target_arch = "wasm32"))]
impl Event {
    /// Convert a crossterm event.
    ///
    /// Pastes and keys with no [`KeyCode`] counterpart map to `None`.
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        Some(match event {
            cte::Event::Key(key) => Self::Key(KeyEvent::try_from(key).ok()?),
            cte::Event::Mouse(mouse) => Self::Mouse(mouse.into()),
            cte::Event::Resize(width, height) => Self::Resize { width, height },
            cte::Event::FocusGained => Self::Focus(true),
            cte::Event::FocusLost => Self::Focus(false),
            cte::Event::Paste(_) => return None,
        })
    }
}

/// A key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key.
    pub code: KeyCode,
    /// Held modifiers.
    pub modifiers: Modifiers,
    /// Press, repeat or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// An unmodified key press.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Replace the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Keys arbor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Printable character.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab.
    BackTab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key `F(n)`.
    F(u8),
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Initial press; also used when the terminal cannot tell.
    #[default]
    Press,
    /// Auto-repeat while held.
    Repeat,
    /// Release.
    Release,
}

bitflags! {
    /// Modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        /// Super, Meta, Hyper or Command.
        const SUPER = 1 << 3;
    }
}

/// A pointer event at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Column from the left edge of the receiver.
    pub x: u16,
    /// Row from the top edge of the receiver.
    pub y: u16,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// An unmodified event at `(x, y)`.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The same event moved to another coordinate space.
    #[must_use]
    pub const fn at(mut self, x: u16, y: u16) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Whether this is a press of `button`.
    #[must_use]
    pub fn is_press_of(&self, button: MouseButton) -> bool {
        self.kind == MouseEventKind::Down(button)
    }
}

/// Pointer activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    /// Motion without a button, or horizontal wheel motion.
    Moved,
    ScrollUp,
    ScrollDown,
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<cte::KeyModifiers> for Modifiers {
    fn from(m: cte::KeyModifiers) -> Self {
        let pairs = [
            (cte::KeyModifiers::SHIFT, Self::SHIFT),
            (cte::KeyModifiers::ALT, Self::ALT),
            (cte::KeyModifiers::CONTROL, Self::CTRL),
            (cte::KeyModifiers::SUPER, Self::SUPER),
            (cte::KeyModifiers::HYPER, Self::SUPER),
            (cte::KeyModifiers::META, Self::SUPER),
        ];
        pairs
            .into_iter()
            .filter(|(ct, _)| m.contains(*ct))
            .fold(Self::NONE, |acc, (_, ours)| acc | ours)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TryFrom<cte::KeyCode> for KeyCode {
    type Error = cte::KeyCode;

    /// Keys arbor has no variant for are handed back.
    fn try_from(code: cte::KeyCode) -> Result<Self, Self::Error> {
        use cte::KeyCode as K;
        Ok(match code {
            K::Char(c) => Self::Char(c),
            K::F(n) => Self::F(n),
            K::Enter => Self::Enter,
            K::Esc => Self::Escape,
            K::Backspace => Self::Backspace,
            K::Tab => Self::Tab,
            K::BackTab => Self::BackTab,
            K::Delete => Self::Delete,
            K::Home => Self::Home,
            K::End => Self::End,
            K::PageUp => Self::PageUp,
            K::PageDown => Self::PageDown,
            K::Up => Self::Up,
            K::Down => Self::Down,
            K::Left => Self::Left,
            K::Right => Self::Right,
            other => return Err(other),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TryFrom<cte::KeyEvent> for KeyEvent {
    type Error = cte::KeyCode;

    fn try_from(key: cte::KeyEvent) -> Result<Self, Self::Error> {
        let kind = match key.kind {
            cte::KeyEventKind::Press => KeyEventKind::Press,
            cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
            cte::KeyEventKind::Release => KeyEventKind::Release,
        };
        Ok(KeyEvent::new(KeyCode::try_from(key.code)?)
            .with_modifiers(key.modifiers.into())
            .with_kind(kind))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<cte::MouseButton> for MouseButton {
    fn from(button: cte::MouseButton) -> Self {
        match button {
            cte::MouseButton::Left => Self::Left,
            cte::MouseButton::Right => Self::Right,
            cte::MouseButton::Middle => Self::Middle,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<cte::MouseEvent> for MouseEvent {
    fn from(mouse: cte::MouseEvent) -> Self {
        use cte::MouseEventKind as M;
        let kind = match mouse.kind {
            M::Down(b) => MouseEventKind::Down(b.into()),
            M::Up(b) => MouseEventKind::Up(b.into()),
            M::Drag(b) => MouseEventKind::Drag(b.into()),
            M::ScrollUp => MouseEventKind::ScrollUp,
            M::ScrollDown => MouseEventKind::ScrollDown,
            M::Moved | M::ScrollLeft | M::ScrollRight => MouseEventKind::Moved,
        };
        MouseEvent::new(kind, mouse.column, mouse.row).with_modifiers(mouse.modifiers.into())
    }
}
