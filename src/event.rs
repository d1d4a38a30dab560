//! Event system - input events and the header's `action` event

use crate::config::ActionType;

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Viewport resized (new width, new height)
    ///
    /// Only a notification: the header reads its width back from the host.
    Resize(u32, u32),
    /// Button press at pixel coordinates relative to the header
    Press(MouseButton, u32, u32), // button, x, y
    /// Escape key
    Escape,
}

/// Event handler trait for elements
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}

/// Fired when the action button is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub kind: ActionType,
}

/// Listener for [`ActionEvent`]s
pub type ActionListener = Box<dyn FnMut(&ActionEvent)>;

/// Pixel size of one terminal cell
#[cfg(feature = "tui")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

#[cfg(feature = "tui")]
impl CellSize {
    pub fn new(width: u32, height: u32) -> Self {
        CellSize { width, height }
    }

    fn to_pixels(self, column: u16, row: u16) -> (u32, u32) {
        (
            u32::from(column).saturating_mul(self.width),
            u32::from(row).saturating_mul(self.height),
        )
    }
}

#[cfg(feature = "tui")]
impl Event {
    /// Convert a terminal event, scaling cells to pixels
    ///
    /// Returns `None` for input the header does not handle.
    pub fn from_terminal(event: crossterm::event::Event, cell: CellSize) -> Option<Event> {
        use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, MouseEventKind};

        match event {
            CEvent::Key(KeyEvent {
                code: KeyCode::Esc,
                modifiers,
                ..
            }) if modifiers.is_empty() => Some(Event::Escape),
            CEvent::Mouse(me) => {
                let MouseEventKind::Down(btn) = me.kind else {
                    return None;
                };
                let button = match btn {
                    crossterm::event::MouseButton::Left => MouseButton::Left,
                    crossterm::event::MouseButton::Right => MouseButton::Right,
                    crossterm::event::MouseButton::Middle => MouseButton::Middle,
                };
                let (x, y) = cell.to_pixels(me.column, me.row);
                Some(Event::Press(button, x, y))
            }
            CEvent::Resize(cols, rows) => {
                let (width, height) = cell.to_pixels(cols, rows);
                Some(Event::Resize(width, height))
            }
            _ => None,
        }
    }
}
