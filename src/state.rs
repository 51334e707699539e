//! Per-display record of which window holds each shell slot.
//!
//! All shell bookkeeping lives here, keyed by display id, so there are no
//! process-wide statics and a display can be torn down in one place. Every
//! stored handle must be cleared when the host reports the window gone;
//! [`ShellState::clear_window`] is the vanish-time scan that guarantees it.

use std::collections::HashMap;

use crate::host::{DisplayId, Edge, WindowId};

/// The slots one display can hold. A window occupies at most one slot
/// across all displays.
#[derive(Debug, Default, Clone)]
pub struct DisplaySlots {
    pub background: Option<WindowId>,
    pub top_panel: Option<WindowId>,
    pub left_panel: Option<WindowId>,
    pub runner: Option<WindowId>,
    pub notification: Option<WindowId>,
    /// Most recent non-notification window granted focus on this display.
    pub last_focused: Option<WindowId>,
}

impl DisplaySlots {
    pub fn panel(&self, edge: Edge) -> Option<WindowId> {
        match edge {
            Edge::Top => self.top_panel,
            Edge::Left => self.left_panel,
        }
    }

    pub fn set_panel(&mut self, edge: Edge, window: Option<WindowId>) {
        match edge {
            Edge::Top => self.top_panel = window,
            Edge::Left => self.left_panel = window,
        }
    }
}

/// A slot a vanished window was cleared from, so the caller can run the
/// matching teardown (panels release their reserved area).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearedSlot {
    Background(DisplayId),
    Panel(DisplayId, Edge),
    Runner(DisplayId),
    Notification(DisplayId),
    LastFocused(DisplayId),
}

#[derive(Debug, Default)]
pub struct ShellState {
    displays: HashMap<DisplayId, DisplaySlots>,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self, display: DisplayId) -> Option<&DisplaySlots> {
        self.displays.get(&display)
    }

    pub fn slots_mut(&mut self, display: DisplayId) -> &mut DisplaySlots {
        self.displays.entry(display).or_default()
    }

    /// Display whose notification slot holds `window`.
    pub fn notification_display(&self, window: WindowId) -> Option<DisplayId> {
        self.displays
            .iter()
            .find(|(_, slots)| slots.notification == Some(window))
            .map(|(display, _)| *display)
    }

    /// Drop `window` from any runner slot it still holds. Needed when a
    /// runner remaps while a different display is active; the runner stays
    /// the same window, only the display changes.
    pub fn clear_runner(&mut self, window: WindowId) {
        for slots in self.displays.values_mut() {
            if slots.runner == Some(window) {
                slots.runner = None;
            }
        }
    }

    /// Drop `window` from any notification slot it still holds.
    pub fn clear_notification(&mut self, window: WindowId) {
        for slots in self.displays.values_mut() {
            if slots.notification == Some(window) {
                slots.notification = None;
            }
        }
    }

    /// Clear every slot holding `window` and report which ones were hit.
    pub fn clear_window(&mut self, window: WindowId) -> Vec<ClearedSlot> {
        let mut cleared = Vec::new();
        for (&display, slots) in &mut self.displays {
            if slots.background == Some(window) {
                slots.background = None;
                cleared.push(ClearedSlot::Background(display));
            }
            for edge in [Edge::Top, Edge::Left] {
                if slots.panel(edge) == Some(window) {
                    slots.set_panel(edge, None);
                    cleared.push(ClearedSlot::Panel(display, edge));
                }
            }
            if slots.runner == Some(window) {
                slots.runner = None;
                cleared.push(ClearedSlot::Runner(display));
            }
            if slots.notification == Some(window) {
                slots.notification = None;
                cleared.push(ClearedSlot::Notification(display));
            }
            if slots.last_focused == Some(window) {
                slots.last_focused = None;
                cleared.push(ClearedSlot::LastFocused(display));
            }
        }
        cleared
    }

    /// Drop all bookkeeping for a removed display.
    pub fn remove_display(&mut self, display: DisplayId) -> Option<DisplaySlots> {
        self.displays.remove(&display)
    }
}
