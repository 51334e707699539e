//! The surface the host compositor exposes to the shell.
//!
//! The compositor owns windows and displays; the shell only reacts to its
//! signals and asks for mutations through this trait. Keeping the whole
//! surface behind `Host` means every handler in [`crate::shell`] can be
//! exercised against [`FakeHost`] without a running compositor.

use crate::geometry::Rect;

/// Opaque handle to one client window. The host owns the window's lifetime;
/// a stored id is only valid until the matching vanish signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

/// Opaque handle to one output the host renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayId(pub u32);

/// Host stacking tiers, lowest first. Ordinary client windows live between
/// `Background` and `Top`; `Unmanaged` stacks above fullscreen windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Top,
    Unmanaged,
}

/// Role tag the host uses to exempt a window from window-switching and
/// show-desktop handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRole {
    ShellComponent,
}

/// Workarea edge a panel can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Left,
}

/// Everything the shell needs from the compositor.
///
/// Queries are cheap lookups into host state; mutations are applied
/// synchronously on the host's event thread (the same thread every shell
/// handler runs on).
pub trait Host {
    /// All displays, in the host's enumeration order. First-fit
    /// classification walks this order.
    fn displays(&self) -> Vec<DisplayId>;

    /// The display that currently holds the pointer/keyboard focus.
    fn active_display(&self) -> Option<DisplayId>;

    /// Full rectangle of a display.
    fn display_rect(&self, display: DisplayId) -> Rect;

    /// The display rectangle minus all reserved areas.
    fn workarea(&self, display: DisplayId) -> Rect;

    /// Current (for unmapped windows: requested) geometry of a window.
    fn window_geometry(&self, window: WindowId) -> Rect;

    fn window_app_id(&self, window: WindowId) -> String;

    fn window_title(&self, window: WindowId) -> String;

    /// Display the window currently sits on.
    fn window_display(&self, window: WindowId) -> Option<DisplayId>;

    /// Whether an external subsystem attached the named marker to a window.
    fn has_marker(&self, window: WindowId, marker: &str) -> bool;

    fn set_geometry(&mut self, window: WindowId, rect: Rect);

    fn set_role(&mut self, window: WindowId, role: WindowRole);

    fn set_layer(&mut self, window: WindowId, layer: Layer);

    fn set_sticky(&mut self, window: WindowId, sticky: bool);

    fn move_to_display(&mut self, window: WindowId, display: DisplayId);

    fn bring_to_front(&mut self, window: WindowId);

    /// Reserve a strip of `size` pixels along `edge` of the display's
    /// workarea. Re-reserving an edge replaces the previous size.
    fn set_reserved_area(&mut self, display: DisplayId, edge: Edge, size: i32);

    fn remove_reserved_area(&mut self, display: DisplayId, edge: Edge);

    /// Ask the host to re-run its workarea computation and relayout
    /// ordinary windows after reserved areas changed.
    fn reflow_reserved_areas(&mut self, display: DisplayId);

    /// Fire-and-forget launch of an external command.
    fn launch(&mut self, command: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory host for behavioral tests.

    use std::collections::{HashMap, HashSet};

    use super::*;

    #[derive(Debug, Default, Clone)]
    pub struct FakeWindow {
        pub app_id: String,
        pub title: String,
        pub geometry: Rect,
        pub role: Option<WindowRole>,
        pub layer: Option<Layer>,
        pub sticky: bool,
        pub display: Option<DisplayId>,
        pub markers: HashSet<String>,
    }

    /// Implements [`Host`] over plain maps. Mutations are recorded so tests
    /// can assert both final state and call counts.
    #[derive(Debug, Default)]
    pub struct FakeHost {
        pub displays: Vec<(DisplayId, Rect)>,
        pub active: Option<DisplayId>,
        pub windows: HashMap<WindowId, FakeWindow>,
        pub reserved: HashMap<(DisplayId, Edge), i32>,
        pub raised: Vec<WindowId>,
        pub launched: Vec<String>,
        pub reflow_requests: Vec<DisplayId>,
        pub geometry_sets: Vec<(WindowId, Rect)>,
    }

    impl FakeHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_display(&mut self, id: u32, rect: Rect) -> DisplayId {
            let display = DisplayId(id);
            self.displays.push((display, rect));
            if self.active.is_none() {
                self.active = Some(display);
            }
            display
        }

        pub fn add_window(&mut self, id: u32, app_id: &str, title: &str, geometry: Rect) -> WindowId {
            let window = WindowId(id);
            self.windows.insert(
                window,
                FakeWindow {
                    app_id: app_id.to_string(),
                    title: title.to_string(),
                    geometry,
                    ..FakeWindow::default()
                },
            );
            window
        }

        pub fn window(&self, window: WindowId) -> &FakeWindow {
            &self.windows[&window]
        }

        pub fn attach_marker(&mut self, window: WindowId, marker: &str) {
            if let Some(w) = self.windows.get_mut(&window) {
                w.markers.insert(marker.to_string());
            }
        }

        pub fn remove_window(&mut self, window: WindowId) {
            self.windows.remove(&window);
        }
    }

    impl Host for FakeHost {
        fn displays(&self) -> Vec<DisplayId> {
            self.displays.iter().map(|(id, _)| *id).collect()
        }

        fn active_display(&self) -> Option<DisplayId> {
            self.active
        }

        fn display_rect(&self, display: DisplayId) -> Rect {
            self.displays
                .iter()
                .find(|(id, _)| *id == display)
                .map(|(_, rect)| *rect)
                .unwrap_or_default()
        }

        fn workarea(&self, display: DisplayId) -> Rect {
            let mut area = self.display_rect(display);
            if let Some(&top) = self.reserved.get(&(display, Edge::Top)) {
                area.y += top;
                area.height -= top;
            }
            if let Some(&left) = self.reserved.get(&(display, Edge::Left)) {
                area.x += left;
                area.width -= left;
            }
            area
        }

        fn window_geometry(&self, window: WindowId) -> Rect {
            self.windows.get(&window).map(|w| w.geometry).unwrap_or_default()
        }

        fn window_app_id(&self, window: WindowId) -> String {
            self.windows.get(&window).map(|w| w.app_id.clone()).unwrap_or_default()
        }

        fn window_title(&self, window: WindowId) -> String {
            self.windows.get(&window).map(|w| w.title.clone()).unwrap_or_default()
        }

        fn window_display(&self, window: WindowId) -> Option<DisplayId> {
            self.windows.get(&window).and_then(|w| w.display)
        }

        fn has_marker(&self, window: WindowId, marker: &str) -> bool {
            self.windows
                .get(&window)
                .is_some_and(|w| w.markers.contains(marker))
        }

        fn set_geometry(&mut self, window: WindowId, rect: Rect) {
            self.geometry_sets.push((window, rect));
            if let Some(w) = self.windows.get_mut(&window) {
                w.geometry = rect;
            }
        }

        fn set_role(&mut self, window: WindowId, role: WindowRole) {
            if let Some(w) = self.windows.get_mut(&window) {
                w.role = Some(role);
            }
        }

        fn set_layer(&mut self, window: WindowId, layer: Layer) {
            if let Some(w) = self.windows.get_mut(&window) {
                w.layer = Some(layer);
            }
        }

        fn set_sticky(&mut self, window: WindowId, sticky: bool) {
            if let Some(w) = self.windows.get_mut(&window) {
                w.sticky = sticky;
            }
        }

        fn move_to_display(&mut self, window: WindowId, display: DisplayId) {
            if let Some(w) = self.windows.get_mut(&window) {
                w.display = Some(display);
            }
        }

        fn bring_to_front(&mut self, window: WindowId) {
            self.raised.push(window);
        }

        fn set_reserved_area(&mut self, display: DisplayId, edge: Edge, size: i32) {
            self.reserved.insert((display, edge), size);
        }

        fn remove_reserved_area(&mut self, display: DisplayId, edge: Edge) {
            self.reserved.remove(&(display, edge));
        }

        fn reflow_reserved_areas(&mut self, display: DisplayId) {
            self.reflow_requests.push(display);
        }

        fn launch(&mut self, command: &str) {
            self.launched.push(command.to_string());
        }
    }
}
