//! Lifecycle hooks and focus arbitration.
//!
//! [`Shell`] is the single owner of all shell bookkeeping. The host drives
//! it by forwarding its window signals (added, mapped, vanished, pre-focus,
//! geometry-changed) on its one event thread; every handler runs to
//! completion before the next signal is delivered, so no locking is needed.

use tracing::{debug, info, warn};

use crate::classify::{self, Role};
use crate::config::{
    ConfigStore, DEFAULT_SESSION_COMMAND, NotifyConfig, PanelConfig, RunnerConfig, ShellOptions,
    store_path,
};
use crate::host::{DisplayId, Edge, Host, Layer, WindowId, WindowRole};
use crate::placement;
use crate::reserved::ReservedAreaLedger;
use crate::state::{ClearedSlot, ShellState};

/// Markers independent subsystems attach to a window while show-desktop is
/// active. Any one of them suppresses refocus-on-deny.
pub const SHOW_DESKTOP_MARKERS: [&str; 3] = [
    "wm-actions-showdesktop",
    "dbusqt-showdesktop",
    "wf-workspaces-showdesktop",
];

/// Answer to a pre-focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDecision {
    Allow,
    Deny,
}

pub struct Shell {
    options: ShellOptions,
    state: ShellState,
    ledger: ReservedAreaLedger,
    panel_cfg: ConfigStore<PanelConfig>,
    runner_cfg: ConfigStore<RunnerConfig>,
    notify_cfg: ConfigStore<NotifyConfig>,
    /// Set while a notification placement is mutating geometry, so the
    /// geometry-changed signal that mutation triggers does not re-enter
    /// the placement path.
    repositioning: bool,
}

impl Shell {
    pub fn new(options: ShellOptions) -> Self {
        let panel_cfg = ConfigStore::open(store_path(&options.panel_config, "panel.toml"));
        let runner_cfg = ConfigStore::open(store_path(&options.runner_config, "runner.toml"));
        let notify_cfg = ConfigStore::open(store_path(&options.notify_config, "notifications.toml"));
        Self {
            options,
            state: ShellState::new(),
            ledger: ReservedAreaLedger::new(),
            panel_cfg,
            runner_cfg,
            notify_cfg,
            repositioning: false,
        }
    }

    /// Startup hook: launch the session command if the host asked for it.
    pub fn init(&mut self, host: &mut impl Host) {
        if self.options.start_session {
            let command = if self.options.session_command.is_empty() {
                DEFAULT_SESSION_COMMAND
            } else {
                self.options.session_command.as_str()
            };
            info!(command = command, "starting session");
            host.launch(command);
        }
    }

    /// A window was created but not yet mapped. Notification clients get
    /// their role tag immediately so the host never treats them as
    /// ordinary windows, not even before the first map.
    pub fn on_window_added(&mut self, host: &mut impl Host, window: WindowId) {
        let app_id = host.window_app_id(window);
        let title = host.window_title(window);
        if classify::is_notification(&app_id, &title) {
            host.set_role(window, WindowRole::ShellComponent);
        }
    }

    /// A window became visible. Returns whether the shell took ownership
    /// of its placement (the host's "was positioned" flag).
    pub fn on_window_mapped(&mut self, host: &mut impl Host, window: WindowId) -> bool {
        let app_id = host.window_app_id(window);
        let title = host.window_title(window);
        match classify::classify(&app_id, &title) {
            Some(Role::Background) => self.map_background(host, window),
            Some(Role::Panel) => self.map_panel(host, window),
            Some(Role::Runner) => self.map_runner(host, window),
            Some(Role::Notification) => self.map_notification(host, window),
            None => false,
        }
    }

    /// The host reports a window gone. Clear every slot that held it; a
    /// vanished panel also releases its reserved area and reflows the rest
    /// of its display.
    pub fn on_window_vanished(&mut self, host: &mut impl Host, window: WindowId) {
        for cleared in self.state.clear_window(window) {
            debug!(window = window.0, slot = ?cleared, "cleared slot for vanished window");
            if let ClearedSlot::Panel(display, edge) = cleared {
                if self.ledger.release(display, edge) {
                    host.remove_reserved_area(display, edge);
                    host.reflow_reserved_areas(display);
                    self.reflow_panels(host, display);
                }
            }
        }
    }

    /// Pre-focus arbitration: notifications never take focus. Unless a
    /// show-desktop marker is asserted, the previously focused window is
    /// raised back to the front in their place.
    pub fn on_pre_focus(&mut self, host: &mut impl Host, window: WindowId) -> FocusDecision {
        let app_id = host.window_app_id(window);
        let title = host.window_title(window);

        if !classify::is_notification(&app_id, &title) {
            // Tracked unconditionally; other policies may still deny focus,
            // that is the host's business.
            if let Some(display) = host.window_display(window).or_else(|| host.active_display()) {
                self.state.slots_mut(display).last_focused = Some(window);
            }
            return FocusDecision::Allow;
        }

        let display = self
            .state
            .notification_display(window)
            .or_else(|| host.window_display(window))
            .or_else(|| host.active_display());
        let last_focused = display
            .and_then(|d| self.state.slots(d))
            .and_then(|slots| slots.last_focused);

        if let Some(last) = last_focused {
            let show_desktop = SHOW_DESKTOP_MARKERS
                .iter()
                .copied()
                .find(|marker| host.has_marker(last, marker));
            if let Some(marker) = show_desktop {
                debug!(window = last.0, marker = marker, "show-desktop active, not re-raising");
            } else {
                host.bring_to_front(last);
            }
        }
        FocusDecision::Deny
    }

    /// A window's geometry changed. An active notification is re-anchored
    /// unless the change was caused by our own in-flight reposition.
    pub fn on_geometry_changed(&mut self, host: &mut impl Host, window: WindowId) {
        if self.repositioning {
            return;
        }
        if let Some(display) = self.state.notification_display(window) {
            self.place_notification(host, display, window);
        }
    }

    /// A display disappeared. Drop its bookkeeping; reserved areas are
    /// removed from the host but nothing is reflowed on a dead display.
    pub fn on_display_removed(&mut self, host: &mut impl Host, display: DisplayId) {
        for edge in self.ledger.release_display(display) {
            host.remove_reserved_area(display, edge);
        }
        if self.state.remove_display(display).is_some() {
            // Bound first: inside the macro `display` resolves to
            // `tracing::field::display`, not the local.
            let display_id = display.0;
            info!(display = display_id, "dropped shell state for removed display");
        }
    }

    /// Panel store changed: re-read it and re-anchor any live panels.
    pub fn reload_panel_config(&mut self, host: &mut impl Host) {
        self.panel_cfg.set_path(store_path(&self.options.panel_config, "panel.toml"));
        for display in host.displays() {
            let has_panel = self
                .state
                .slots(display)
                .is_some_and(|slots| slots.top_panel.is_some() || slots.left_panel.is_some());
            if has_panel {
                self.reflow_panels(host, display);
                host.reflow_reserved_areas(display);
            }
        }
    }

    /// Runner store changed: re-read it and reposition an active runner
    /// from scratch.
    pub fn reload_runner_config(&mut self, host: &mut impl Host) {
        self.runner_cfg.set_path(store_path(&self.options.runner_config, "runner.toml"));
        for display in host.displays() {
            if let Some(runner) = self.state.slots(display).and_then(|slots| slots.runner) {
                self.place_runner(host, display, runner);
            }
        }
    }

    /// Notification store changed: refresh the snapshot. An active
    /// notification keeps its position until its next external resize.
    pub fn reload_notify_config(&mut self, _host: &mut impl Host) {
        self.notify_cfg.set_path(store_path(&self.options.notify_config, "notifications.toml"));
    }

    fn map_background(&mut self, host: &mut impl Host, window: WindowId) -> bool {
        // First-fit over the host's enumeration order; every display gets
        // exactly one background.
        let Some(display) = host
            .displays()
            .into_iter()
            .find(|d| self.state.slots(*d).and_then(|s| s.background).is_none())
        else {
            debug!(window = window.0, "all displays already have a background");
            return false;
        };

        self.state.slots_mut(display).background = Some(window);
        host.move_to_display(window, display);
        host.set_geometry(window, host.display_rect(display));
        host.set_layer(window, Layer::Background);
        host.set_sticky(window, true);
        host.set_role(window, WindowRole::ShellComponent);
        let display_id = display.0;
        info!(window = window.0, display = display_id, "mapped background");
        true
    }

    fn map_panel(&mut self, host: &mut impl Host, window: WindowId) -> bool {
        // The anchor edge is fixed here, from the requested geometry, for
        // the lifetime of the window.
        let edge = placement::panel_edge(host.window_geometry(window));
        let Some(display) = host
            .displays()
            .into_iter()
            .find(|d| self.state.slots(*d).and_then(|s| s.panel(edge)).is_none())
        else {
            debug!(window = window.0, edge = ?edge, "no display with a free panel slot");
            return false;
        };

        self.state.slots_mut(display).set_panel(edge, Some(window));
        host.move_to_display(window, display);
        // Above ordinary windows but not above fullscreen ones
        host.set_layer(window, Layer::Top);
        host.set_sticky(window, true);
        host.set_role(window, WindowRole::ShellComponent);

        self.place_panel(host, display, edge, window);
        host.reflow_reserved_areas(display);
        self.reflow_panels(host, display);
        let display_id = display.0;
        info!(window = window.0, display = display_id, edge = ?edge, "mapped panel");
        true
    }

    fn map_runner(&mut self, host: &mut impl Host, window: WindowId) -> bool {
        let Some(display) = host.active_display() else {
            warn!(window = window.0, "no active display for runner");
            return false;
        };

        // A remap can land on a different active display; drop the slot
        // from the previous show so only one display tracks the runner.
        self.state.clear_runner(window);
        self.state.slots_mut(display).runner = Some(window);
        host.move_to_display(window, display);
        // Above fullscreen windows
        host.set_layer(window, Layer::Unmanaged);
        host.set_sticky(window, true);
        host.set_role(window, WindowRole::ShellComponent);

        self.place_runner(host, display, window);
        let display_id = display.0;
        info!(window = window.0, display = display_id, "mapped runner");
        true
    }

    fn map_notification(&mut self, host: &mut impl Host, window: WindowId) -> bool {
        let Some(display) = host.active_display() else {
            warn!(window = window.0, "no active display for notification");
            return false;
        };

        self.state.clear_notification(window);
        self.state.slots_mut(display).notification = Some(window);
        self.place_notification(host, display, window);
        let display_id = display.0;
        info!(window = window.0, display = display_id, "mapped notification");
        true
    }

    /// Anchor one panel and bring the ledger and host reservation in line
    /// with its thickness.
    fn place_panel(&mut self, host: &mut impl Host, display: DisplayId, edge: Edge, window: WindowId) {
        // The host workarea already excludes this panel's own strip; add it
        // back so the panel pins to the display edge instead of drifting
        // below its own reservation on every reflow.
        let mut workarea = host.workarea(display);
        if let Some(area) = self.ledger.get(display, edge) {
            match edge {
                Edge::Top => {
                    workarea.y -= area.reserved_size;
                    workarea.height += area.reserved_size;
                }
                Edge::Left => {
                    workarea.x -= area.reserved_size;
                    workarea.width += area.reserved_size;
                }
            }
        }

        let natural = host.window_geometry(window);
        let (rect, thickness) = placement::panel(workarea, natural, edge);

        self.ledger.ensure(display, edge);
        self.ledger.update(display, edge, thickness);
        host.set_reserved_area(display, edge, thickness);
        host.set_geometry(window, rect);
    }

    /// Recompute every live panel of a display against the current
    /// workarea. Runs once per layout change; placement itself never
    /// triggers another reflow.
    fn reflow_panels(&mut self, host: &mut impl Host, display: DisplayId) {
        for edge in [Edge::Top, Edge::Left] {
            if let Some(panel) = self.state.slots(display).and_then(|slots| slots.panel(edge)) {
                self.place_panel(host, display, edge, panel);
            }
        }
    }

    fn place_runner(&mut self, host: &mut impl Host, display: DisplayId, window: WindowId) {
        // Pick up on-disk edits made since the last show
        self.runner_cfg.reload();
        let workarea = host.workarea(display);
        let natural = host.window_geometry(window);
        let show_on_top = self.runner_cfg.value().dialog.show_on_top;
        host.set_geometry(window, placement::runner(workarea, natural, show_on_top));
    }

    fn place_notification(&mut self, host: &mut impl Host, display: DisplayId, window: WindowId) {
        // Pick up on-disk edits made since the last show
        self.notify_cfg.reload();

        // Guard against the geometry-changed signal our own mutation fires.
        self.repositioning = true;

        host.move_to_display(window, display);
        // Above ordinary windows, below the fullscreen-override tier
        host.set_layer(window, Layer::Top);
        host.set_sticky(window, true);
        host.set_role(window, WindowRole::ShellComponent);

        let workarea = host.workarea(display);
        let natural = host.window_geometry(window);
        let rect = placement::notification(workarea, natural, self.notify_cfg.value().placement());
        host.set_geometry(window, rect);

        self.repositioning = false;
    }
}
