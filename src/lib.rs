#![forbid(unsafe_code)]

//! Shell-integration layer for the Vasak desktop suite.
//!
//! The host compositor forwards its window lifecycle signals to a
//! [`Shell`]; the shell classifies the suite's client windows (desktop
//! background, panel, runner, notification popup), computes their
//! geometry against the display's usable area, keeps panels' reserved
//! workarea strips in sync, and keeps notification popups from stealing
//! focus. The compositor itself stays behind the [`Host`] trait.

pub mod classify;
pub mod config;
pub mod geometry;
pub mod host;
pub mod placement;
pub mod reserved;
pub mod shell;
pub mod state;

pub use classify::{Role, classify, is_notification};
pub use config::{DEFAULT_SESSION_COMMAND, ShellOptions, resolve_path};
pub use geometry::Rect;
pub use host::{DisplayId, Edge, Host, Layer, WindowId, WindowRole};
pub use placement::Placement;
pub use shell::{FocusDecision, SHOW_DESKTOP_MARKERS, Shell};
