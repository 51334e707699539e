//! Signature-based window classification.
//!
//! The shell clients announce themselves through a fixed (app id, title)
//! pair; matching is exact and case-sensitive, no wildcards. Anything that
//! does not match is left to the host's default placement policy.

/// Functional role a matched window takes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Fills the display behind every ordinary window.
    Background,
    /// Anchored strip along the top or left workarea edge.
    Panel,
    /// Centered launcher dialog.
    Runner,
    /// Transient popup that must never take focus.
    Notification,
}

struct Signature {
    app_id: &'static str,
    title: &'static str,
    role: Role,
}

const SIGNATURES: [Signature; 4] = [
    Signature { app_id: "vasak-desktop", title: "Vasak Desktop", role: Role::Background },
    Signature { app_id: "navale", title: "Navale", role: Role::Panel },
    Signature { app_id: "hydriam", title: "Hydriam", role: Role::Runner },
    Signature { app_id: "lxqt-notificationd", title: "lxqt-notificationd", role: Role::Notification },
];

/// Role for an (app id, title) pair, or `None` for ordinary windows.
pub fn classify(app_id: &str, title: &str) -> Option<Role> {
    SIGNATURES
        .iter()
        .find(|sig| sig.app_id == app_id && sig.title == title)
        .map(|sig| sig.role)
}

/// The notification signature is also checked on every pre-focus request,
/// independently of the map-time classification.
pub fn is_notification(app_id: &str, title: &str) -> bool {
    classify(app_id, title) == Some(Role::Notification)
}
