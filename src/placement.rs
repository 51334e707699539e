//! Placement formulas for the shell components.
//!
//! These are pure functions over the display workarea and the window's
//! natural (requested) geometry; all host access stays in [`crate::shell`].

use std::str::FromStr;

use crate::geometry::Rect;
use crate::host::Edge;

/// Inset from the workarea edges used by notification and runner placement.
pub const EDGE_INSET: i32 = 10;

/// Pick the anchor edge for a panel from its requested geometry: wider than
/// tall means a horizontal bar pinned to the top, otherwise a vertical bar
/// pinned to the left. Evaluated once at map time; the panel keeps this
/// edge for its lifetime even if it resizes later.
pub fn panel_edge(natural: Rect) -> Edge {
    if natural.width > natural.height {
        Edge::Top
    } else {
        Edge::Left
    }
}

/// Panel geometry: pinned to `edge`, centered along the cross axis, with
/// the along-edge length clamped so the panel never overflows the workarea.
/// Returns the geometry together with the panel's thickness along the
/// anchored axis (the size the reserved area must take).
pub fn panel(workarea: Rect, natural: Rect, edge: Edge) -> (Rect, i32) {
    match edge {
        Edge::Top => {
            let width = natural.width.min(workarea.width);
            let rect = Rect::new(workarea.center_x(width), workarea.y, width, natural.height);
            (rect, natural.height)
        }
        Edge::Left => {
            let height = natural.height.min(workarea.height);
            let rect = Rect::new(workarea.x, workarea.center_y(height), natural.width, height);
            (rect, natural.width)
        }
    }
}

/// Runner geometry: natural size, horizontally centered. `show_on_top`
/// pins it just below the top workarea edge, otherwise it is vertically
/// centered.
pub fn runner(workarea: Rect, natural: Rect, show_on_top: bool) -> Rect {
    let y = if show_on_top {
        workarea.y + EDGE_INSET
    } else {
        workarea.center_y(natural.height)
    };
    Rect::new(workarea.center_x(natural.width), y, natural.width, natural.height)
}

/// The eight notification anchor positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl FromStr for Placement {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top-center" => Ok(Self::TopCenter),
            "top-right" => Ok(Self::TopRight),
            "center-left" => Ok(Self::CenterLeft),
            "center-right" => Ok(Self::CenterRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-center" => Ok(Self::BottomCenter),
            "bottom-right" => Ok(Self::BottomRight),
            _ => Err(()),
        }
    }
}

/// Notification geometry: natural size at the configured corner/edge, a
/// constant [`EDGE_INSET`] away from each relevant workarea edge; `-center`
/// variants are exactly centered along the cross axis.
pub fn notification(workarea: Rect, natural: Rect, placement: Placement) -> Rect {
    let left = workarea.x + EDGE_INSET;
    let right = workarea.right() - natural.width - EDGE_INSET;
    let top = workarea.y + EDGE_INSET;
    let bottom = workarea.bottom() - natural.height - EDGE_INSET;
    let center_x = workarea.center_x(natural.width);
    let center_y = workarea.center_y(natural.height);

    let (x, y) = match placement {
        Placement::TopLeft => (left, top),
        Placement::TopCenter => (center_x, top),
        Placement::TopRight => (right, top),
        Placement::CenterLeft => (left, center_y),
        Placement::CenterRight => (right, center_y),
        Placement::BottomLeft => (left, bottom),
        Placement::BottomCenter => (center_x, bottom),
        Placement::BottomRight => (right, bottom),
    };
    Rect::new(x, y, natural.width, natural.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WA: Rect = Rect { x: 100, y: 50, width: 1800, height: 1000 };

    #[test]
    fn test_panel_edge_from_requested_geometry() {
        assert_eq!(panel_edge(Rect::new(0, 0, 1920, 32)), Edge::Top);
        assert_eq!(panel_edge(Rect::new(0, 0, 48, 900)), Edge::Left);
        // Square requests anchor left
        assert_eq!(panel_edge(Rect::new(0, 0, 64, 64)), Edge::Left);
    }

    #[test]
    fn test_top_panel_centered_and_pinned() {
        let (rect, thickness) = panel(WA, Rect::new(0, 0, 1600, 32), Edge::Top);
        assert_eq!(rect, Rect::new(100 + 100, 50, 1600, 32));
        assert_eq!(thickness, 32);
    }

    #[test]
    fn test_top_panel_width_clamped_to_workarea() {
        let (rect, thickness) = panel(WA, Rect::new(0, 0, 2400, 32), Edge::Top);
        assert_eq!(rect, Rect::new(100, 50, 1800, 32));
        assert_eq!(thickness, 32);
    }

    #[test]
    fn test_left_panel_centered_and_pinned() {
        let (rect, thickness) = panel(WA, Rect::new(0, 0, 48, 800), Edge::Left);
        assert_eq!(rect, Rect::new(100, 50 + 100, 48, 800));
        assert_eq!(thickness, 48);
    }

    #[test]
    fn test_left_panel_height_clamped_to_workarea() {
        let (rect, _) = panel(WA, Rect::new(0, 0, 48, 1200), Edge::Left);
        assert_eq!(rect, Rect::new(100, 50, 48, 1000));
    }

    #[test]
    fn test_runner_show_on_top() {
        let rect = runner(WA, Rect::new(0, 0, 600, 400), true);
        assert_eq!(rect.x, WA.center_x(600));
        // y ignores the window height entirely
        assert_eq!(rect.y, 50 + EDGE_INSET);
    }

    #[test]
    fn test_runner_centered() {
        let rect = runner(WA, Rect::new(0, 0, 600, 400), false);
        assert_eq!(rect, Rect::new(700, 50 + 300, 600, 400));
    }

    #[test]
    fn test_placement_parsing() {
        assert_eq!("top-right".parse(), Ok(Placement::TopRight));
        assert_eq!("bottom-center".parse(), Ok(Placement::BottomCenter));
        assert_eq!("".parse::<Placement>(), Err(()));
        assert_eq!("Top-Right".parse::<Placement>(), Err(()));
        assert_eq!("middle".parse::<Placement>(), Err(()));
    }

    #[test]
    fn test_notification_corners() {
        let natural = Rect::new(0, 0, 300, 100);
        let cases = [
            (Placement::TopLeft, (110, 60)),
            (Placement::TopCenter, (100 + 750, 60)),
            (Placement::TopRight, (1900 - 300 - 10, 60)),
            (Placement::CenterLeft, (110, 50 + 450)),
            (Placement::CenterRight, (1900 - 300 - 10, 50 + 450)),
            (Placement::BottomLeft, (110, 1050 - 100 - 10)),
            (Placement::BottomCenter, (100 + 750, 1050 - 100 - 10)),
            (Placement::BottomRight, (1900 - 300 - 10, 1050 - 100 - 10)),
        ];
        for (placement, (x, y)) in cases {
            let rect = notification(WA, natural, placement);
            assert_eq!((rect.x, rect.y), (x, y), "{placement:?}");
            assert_eq!((rect.width, rect.height), (300, 100));
        }
    }
}
