//! Ledger of the workarea strips panels reserve.
//!
//! One entry per (display, edge). The ledger is plain bookkeeping; the
//! lifecycle layer mirrors every change to the host so the host's workarea
//! computation stays in sync. Invariant after any event sequence: an entry
//! exists for (display, edge) iff a live panel window holds that slot.

use std::collections::HashMap;

use crate::host::{DisplayId, Edge};

/// A strip reserved along one workarea edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedArea {
    pub edge: Edge,
    /// Size subtracted from the workarea.
    pub reserved_size: i32,
    /// Size the panel actually occupies; tracks `reserved_size` here.
    pub real_size: i32,
}

#[derive(Debug, Default)]
pub struct ReservedAreaLedger {
    areas: HashMap<(DisplayId, Edge), ReservedArea>,
}

impl ReservedAreaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent creation: returns the existing entry if present,
    /// otherwise inserts a zero-sized one.
    pub fn ensure(&mut self, display: DisplayId, edge: Edge) -> &mut ReservedArea {
        self.areas
            .entry((display, edge))
            .or_insert(ReservedArea { edge, reserved_size: 0, real_size: 0 })
    }

    /// Set both sizes to the panel's thickness along the anchored axis.
    /// Called on every (re)placement of the owning panel, reflows included.
    pub fn update(&mut self, display: DisplayId, edge: Edge, size: i32) {
        let area = self.ensure(display, edge);
        area.reserved_size = size;
        area.real_size = size;
    }

    /// Drop the entry. Idempotent with respect to already-absent entries;
    /// returns whether one existed so the caller knows to reflow.
    pub fn release(&mut self, display: DisplayId, edge: Edge) -> bool {
        self.areas.remove(&(display, edge)).is_some()
    }

    pub fn get(&self, display: DisplayId, edge: Edge) -> Option<&ReservedArea> {
        self.areas.get(&(display, edge))
    }

    /// Drop every entry of a display; used on display teardown.
    pub fn release_display(&mut self, display: DisplayId) -> Vec<Edge> {
        let edges: Vec<Edge> = self
            .areas
            .keys()
            .filter(|(d, _)| *d == display)
            .map(|(_, e)| *e)
            .collect();
        for edge in &edges {
            self.areas.remove(&(display, *edge));
        }
        edges
    }
}
