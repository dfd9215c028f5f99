use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::catalog::product::ProductKind;

/// Identifies one requested render of one product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub kind: ProductKind,
    pub generation: u64,
}

/// Monotonic per-product request counters. The newest ticket for a product wins; every older one
/// is stale from the moment a newer one is issued.
#[derive(Debug, Default)]
pub struct RenderTickets {
    counters: [AtomicU64; 3],
}

impl RenderTickets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, kind: ProductKind) -> Ticket {
        let generation = self.counters[kind.index()].fetch_add(1, Ordering::AcqRel) + 1;
        Ticket { kind, generation }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest(ticket.kind) == ticket.generation
    }

    pub fn latest(&self, kind: ProductKind) -> u64 {
        self.counters[kind.index()].load(Ordering::Acquire)
    }
}

/// Most recent accepted output per product.
#[derive(Debug, Default)]
pub struct LatestFrames {
    slots: Mutex<BTreeMap<ProductKind, (u64, Vec<u8>)>>,
}

impl LatestFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` if `ticket` is still the newest request for its product. Returns whether the
    /// output was accepted.
    pub fn offer(&self, tickets: &RenderTickets, ticket: Ticket, bytes: Vec<u8>) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if !tickets.is_current(&ticket) {
            tracing::debug!(
                kind = %ticket.kind,
                generation = ticket.generation,
                "discarding superseded render"
            );
            return false;
        }
        if let Some((stored, _)) = slots.get(&ticket.kind)
            && *stored >= ticket.generation
        {
            return false;
        }
        slots.insert(ticket.kind, (ticket.generation, bytes));
        true
    }

    pub fn get(&self, kind: ProductKind) -> Option<Vec<u8>> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(&kind).map(|(_, bytes)| bytes.clone())
    }

    pub fn generation(&self, kind: ProductKind) -> Option<u64> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(&kind).map(|(g, _)| *g)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/supersede.rs"]
mod tests;
