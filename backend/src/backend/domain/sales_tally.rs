//! In-memory per-day sales tally.
//!
//! A hand-counted units tally for one (date, business) pair, kept separate
//! from the weighed entries. Keys are dropped the moment a count reaches
//! zero, so absent and zero are interchangeable for every consumer and the
//! map never accumulates dead keys.

use shared::SalesData;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTally {
    counts: SalesData,
}

impl SalesTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally from a stored map, pruning any zero counts.
    pub fn from_map(map: SalesData) -> Self {
        Self {
            counts: map.into_iter().filter(|(_, count)| *count > 0).collect(),
        }
    }

    pub fn increment(&mut self, flavor_id: &str) {
        *self.counts.entry(flavor_id.to_string()).or_insert(0) += 1;
    }

    /// Decrement, floored at zero. Reaching zero removes the key.
    pub fn decrement(&mut self, flavor_id: &str) {
        if let Some(count) = self.counts.get_mut(flavor_id) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(flavor_id);
            }
        }
    }

    /// Drop the flavor from the tally entirely.
    pub fn reset(&mut self, flavor_id: &str) {
        self.counts.remove(flavor_id);
    }

    pub fn count(&self, flavor_id: &str) -> u32 {
        self.counts.get(flavor_id).copied().unwrap_or(0)
    }

    /// Total units, always recomputed from the map.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn as_map(&self) -> &SalesData {
        &self.counts
    }

    pub fn into_map(self) -> SalesData {
        self.counts
    }
}
