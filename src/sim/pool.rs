//! Fixed-capacity pool of reusable slots
//!
//! Used for enemy projectiles and explosion effects. Storage never grows;
//! a full pool simply refuses new entries and the caller drops the spawn.

use serde::{Deserialize, Serialize};

/// One pool entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot<T> {
    pub active: bool,
    pub payload: T,
}

/// Contiguous fixed-capacity storage with index handles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPool<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Default> SlotPool<T> {
    /// Create a pool of `capacity` inactive slots
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                active: false,
                payload: T::default(),
            })
            .collect();
        Self { slots }
    }
}

impl<T> SlotPool<T> {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of active slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.active)
    }

    /// Claim the first inactive slot, or `None` if every slot is in use
    ///
    /// The claimed slot still holds its previous payload; the caller must
    /// overwrite every field.
    pub fn acquire(&mut self) -> Option<usize> {
        let index = self.slots.iter().position(|s| !s.active)?;
        self.slots[index].active = true;
        Some(index)
    }

    /// Claim a slot and store `payload` in it; returns the index on success
    pub fn spawn(&mut self, payload: T) -> Option<usize> {
        let index = self.acquire()?;
        self.slots[index].payload = payload;
        Some(index)
    }

    /// Mark a slot inactive; out-of-range indices are ignored
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.active = false;
        }
    }

    /// Release every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).filter(|s| s.active).map(|s| &s.payload)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots
            .get_mut(index)
            .filter(|s| s.active)
            .map(|s| &mut s.payload)
    }

    /// Active entries with their slot index, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &s.payload))
    }

    /// Mutable access to active entries, in slot order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &mut s.payload))
    }

    /// Release every active slot for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            if !keep(&mut slot.payload) {
                slot.active = false;
            }
        }
    }
}
