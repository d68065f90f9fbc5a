//! Owned registry of chart slots, one live chart per drawing surface
//! Replaces per-chart global handles with state the host owns explicitly

use std::collections::HashMap;

use chart_interop_shared::ChartKind;
use uuid::Uuid;

use crate::backend::Releasable;

/// A surface binding and the chart instance currently drawn into it
pub struct ChartSlot<H> {
    pub surface_id: String,
    pub kind: ChartKind,
    pub instance_id: Uuid,
    handle: H,
}

/// Maps surface identifiers to their single live chart
pub struct SlotRegistry<H: Releasable> {
    slots: HashMap<String, ChartSlot<H>>,
}

impl<H: Releasable> Default for SlotRegistry<H> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<H: Releasable> SlotRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a freshly created chart to a surface and return its instance id.
    /// A chart still bound to the surface is released first.
    pub fn insert(&mut self, surface_id: &str, kind: ChartKind, handle: H) -> Uuid {
        self.release(surface_id);

        let instance_id = Uuid::new_v4();
        self.slots.insert(
            surface_id.to_string(),
            ChartSlot {
                surface_id: surface_id.to_string(),
                kind,
                instance_id,
                handle,
            },
        );
        instance_id
    }

    pub fn get(&self, surface_id: &str) -> Option<&ChartSlot<H>> {
        self.slots.get(surface_id)
    }

    /// Release and forget the chart bound to a surface
    pub fn release(&mut self, surface_id: &str) -> bool {
        match self.slots.remove(surface_id) {
            Some(slot) => {
                release_slot(slot);
                true
            }
            None => false,
        }
    }

    /// Release every chart, returning how many were bound
    pub fn release_all(&mut self) -> usize {
        let count = self.slots.len();
        for (_, slot) in self.slots.drain() {
            release_slot(slot);
        }
        count
    }

    pub fn contains(&self, surface_id: &str) -> bool {
        self.slots.contains_key(surface_id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<H: Releasable> Drop for SlotRegistry<H> {
    fn drop(&mut self) {
        let released = self.release_all();
        if released > 0 {
            log::debug!("Released {released} chart(s) on teardown");
        }
    }
}

fn release_slot<H: Releasable>(mut slot: ChartSlot<H>) {
    if slot.handle.is_releasable() {
        slot.handle.release();
        log::debug!(
            "Released {} chart {} on '{}'",
            slot.kind,
            slot.instance_id,
            slot.surface_id
        );
    } else {
        log::warn!(
            "Chart bound to '{}' is not a releasable instance; dropping it unreleased, the canvas may reject the next chart",
            slot.surface_id
        );
    }
}
