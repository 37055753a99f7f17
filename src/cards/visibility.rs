use std::collections::HashMap;

use log::trace;

use super::record::{Ordinal, Registry};
use crate::host::{ElementId, IntersectionEntry};

/// Single shared intersection observer over every container
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    threshold: f32,
    observed: HashMap<ElementId, Ordinal>,
}

impl VisibilityTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            observed: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn observe(&mut self, container: ElementId, ordinal: Ordinal) {
        self.observed.insert(container, ordinal);
    }

    pub fn observed(&self) -> usize {
        self.observed.len()
    }

    /// Whether a ratio counts as on screen
    pub fn is_visible(&self, ratio: f32) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Update the `visible` flag of each entry's record; unknown targets and
    /// empty slots are ignored
    pub fn handle(&self, registry: &mut Registry, entries: &[IntersectionEntry]) {
        for entry in entries {
            let Some(ordinal) = self.observed.get(&entry.target) else {
                continue;
            };
            if let Some(record) = registry.get_mut(*ordinal) {
                record.visible = self.is_visible(entry.ratio);
                trace!("scene {ordinal} visible={} (ratio {:.2})", record.visible, entry.ratio);
            }
        }
    }
}
