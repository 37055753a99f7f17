use std::collections::HashMap;

use log::debug;

use super::record::{Ordinal, Registry};
use crate::host::{ElementId, ResizeEntry};

/// Shared resize observer keyed by container
#[derive(Debug, Clone, Default)]
pub struct ResizeReactor {
    observed: HashMap<ElementId, Ordinal>,
}

impl ResizeReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, container: ElementId, ordinal: Ordinal) {
        self.observed.insert(container, ordinal);
    }

    pub fn observed(&self) -> usize {
        self.observed.len()
    }

    /// Match camera and renderer to each reported size. Reports equal to the
    /// renderer's current size change nothing. Returns how many records changed.
    pub fn handle(&self, registry: &mut Registry, entries: &[ResizeEntry]) -> usize {
        let mut changed = 0;
        for entry in entries {
            let Some(ordinal) = self.observed.get(&entry.target) else {
                continue;
            };
            let Some(record) = registry.get_mut(*ordinal) else {
                continue;
            };
            if record.renderer.size() == entry.size {
                continue;
            }
            record.camera.set_viewport(entry.size);
            record.renderer.set_size(entry.size);
            debug!("scene {ordinal} resized to {}x{}", entry.size.width, entry.size.height);
            changed += 1;
        }
        changed
    }
}
