//! Area capacity index and overflow resolution.
//!
//! Built once per [`crate::Tiler`] from the sorted area list and read-only
//! afterwards.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::layout::model::{DrawArea, Overflow, OverflowKeyword};

/// How many streams an area accepts before overflowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Capacity {
    /// Up to this many streams.
    Bounded(u32),
    /// Any number of streams; set when any grid rule has no upper bound.
    Unbounded,
}

impl Capacity {
    fn admits(self, occupied: usize) -> bool {
        match self {
            Capacity::Unbounded => true,
            Capacity::Bounded(max) => (occupied as u32) < max,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct AreaEntry {
    capacity: Capacity,
    overflow_target: Option<i32>,
}

/// Mapping from area priority to capacity and overflow target.
#[derive(Clone, Debug)]
pub(crate) struct AreaIndex {
    entries: BTreeMap<i32, AreaEntry>,
    default_priority: i32,
}

impl AreaIndex {
    /// Build the index from areas already sorted ascending by priority.
    pub(crate) fn build(areas: &[DrawArea]) -> Self {
        let mut entries = BTreeMap::new();
        for (idx, area) in areas.iter().enumerate() {
            let capacity = area
                .grid
                .iter()
                .try_fold(0u32, |max, rule| match rule.to_count {
                    None => Err(()),
                    Some(to) => Ok(max.max(to)),
                })
                .map_or(Capacity::Unbounded, Capacity::Bounded);
            let overflow_target = match area.overflow {
                Some(Overflow::Keyword(OverflowKeyword::Next)) => {
                    areas.get(idx + 1).map(|next| next.priority)
                }
                Some(Overflow::To(priority)) => Some(priority),
                Some(Overflow::Keyword(OverflowKeyword::None)) | None => None,
            };
            entries.insert(
                area.priority,
                AreaEntry {
                    capacity,
                    overflow_target,
                },
            );
        }
        let default_priority = areas.last().map_or(0, |area| area.priority);
        Self {
            entries,
            default_priority,
        }
    }

    /// Priority of the default (highest-priority) area.
    pub(crate) fn default_priority(&self) -> i32 {
        self.default_priority
    }

    pub(crate) fn capacity(&self, priority: i32) -> Option<Capacity> {
        self.entries.get(&priority).map(|entry| entry.capacity)
    }

    pub(crate) fn overflow_target(&self, priority: i32) -> Option<i32> {
        self.entries
            .get(&priority)
            .and_then(|entry| entry.overflow_target)
    }

    /// Resolve the area a stream lands in, or `None` when it must be
    /// dropped.
    ///
    /// Starts from the declared area when known (default otherwise) and
    /// walks the overflow chain until an area with spare capacity turns up.
    /// `occupancy` reads the running per-area count of the current fold
    /// state; overflow decisions are order-dependent. The visited set turns
    /// a cyclic chain of full areas into a deterministic drop without
    /// changing acyclic behavior.
    pub(crate) fn assign(
        &self,
        stream_id: &str,
        declared: Option<i32>,
        occupancy: impl Fn(i32) -> usize,
    ) -> Option<i32> {
        let mut current = match declared {
            Some(priority) if self.entries.contains_key(&priority) => priority,
            Some(priority) => {
                debug!(
                    stream = stream_id,
                    area = priority,
                    default = self.default_priority,
                    "declared area unknown, using default"
                );
                self.default_priority
            }
            None => self.default_priority,
        };
        let mut visited = HashSet::new();
        loop {
            if !visited.insert(current) {
                warn!(
                    stream = stream_id,
                    area = current,
                    "overflow chain loops among full areas, dropping stream"
                );
                return None;
            }
            let entry = self.entries.get(&current)?;
            if entry.capacity.admits(occupancy(current)) {
                return Some(current);
            }
            match entry.overflow_target {
                Some(target) if self.entries.contains_key(&target) => {
                    debug!(
                        stream = stream_id,
                        area = current,
                        target,
                        "area full, following overflow"
                    );
                    current = target;
                }
                _ => {
                    warn!(
                        stream = stream_id,
                        area = current,
                        "area full and overflow chain exhausted, dropping stream"
                    );
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/index.rs"]
mod tests;
