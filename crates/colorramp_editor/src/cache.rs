//! Resolved-gradient cache
//!
//! Inspectors redraw many times per second, so the last resolved gradient
//! per (target, property) is kept and only re-decoded when missing or
//! stale. Staleness compares the stored color count against the cached
//! color-key count, nothing more: alpha-count changes and in-place value
//! edits from other tools go unnoticed until the color count moves.

use colorramp_core::{slots, Gradient, PropertyStore, MAX_KEYS, MIN_KEYS};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::codec::{self, DecodeOutcome};

/// Opaque identity for one edit target.
///
/// Hosts derive it from whatever identity they have: instance ids, asset
/// ids, slotmap keys.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// Cache of resolved gradients keyed by (target, property name).
///
/// Owned by whoever composes the editor; entries live until overwritten,
/// invalidated, or [`clear`](GradientCache::clear)ed when the editing
/// session ends.
#[derive(Debug, Default)]
pub struct GradientCache {
    entries: FxHashMap<(TargetId, String), Gradient>,
}

impl GradientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gradient for `(target, prop)`, re-decoding from the store
    /// when the entry is missing or its color-key count disagrees with the
    /// stored count.
    ///
    /// A store whose slots cannot produce a valid gradient caches the
    /// sentinel; the sentinel's zero key count never matches the stored
    /// count, so the next resolve decodes again.
    pub fn resolve(
        &mut self,
        store: &dyn PropertyStore,
        target: TargetId,
        prop: &str,
    ) -> &Gradient {
        let key = (target, prop.to_string());
        let stale = match self.entries.get(&key) {
            None => true,
            Some(cached) => stored_color_count(store, prop) != cached.color_keys().len(),
        };
        if stale {
            let fresh = match codec::decode(store, prop) {
                DecodeOutcome::Loaded(gradient) => gradient,
                DecodeOutcome::Skipped(reason) => {
                    debug!(id = target.0, prop, %reason, "decode skipped, caching sentinel");
                    Gradient::new()
                }
            };
            debug!(
                id = target.0,
                prop,
                colors = fresh.color_keys().len(),
                alphas = fresh.alpha_keys().len(),
                "reloaded gradient"
            );
            self.entries.insert(key.clone(), fresh);
        }
        self.entries.entry(key).or_default()
    }

    /// Adopt `gradient` as the current value for `(target, prop)`.
    pub fn insert(&mut self, target: TargetId, prop: &str, gradient: Gradient) {
        self.entries.insert((target, prop.to_string()), gradient);
    }

    pub fn get(&self, target: TargetId, prop: &str) -> Option<&Gradient> {
        self.entries.get(&(target, prop.to_string()))
    }

    /// Drop one entry; the next resolve re-decodes.
    pub fn invalidate(&mut self, target: TargetId, prop: &str) {
        self.entries.remove(&(target, prop.to_string()));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stored color count as the staleness check sees it. The read is
/// unguarded: an absent slot reads as 0 and clamps to 2.
fn stored_color_count(store: &dyn PropertyStore, prop: &str) -> usize {
    store
        .get_int(&slots::color_count(prop))
        .clamp(MIN_KEYS as i32, MAX_KEYS as i32) as usize
}
