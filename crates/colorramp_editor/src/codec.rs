//! Packed-slot codec
//!
//! Translates between an in-memory [`Gradient`] and the bounded slot layout
//! a ramp shader samples directly. The codec never fails hard: a missing
//! slot skips that read or write, and a decode that cannot reach two keys
//! per channel reports [`DecodeOutcome::Skipped`] so the caller keeps its
//! previous value.

use colorramp_core::{
    slots, AlphaKeys, ColorKeys, Gradient, GradientAlphaKey, GradientColorKey, PropertyStore,
    Vec4, MAX_KEYS, MIN_KEYS,
};
use thiserror::Error;
use tracing::trace;

/// Why a decode left the caller's gradient untouched.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("reconstructed {present} color keys, need at least 2")]
    TooFewColorKeys { present: usize },
    #[error("reconstructed {present} alpha keys, need at least 2")]
    TooFewAlphaKeys { present: usize },
}

/// Result of [`decode`].
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeOutcome {
    /// Both key sequences were reconstructed; the gradient is ready to edit.
    Loaded(Gradient),
    /// Stored data could not produce a valid gradient; keep the previous
    /// value.
    Skipped(SkipReason),
}

impl DecodeOutcome {
    pub fn loaded(self) -> Option<Gradient> {
        match self {
            DecodeOutcome::Loaded(gradient) => Some(gradient),
            DecodeOutcome::Skipped(_) => None,
        }
    }
}

/// Reconstruct a gradient from the packed slots under `prop`.
///
/// Counts are clamped to [2, 8] before use; key slots absent from the store
/// are skipped. Read-only with respect to the store and deterministic given
/// its contents.
pub fn decode(store: &dyn PropertyStore, prop: &str) -> DecodeOutcome {
    let color_count = read_count(store, &slots::color_count(prop));
    let alpha_count = read_count(store, &slots::alpha_count(prop));

    let mut color_keys = ColorKeys::new();
    for i in 0..color_count {
        let name = slots::color_key(prop, i);
        if !store.has_property(&name) {
            trace!(slot = %name, "color slot missing, skipped");
            continue;
        }
        let color = store.get_color(&name);
        // The slot's alpha channel carries the key's time.
        color_keys.push(GradientColorKey::new(color, color.a));
    }

    let mut alpha_keys = AlphaKeys::new();
    for pair in 0..slots::alpha_pair_slots(alpha_count) {
        let name = slots::alpha_pair(prop, pair);
        if !store.has_property(&name) {
            trace!(slot = %name, "alpha slot missing, skipped");
            continue;
        }
        let data = store.get_vec4(&name);
        alpha_keys.push(GradientAlphaKey::new(data.x, data.y));
        if pair * slots::ALPHAS_PER_SLOT + 1 < alpha_count {
            alpha_keys.push(GradientAlphaKey::new(data.z, data.w));
        }
    }

    if color_keys.len() < MIN_KEYS {
        return DecodeOutcome::Skipped(SkipReason::TooFewColorKeys {
            present: color_keys.len(),
        });
    }
    if alpha_keys.len() < MIN_KEYS {
        return DecodeOutcome::Skipped(SkipReason::TooFewAlphaKeys {
            present: alpha_keys.len(),
        });
    }

    let mut gradient = Gradient::new();
    gradient.set_keys(color_keys, alpha_keys);
    DecodeOutcome::Loaded(gradient)
}

/// Write the gradient's keys into the packed slots under `prop`.
///
/// Count slots receive `min(len, 8)`. Every write is skipped when the store
/// does not expose that slot, so shader variants with fewer slots tolerate
/// larger gradients by simply dropping the tail.
pub fn encode(gradient: &Gradient, store: &mut dyn PropertyStore, prop: &str) {
    let color_keys = gradient.color_keys();
    let alpha_keys = gradient.alpha_keys();

    let count_slot = slots::color_count(prop);
    if store.has_property(&count_slot) {
        store.set_int(&count_slot, color_keys.len().min(MAX_KEYS) as i32);
    }
    let count_slot = slots::alpha_count(prop);
    if store.has_property(&count_slot) {
        store.set_int(&count_slot, alpha_keys.len().min(MAX_KEYS) as i32);
    }

    for i in 0..color_keys.len() {
        let name = slots::color_key(prop, i);
        if !store.has_property(&name) {
            trace!(slot = %name, "color slot missing, write skipped");
            continue;
        }
        // An index past the final key repeats that key.
        if let Some(key) = color_keys.get(i).or_else(|| color_keys.last()) {
            let mut packed = key.color;
            packed.a = key.time;
            store.set_color(&name, packed);
        }
    }

    for pair in 0..slots::alpha_pair_slots(alpha_keys.len()) {
        let name = slots::alpha_pair(prop, pair);
        if !store.has_property(&name) {
            trace!(slot = %name, "alpha slot missing, write skipped");
            continue;
        }
        let (x, y) = alpha_or_trailing(alpha_keys, pair * slots::ALPHAS_PER_SLOT);
        let (z, w) = alpha_or_trailing(alpha_keys, pair * slots::ALPHAS_PER_SLOT + 1);
        store.set_vec4(&name, Vec4::new(x, y, z, w));
    }
}

fn read_count(store: &dyn PropertyStore, slot: &str) -> usize {
    let count = if store.has_property(slot) {
        store.get_int(slot)
    } else {
        MIN_KEYS as i32
    };
    count.clamp(MIN_KEYS as i32, MAX_KEYS as i32) as usize
}

/// (alpha, time) for `index`, or the trailing key's alpha with time forced
/// to 1.0 when the index is past the end of an odd-length sequence.
fn alpha_or_trailing(keys: &[GradientAlphaKey], index: usize) -> (f32, f32) {
    match keys.get(index) {
        Some(key) => (key.alpha, key.time),
        None => match keys.last() {
            Some(last) => (last.alpha, 1.0),
            None => (0.0, 0.0),
        },
    }
}
