//! Gradient value model
//!
//! A gradient is two ordered stop sequences, color keys and alpha keys, each
//! stop tagged with a normalized time in [0, 1]. The packed slot layout
//! bounds both sequences at [`MAX_KEYS`] entries, and a gradient only counts
//! as loaded once both hold at least [`MIN_KEYS`] entries. A
//! default-constructed gradient (both sequences empty) is the transient
//! not-yet-loaded sentinel.

use smallvec::SmallVec;

use crate::color::Color;

/// Minimum keys per channel for a loaded gradient.
pub const MIN_KEYS: usize = 2;

/// Maximum keys per channel the packed slot layout can hold.
pub const MAX_KEYS: usize = 8;

/// One color stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientColorKey {
    /// Color at this stop. Alpha is not used for blending; the packed layout
    /// reuses the channel for the stop's time.
    pub color: Color,
    /// Position along the gradient (0.0 to 1.0)
    pub time: f32,
}

impl GradientColorKey {
    pub fn new(color: Color, time: f32) -> Self {
        Self {
            color,
            time: time.clamp(0.0, 1.0),
        }
    }
}

/// One alpha stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientAlphaKey {
    /// Opacity at this stop (0.0 to 1.0)
    pub alpha: f32,
    /// Position along the gradient (0.0 to 1.0)
    pub time: f32,
}

impl GradientAlphaKey {
    pub fn new(alpha: f32, time: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            time: time.clamp(0.0, 1.0),
        }
    }
}

/// Color stop sequence; inline capacity matches the packed cap so loaded
/// gradients never heap-allocate.
pub type ColorKeys = SmallVec<[GradientColorKey; MAX_KEYS]>;

/// Alpha stop sequence
pub type AlphaKeys = SmallVec<[GradientAlphaKey; MAX_KEYS]>;

/// An editable color ramp: ordered color stops plus ordered alpha stops
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gradient {
    color_keys: ColorKeys,
    alpha_keys: AlphaKeys,
}

impl Gradient {
    /// The not-yet-loaded sentinel (no keys on either channel).
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimal valid gradient: two color stops at t=0 and t=1, fully opaque.
    pub fn two_point(from: Color, to: Color) -> Self {
        let mut gradient = Self::default();
        gradient.set_keys(
            SmallVec::from_slice(&[
                GradientColorKey::new(from, 0.0),
                GradientColorKey::new(to, 1.0),
            ]),
            SmallVec::from_slice(&[
                GradientAlphaKey::new(1.0, 0.0),
                GradientAlphaKey::new(1.0, 1.0),
            ]),
        );
        gradient
    }

    pub fn color_keys(&self) -> &[GradientColorKey] {
        &self.color_keys
    }

    pub fn alpha_keys(&self) -> &[GradientAlphaKey] {
        &self.alpha_keys
    }

    /// Both channels hold at least [`MIN_KEYS`] stops.
    pub fn is_loaded(&self) -> bool {
        self.color_keys.len() >= MIN_KEYS && self.alpha_keys.len() >= MIN_KEYS
    }

    /// Replace both stop sequences at once. Sequences are kept sorted by
    /// time; equal times keep their incoming order. There is no partial
    /// update: callers either commit both channels or leave the gradient
    /// untouched.
    pub fn set_keys(&mut self, mut color_keys: ColorKeys, mut alpha_keys: AlphaKeys) {
        color_keys.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        alpha_keys.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        self.color_keys = color_keys;
        self.alpha_keys = alpha_keys;
    }

    /// Sample the ramp at a normalized position.
    ///
    /// RGB comes from the bracketing color stops, alpha from the bracketing
    /// alpha stops; positions outside the outermost stops clamp to them. On
    /// the sentinel this returns opaque black.
    pub fn evaluate(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let rgb = sample_color(&self.color_keys, t);
        let alpha = sample_alpha(&self.alpha_keys, t);
        Color {
            a: alpha,
            ..rgb
        }
    }
}

fn sample_color(keys: &[GradientColorKey], t: f32) -> Color {
    let Some(first) = keys.first() else {
        return Color::BLACK;
    };
    if t <= first.time {
        return first.color;
    }
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.time {
            let span = b.time - a.time;
            if span <= f32::EPSILON {
                return b.color;
            }
            return Color::lerp(&a.color, &b.color, (t - a.time) / span);
        }
    }
    keys[keys.len() - 1].color
}

fn sample_alpha(keys: &[GradientAlphaKey], t: f32) -> f32 {
    let Some(first) = keys.first() else {
        return 1.0;
    };
    if t <= first.time {
        return first.alpha;
    }
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.time {
            let span = b.time - a.time;
            if span <= f32::EPSILON {
                return b.alpha;
            }
            return a.alpha + (b.alpha - a.alpha) * ((t - a.time) / span);
        }
    }
    keys[keys.len() - 1].alpha
}
