//! Colorramp Core Types
//!
//! Foundational value types for the color-ramp material inspector:
//!
//! - **Gradient model**: bounded color/alpha stop sequences with a
//!   not-yet-loaded sentinel state
//! - **Packed slot layout**: the property names under which a ramp shader
//!   samples the gradient without texture lookups
//! - **Property-bag contract**: the storage seam every host material
//!   implements, plus an in-memory implementation for headless hosts and
//!   tests
//!
//! # Example
//!
//! ```rust
//! use colorramp_core::{Color, Gradient, MemoryPropertyBag, PropertyStore};
//!
//! let ramp = Gradient::two_point(Color::BLACK, Color::WHITE);
//! assert!(ramp.is_loaded());
//!
//! // Midpoint of a black-to-white ramp is mid gray.
//! let mid = ramp.evaluate(0.5);
//! assert!((mid.r - 0.5).abs() < 1e-6);
//!
//! // A bag declaring the full 8-key layout under the "Ramp" base name.
//! let bag = MemoryPropertyBag::with_ramp_layout("Ramp", 8, 4);
//! assert!(bag.has_property("RampColor7"));
//! assert!(bag.has_property("RampAlpha6"));
//! ```

pub mod color;
pub mod geometry;
pub mod gradient;
pub mod slots;
pub mod store;

pub use color::Color;
pub use geometry::{Rect, Vec4};
pub use gradient::{
    AlphaKeys, ColorKeys, Gradient, GradientAlphaKey, GradientColorKey, MAX_KEYS, MIN_KEYS,
};
pub use store::{MemoryPropertyBag, PropertyStore, PropertyValue};
