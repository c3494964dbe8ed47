//! Material property-bag contract and an in-memory implementation
//!
//! Host materials expose named scalar and vector slots. The inspector only
//! ever talks to that storage through [`PropertyStore`], so any host (or a
//! test) can stand in. Reads of absent slots return the type's default
//! value; callers that must tolerate shader variants lacking a slot guard
//! with [`PropertyStore::has_property`] first.

use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::geometry::Vec4;
use crate::slots;

/// Storage medium with named scalar/vector slots.
pub trait PropertyStore {
    fn has_property(&self, name: &str) -> bool;

    /// Integer slot; absent slots read as 0.
    fn get_int(&self, name: &str) -> i32;
    fn set_int(&mut self, name: &str, value: i32);

    /// Color slot; absent slots read as black.
    fn get_color(&self, name: &str) -> Color;
    fn set_color(&mut self, name: &str, value: Color);

    /// Four-component slot; absent slots read as zero.
    fn get_vec4(&self, name: &str) -> Vec4;
    fn set_vec4(&mut self, name: &str, value: Vec4);
}

/// One typed slot value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    Int(i32),
    Color(Color),
    Vec4(Vec4),
}

/// `FxHashMap`-backed [`PropertyStore`].
///
/// A slot exists once declared or written; shader variants that lack a slot
/// are modeled by never declaring it (or removing it).
#[derive(Clone, Debug, Default)]
pub struct MemoryPropertyBag {
    slots: FxHashMap<String, PropertyValue>,
}

impl MemoryPropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the ramp slots a shader variant exposes under `base`:
    /// both count slots, `color_slots` color slots, and `alpha_pair_slots`
    /// vector slots, all zero-initialized.
    pub fn with_ramp_layout(base: &str, color_slots: usize, alpha_pair_slots: usize) -> Self {
        let mut bag = Self::new();
        bag.declare(&slots::color_count(base), PropertyValue::Int(0));
        bag.declare(&slots::alpha_count(base), PropertyValue::Int(0));
        for i in 0..color_slots {
            bag.declare(&slots::color_key(base, i), PropertyValue::Color(Color::BLACK));
        }
        for pair in 0..alpha_pair_slots {
            bag.declare(&slots::alpha_pair(base, pair), PropertyValue::Vec4(Vec4::ZERO));
        }
        bag
    }

    pub fn declare(&mut self, name: &str, value: PropertyValue) {
        self.slots.insert(name.to_string(), value);
    }

    /// Drop a slot, modeling a shader variant without it.
    pub fn remove(&mut self, name: &str) {
        self.slots.remove(name);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl PropertyStore for MemoryPropertyBag {
    fn has_property(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    fn get_int(&self, name: &str) -> i32 {
        match self.slots.get(name) {
            Some(PropertyValue::Int(value)) => *value,
            _ => 0,
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.slots.insert(name.to_string(), PropertyValue::Int(value));
    }

    fn get_color(&self, name: &str) -> Color {
        match self.slots.get(name) {
            Some(PropertyValue::Color(value)) => *value,
            _ => Color::BLACK,
        }
    }

    fn set_color(&mut self, name: &str, value: Color) {
        self.slots.insert(name.to_string(), PropertyValue::Color(value));
    }

    fn get_vec4(&self, name: &str) -> Vec4 {
        match self.slots.get(name) {
            Some(PropertyValue::Vec4(value)) => *value,
            _ => Vec4::ZERO,
        }
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.slots.insert(name.to_string(), PropertyValue::Vec4(value));
    }
}
