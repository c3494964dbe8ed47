//! Packed slot naming
//!
//! The ramp layout addresses material properties by name: two count slots,
//! one color slot per color key, and one vector slot per *pair* of alpha
//! keys. All name construction lives here so external tools writing the
//! same layout stay bit-exact with the inspector.
//!
//! For a base property name `P` and counts clamped to [2, 8]:
//!
//! - `P + "ColorCount"`, `P + "AlphaCount"`: int key counts
//! - `P + "Color" + i`: color slot i; RGB is the key color, the alpha
//!   channel carries the key's time
//! - `P + "Alpha" + 2j`: vector slot for pair j, packed as
//!   (alpha0, time0, alpha1, time1)

/// Alpha keys packed into one vector slot.
pub const ALPHAS_PER_SLOT: usize = 2;

/// Name of the color key count slot.
pub fn color_count(base: &str) -> String {
    format!("{base}ColorCount")
}

/// Name of the alpha key count slot.
pub fn alpha_count(base: &str) -> String {
    format!("{base}AlphaCount")
}

/// Name of the color slot holding key `index`.
pub fn color_key(base: &str, index: usize) -> String {
    format!("{base}Color{index}")
}

/// Name of the vector slot holding alpha pair `pair` (keys `2*pair` and
/// `2*pair + 1`). Slot names step by two: `Alpha0`, `Alpha2`, `Alpha4`...
pub fn alpha_pair(base: &str, pair: usize) -> String {
    format!("{base}Alpha{}", pair * ALPHAS_PER_SLOT)
}

/// Number of vector slots needed to cover `alpha_count` keys.
pub fn alpha_pair_slots(alpha_count: usize) -> usize {
    alpha_count.div_ceil(ALPHAS_PER_SLOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_names() {
        assert_eq!(color_count("Ramp"), "RampColorCount");
        assert_eq!(alpha_count("Ramp"), "RampAlphaCount");
        assert_eq!(color_key("Ramp", 0), "RampColor0");
        assert_eq!(color_key("Ramp", 7), "RampColor7");
        assert_eq!(alpha_pair("Ramp", 0), "RampAlpha0");
        assert_eq!(alpha_pair("Ramp", 1), "RampAlpha2");
        assert_eq!(alpha_pair("Ramp", 3), "RampAlpha6");
    }

    #[test]
    fn test_alpha_pair_slots_rounds_up() {
        assert_eq!(alpha_pair_slots(2), 1);
        assert_eq!(alpha_pair_slots(3), 2);
        assert_eq!(alpha_pair_slots(4), 2);
        assert_eq!(alpha_pair_slots(8), 4);
    }
}
