//! Inspector round trip
//!
//! One [`ColorRampEditor::edit`] call resolves the primary target's
//! gradient, hands it to the host's gradient-field control, and on change
//! broadcasts the edited gradient to every selected target: undo snapshots
//! first, then the primary's store, then each remaining target in order.
//! The same gradient goes to every target; multi-editing never interpolates
//! per target.

use colorramp_core::{Gradient, PropertyStore, Rect};
use tracing::debug;

use crate::cache::{GradientCache, TargetId};
use crate::codec;

/// Undo description recorded for every ramp edit.
pub const UNDO_DESCRIPTION: &str = "Change Color Ramp";

/// Host-rendered gradient editing control.
pub trait GradientField {
    /// Draw the control for one frame and report the (possibly edited)
    /// gradient.
    fn render(
        &mut self,
        bounds: Rect,
        label: &str,
        current: &Gradient,
        show_alpha: bool,
    ) -> GradientFieldResponse;
}

/// What the control reported back for one frame.
#[derive(Clone, Debug)]
pub struct GradientFieldResponse {
    pub gradient: Gradient,
    pub changed: bool,
}

impl GradientFieldResponse {
    pub fn unchanged(current: &Gradient) -> Self {
        Self {
            gradient: current.clone(),
            changed: false,
        }
    }

    pub fn edited(gradient: Gradient) -> Self {
        Self {
            gradient,
            changed: true,
        }
    }
}

/// Host undo/transaction hook, called once per selected target before any
/// of them is mutated.
pub trait UndoRecorder {
    fn snapshot_before_edit(&mut self, target: TargetId, description: &str);
}

/// One selected material being edited.
pub trait EditTarget {
    fn target_id(&self) -> TargetId;
    fn properties(&self) -> &dyn PropertyStore;
    fn properties_mut(&mut self) -> &mut dyn PropertyStore;
}

/// Outcome of one editor round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The control reported no change; nothing was written.
    Unchanged,
    /// The edited gradient was cached and encoded into every selected
    /// target.
    Applied { targets: usize },
}

/// Edit controller for one ramp property across a multi-selection.
#[derive(Debug, Default)]
pub struct ColorRampEditor {
    cache: GradientCache,
}

impl ColorRampEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &GradientCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut GradientCache {
        &mut self.cache
    }

    /// Run one synchronous edit round trip. `targets[0]` is the primary
    /// target whose packed data feeds the control; the rest of the slice is
    /// the remainder of the current selection.
    pub fn edit(
        &mut self,
        ui: &mut dyn GradientField,
        undo: &mut dyn UndoRecorder,
        bounds: Rect,
        label: &str,
        prop: &str,
        targets: &mut [&mut dyn EditTarget],
    ) -> EditOutcome {
        if targets.is_empty() {
            return EditOutcome::Unchanged;
        }

        let primary_id = targets[0].target_id();
        let current = self.cache.resolve(targets[0].properties(), primary_id, prop);
        let response = ui.render(bounds, label, current, true);
        if !response.changed {
            return EditOutcome::Unchanged;
        }

        for target in targets.iter() {
            undo.snapshot_before_edit(target.target_id(), UNDO_DESCRIPTION);
        }

        let gradient = response.gradient;
        let Some((primary, rest)) = targets.split_first_mut() else {
            return EditOutcome::Unchanged;
        };
        self.apply_gradient(&mut **primary, &gradient, prop);
        for target in rest.iter_mut() {
            self.apply_gradient(&mut **target, &gradient, prop);
        }

        debug!(
            prop,
            targets = targets.len(),
            colors = gradient.color_keys().len(),
            "broadcast edited gradient"
        );
        EditOutcome::Applied {
            targets: targets.len(),
        }
    }

    /// Adopt `gradient` as `target`'s cached value, then encode it into the
    /// target's store. Cache before store, so a resolve inside the same
    /// round trip sees consistent data.
    pub fn apply_gradient(&mut self, target: &mut dyn EditTarget, gradient: &Gradient, prop: &str) {
        self.cache.insert(target.target_id(), prop, gradient.clone());
        codec::encode(gradient, target.properties_mut(), prop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorramp_core::{
        Color, GradientAlphaKey, GradientColorKey, MemoryPropertyBag, PropertyValue, Vec4,
    };
    use smallvec::smallvec;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Control stub: `edit_with` decides what the artist "did" this frame.
    struct StubField {
        edit_with: Option<Gradient>,
        seen_labels: Vec<String>,
        seen_gradients: Vec<Gradient>,
    }

    impl StubField {
        fn untouched() -> Self {
            Self {
                edit_with: None,
                seen_labels: Vec::new(),
                seen_gradients: Vec::new(),
            }
        }

        fn editing(gradient: Gradient) -> Self {
            Self {
                edit_with: Some(gradient),
                seen_labels: Vec::new(),
                seen_gradients: Vec::new(),
            }
        }
    }

    impl GradientField for StubField {
        fn render(
            &mut self,
            _bounds: Rect,
            label: &str,
            current: &Gradient,
            _show_alpha: bool,
        ) -> GradientFieldResponse {
            self.seen_labels.push(label.to_string());
            self.seen_gradients.push(current.clone());
            match &self.edit_with {
                Some(gradient) => GradientFieldResponse::edited(gradient.clone()),
                None => GradientFieldResponse::unchanged(current),
            }
        }
    }

    #[derive(Default)]
    struct RecordingUndo {
        snapshots: Vec<(TargetId, String)>,
    }

    impl UndoRecorder for RecordingUndo {
        fn snapshot_before_edit(&mut self, target: TargetId, description: &str) {
            self.snapshots.push((target, description.to_string()));
        }
    }

    /// Material fake that logs which target each write lands on, in order.
    struct FakeMaterial {
        id: TargetId,
        bag: MemoryPropertyBag,
        write_log: Rc<RefCell<Vec<u64>>>,
    }

    impl FakeMaterial {
        fn new(id: u64, write_log: Rc<RefCell<Vec<u64>>>) -> Self {
            Self {
                id: TargetId(id),
                bag: MemoryPropertyBag::with_ramp_layout("Ramp", 8, 4),
                write_log,
            }
        }
    }

    impl PropertyStore for FakeMaterial {
        fn has_property(&self, name: &str) -> bool {
            self.bag.has_property(name)
        }

        fn get_int(&self, name: &str) -> i32 {
            self.bag.get_int(name)
        }

        fn set_int(&mut self, name: &str, value: i32) {
            self.write_log.borrow_mut().push(self.id.0);
            self.bag.set_int(name, value);
        }

        fn get_color(&self, name: &str) -> Color {
            self.bag.get_color(name)
        }

        fn set_color(&mut self, name: &str, value: Color) {
            self.write_log.borrow_mut().push(self.id.0);
            self.bag.set_color(name, value);
        }

        fn get_vec4(&self, name: &str) -> Vec4 {
            self.bag.get_vec4(name)
        }

        fn set_vec4(&mut self, name: &str, value: Vec4) {
            self.write_log.borrow_mut().push(self.id.0);
            self.bag.set_vec4(name, value);
        }
    }

    impl EditTarget for FakeMaterial {
        fn target_id(&self) -> TargetId {
            self.id
        }

        fn properties(&self) -> &dyn PropertyStore {
            self
        }

        fn properties_mut(&mut self) -> &mut dyn PropertyStore {
            self
        }
    }

    fn edited_gradient() -> Gradient {
        let mut gradient = Gradient::new();
        gradient.set_keys(
            smallvec![
                GradientColorKey::new(Color::RED, 0.0),
                GradientColorKey::new(Color::GREEN, 0.4),
                GradientColorKey::new(Color::BLUE, 1.0),
            ],
            smallvec![
                GradientAlphaKey::new(1.0, 0.0),
                GradientAlphaKey::new(0.25, 1.0),
            ],
        );
        gradient
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 240.0, 18.0)
    }

    #[test]
    fn test_unchanged_render_writes_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut material = FakeMaterial::new(1, log.clone());
        codec::encode(&Gradient::two_point(Color::BLACK, Color::WHITE), &mut material, "Ramp");
        log.borrow_mut().clear();

        let mut editor = ColorRampEditor::new();
        let mut ui = StubField::untouched();
        let mut undo = RecordingUndo::default();
        let mut targets: [&mut dyn EditTarget; 1] = [&mut material];

        let outcome = editor.edit(&mut ui, &mut undo, bounds(), "Color Ramp", "Ramp", &mut targets);

        assert_eq!(outcome, EditOutcome::Unchanged);
        assert!(undo.snapshots.is_empty());
        assert!(log.borrow().is_empty());
        assert_eq!(ui.seen_labels, vec!["Color Ramp".to_string()]);
        // The control saw the decoded gradient, not the sentinel.
        assert!(ui.seen_gradients[0].is_loaded());
    }

    #[test]
    fn test_change_applies_to_single_target() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut material = FakeMaterial::new(1, log.clone());
        codec::encode(&Gradient::two_point(Color::BLACK, Color::WHITE), &mut material, "Ramp");

        let mut editor = ColorRampEditor::new();
        let mut ui = StubField::editing(edited_gradient());
        let mut undo = RecordingUndo::default();
        let mut targets: [&mut dyn EditTarget; 1] = [&mut material];

        let outcome = editor.edit(&mut ui, &mut undo, bounds(), "Color Ramp", "Ramp", &mut targets);

        assert_eq!(outcome, EditOutcome::Applied { targets: 1 });
        assert_eq!(undo.snapshots, vec![(TargetId(1), UNDO_DESCRIPTION.to_string())]);
        assert_eq!(material.bag.get_int("RampColorCount"), 3);
        assert_eq!(
            editor.cache().get(TargetId(1), "Ramp"),
            Some(&edited_gradient())
        );
    }

    #[test]
    fn test_broadcast_writes_identical_packed_data() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut a = FakeMaterial::new(1, log.clone());
        let mut b = FakeMaterial::new(2, log.clone());
        let mut c = FakeMaterial::new(3, log.clone());
        for material in [&mut a, &mut b, &mut c] {
            codec::encode(
                &Gradient::two_point(Color::BLACK, Color::WHITE),
                material,
                "Ramp",
            );
        }

        let mut editor = ColorRampEditor::new();
        let mut ui = StubField::editing(edited_gradient());
        let mut undo = RecordingUndo::default();
        let mut targets: [&mut dyn EditTarget; 3] = [&mut a, &mut b, &mut c];

        let outcome = editor.edit(&mut ui, &mut undo, bounds(), "Color Ramp", "Ramp", &mut targets);
        assert_eq!(outcome, EditOutcome::Applied { targets: 3 });

        // One snapshot per target, all before any write, primary first.
        let snapshot_ids: Vec<u64> = undo.snapshots.iter().map(|(id, _)| id.0).collect();
        assert_eq!(snapshot_ids, vec![1, 2, 3]);

        for name in [
            "RampColorCount",
            "RampAlphaCount",
            "RampColor0",
            "RampColor1",
            "RampColor2",
            "RampAlpha0",
        ] {
            assert_eq!(a.bag.get_int("RampColorCount"), 3);
            assert_eq!(b.get_color(name).to_array(), a.get_color(name).to_array());
            assert_eq!(c.get_color(name).to_array(), a.get_color(name).to_array());
            assert_eq!(b.get_vec4(name), a.get_vec4(name));
            assert_eq!(c.get_vec4(name), a.get_vec4(name));
            assert_eq!(b.get_int(name), a.get_int(name));
            assert_eq!(c.get_int(name), a.get_int(name));
        }

        // Every target's cache entry is the same gradient.
        for id in [1, 2, 3] {
            assert_eq!(
                editor.cache().get(TargetId(id), "Ramp"),
                Some(&edited_gradient())
            );
        }
    }

    #[test]
    fn test_primary_written_before_secondaries() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut a = FakeMaterial::new(7, log.clone());
        let mut b = FakeMaterial::new(8, log.clone());
        for material in [&mut a, &mut b] {
            codec::encode(
                &Gradient::two_point(Color::BLACK, Color::WHITE),
                material,
                "Ramp",
            );
        }
        log.borrow_mut().clear();

        let mut editor = ColorRampEditor::new();
        let mut ui = StubField::editing(edited_gradient());
        let mut undo = RecordingUndo::default();
        let mut targets: [&mut dyn EditTarget; 2] = [&mut a, &mut b];
        editor.edit(&mut ui, &mut undo, bounds(), "Color Ramp", "Ramp", &mut targets);

        let writes = log.borrow();
        assert!(!writes.is_empty());
        let first_secondary = writes.iter().position(|&id| id == 8);
        let last_primary = writes.iter().rposition(|&id| id == 7);
        match (last_primary, first_secondary) {
            (Some(primary), Some(secondary)) => assert!(primary < secondary),
            _ => panic!("both targets must have been written"),
        }
    }

    #[test]
    fn test_empty_selection_is_a_no_op() {
        let mut editor = ColorRampEditor::new();
        let mut ui = StubField::editing(edited_gradient());
        let mut undo = RecordingUndo::default();
        let mut targets: [&mut dyn EditTarget; 0] = [];

        let outcome = editor.edit(&mut ui, &mut undo, bounds(), "Color Ramp", "Ramp", &mut targets);
        assert_eq!(outcome, EditOutcome::Unchanged);
        assert!(ui.seen_labels.is_empty());
    }

    #[test]
    fn test_apply_gradient_updates_cache_and_store() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut material = FakeMaterial::new(4, log);
        let mut editor = ColorRampEditor::new();

        editor.apply_gradient(&mut material, &edited_gradient(), "Ramp");

        assert_eq!(material.bag.get_int("RampColorCount"), 3);
        assert_eq!(
            editor.cache().get(TargetId(4), "Ramp"),
            Some(&edited_gradient())
        );
    }

    #[test]
    fn test_edit_reuses_cache_across_frames() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut material = FakeMaterial::new(1, log);
        codec::encode(&Gradient::two_point(Color::BLACK, Color::WHITE), &mut material, "Ramp");

        // Corrupt one packed value without touching the count: the second
        // frame must still see the cached gradient from the first frame.
        let mut editor = ColorRampEditor::new();
        let mut undo = RecordingUndo::default();
        let mut ui = StubField::untouched();
        {
            let mut targets: [&mut dyn EditTarget; 1] = [&mut material];
            editor.edit(&mut ui, &mut undo, bounds(), "Ramp", "Ramp", &mut targets);
        }
        material
            .bag
            .declare("RampColor1", PropertyValue::Color(Color::RED));
        {
            let mut targets: [&mut dyn EditTarget; 1] = [&mut material];
            editor.edit(&mut ui, &mut undo, bounds(), "Ramp", "Ramp", &mut targets);
        }

        assert_eq!(ui.seen_gradients[0], ui.seen_gradients[1]);
    }
}
