//! Color-Ramp Material Inspector
//!
//! Lets an artist edit a color gradient through a host-provided
//! gradient-picker control, then packs the gradient's keys into a bounded
//! set of material properties so a shader can sample the ramp without
//! texture lookups.
//!
//! Three cooperating pieces:
//!
//! - **Codec** ([`codec`]): translates between an in-memory gradient and
//!   the packed slot layout (≤8 color keys, ≤8 alpha keys, alpha keys two
//!   per vector slot)
//! - **Cache** ([`cache`]): keeps the last resolved gradient per
//!   (target, property) and re-decodes only when the stored color count
//!   disagrees with the cached key count
//! - **Edit controller** ([`editor`]): one synchronous round trip per
//!   redraw, broadcasting an edit to every selected target
//!
//! Host collaborators stay behind traits: the material property bag
//! ([`colorramp_core::PropertyStore`]), the gradient-picker control
//! ([`GradientField`]), and the undo system ([`UndoRecorder`]).
//!
//! # Example
//!
//! ```ignore
//! use colorramp_core::Rect;
//! use colorramp_editor::ColorRampEditor;
//!
//! let mut editor = ColorRampEditor::new();
//! // Once per inspector redraw:
//! let outcome = editor.edit(
//!     &mut gradient_field,
//!     &mut undo,
//!     Rect::new(0.0, 0.0, 240.0, 18.0),
//!     "Color Ramp",
//!     "Ramp",
//!     &mut selection,
//! );
//! ```

pub mod cache;
pub mod codec;
pub mod editor;

pub use cache::{GradientCache, TargetId};
pub use codec::{decode, encode, DecodeOutcome, SkipReason};
pub use editor::{
    ColorRampEditor, EditOutcome, EditTarget, GradientField, GradientFieldResponse, UndoRecorder,
    UNDO_DESCRIPTION,
};
