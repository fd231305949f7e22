//! Drag-and-drop file inputs.
//!
//! Each `input[type="file"]` wrapped in a `.file-input` gets drop-zone
//! highlighting on its wrapper and a label that tracks the selected file.

use tracing::debug;

use crate::dom::NodeId;
use crate::services::events::{EventKind, Listener};
use crate::services::surface::Surface;
use crate::styles::{color, form};

use super::restart_animation;

const DRAG_KINDS: [EventKind; 4] = [
    EventKind::DragEnter,
    EventKind::DragOver,
    EventKind::DragLeave,
    EventKind::Drop,
];

/// A file input and its styled wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileField {
    pub input: NodeId,
    pub container: NodeId,
}

/// Wire every wrapped file input. Inputs without a `.file-input` wrapper are skipped.
pub fn init(surface: &mut impl Surface) -> Vec<FileField> {
    let inputs = surface.document().query_selector_all(form::FILE_INPUTS_SELECTOR);
    let mut fields = Vec::new();

    for input in inputs {
        let Some(container) = surface.document().closest(input, form::FILE_INPUT_SELECTOR) else {
            debug!("Upload: file input #{} has no wrapper", input.index());
            continue;
        };

        for kind in DRAG_KINDS {
            surface.listen(container, kind, Listener::PreventDefault);
        }
        for kind in [EventKind::DragEnter, EventKind::DragOver] {
            surface.listen(container, kind, Listener::DragHighlight);
        }
        for kind in [EventKind::DragLeave, EventKind::Drop] {
            surface.listen(container, kind, Listener::DragUnhighlight);
        }
        surface.listen(container, EventKind::Drop, Listener::FileDrop { input });
        surface.listen(input, EventKind::Change, Listener::FileChange { container });

        fields.push(FileField { input, container });
    }

    fields
}

pub fn highlight(surface: &mut impl Surface, container: NodeId) {
    let doc = surface.document_mut();
    doc.set_style(container, "background", color::DROP_BACKGROUND);
    doc.set_style(container, "border-color", color::DROP_BORDER);
    doc.set_style(container, "transform", "scale(1.05)");
}

pub fn unhighlight(surface: &mut impl Surface, container: NodeId) {
    let doc = surface.document_mut();
    doc.set_style(container, "background", "");
    doc.set_style(container, "border-color", "");
    doc.set_style(container, "transform", "");
}

/// Files dropped on `container`: hand them to `input` and update the label.
///
/// Returns true when the selection deserves a celebration.
pub fn handle_drop(
    surface: &mut impl Surface,
    field: FileField,
    files: &[String],
    placeholder: &str,
) -> bool {
    let Some(first) = files.first() else {
        debug!("Upload: drop without files");
        return false;
    };
    surface.document_mut().set_files(field.input, files.to_vec());
    update_file_name(surface, field.container, first, placeholder)
}

/// Selection changed on `input`: show the first file, or the placeholder.
pub fn handle_change(surface: &mut impl Surface, field: FileField, placeholder: &str) -> bool {
    let name = surface
        .document()
        .files(field.input)
        .first()
        .cloned()
        .unwrap_or_else(|| placeholder.to_string());
    update_file_name(surface, field.container, &name, placeholder)
}

/// Show `name` in the wrapper's `.file-label` and pulse the wrapper.
///
/// Returns true if the label was updated with a real file name.
pub fn update_file_name(
    surface: &mut impl Surface,
    container: NodeId,
    name: &str,
    placeholder: &str,
) -> bool {
    let Some(label) = surface
        .document()
        .query_selector_all_from(container, form::FILE_LABEL_SELECTOR)
        .first()
        .copied()
    else {
        return false;
    };

    surface.document_mut().set_text(label, &format!("📁 {name}"));
    restart_animation(surface, container, "pulse 0.6s ease");
    debug!("Upload: selected '{}'", name);
    name != placeholder
}
