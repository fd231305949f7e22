//! Form validation with inline error messages.
//!
//! Checks are limited to presence and format: required fields must be
//! non-blank, a numeric `year` field must fall in the configured range, and
//! a CSV upload field must hold a `.csv` file. Failures are shown next to
//! the field; nothing here returns an error.

use tracing::debug;

use pageflash_core::config::{MessagesConfig, ValidationConfig};

use crate::dom::NodeId;
use crate::services::events::{EventKind, Listener};
use crate::services::surface::Surface;
use crate::styles::{color, form};

/// Outcome of validating one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Element the message was attached to, and the message.
    pub errors: Vec<(NodeId, String)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate every `<form>` on submit. Returns the forms.
pub fn init(surface: &mut impl Surface) -> Vec<NodeId> {
    let forms = surface.document().query_selector_all("form");
    for form in &forms {
        surface.listen(*form, EventKind::Submit, Listener::ValidateForm);
    }
    forms
}

/// Check every `[required]` field in `form`, updating inline errors.
pub fn validate(
    surface: &mut impl Surface,
    form: NodeId,
    rules: &ValidationConfig,
    messages: &MessagesConfig,
) -> ValidationReport {
    let fields = surface
        .document()
        .query_selector_all_from(form, form::REQUIRED_SELECTOR);
    let mut report = ValidationReport::default();

    for field in fields {
        let doc = surface.document();
        let value = doc.value(field);
        let field_type = doc.attr(field, "type").unwrap_or_default().to_string();
        let file_wrapper = doc.closest(field, form::FILE_INPUT_SELECTOR);

        if value.trim().is_empty() {
            show_field_error(surface, field, &messages.required);
            report.errors.push((field, messages.required.clone()));
            continue;
        }

        clear_field_error(surface, field);
        if field_type == "file"
            && let Some(wrapper) = file_wrapper
        {
            clear_field_error(surface, wrapper);
        }

        let doc = surface.document();
        if field_type == "number" && doc.attr(field, "name") == Some("year") {
            // Unparseable input compares false both ways, like NaN.
            if let Some(year) = leading_int(&value)
                && !rules.year_in_range(year)
            {
                let message = messages.year_range_message(rules.year_min, rules.year_max);
                show_field_error(surface, field, &message);
                report.errors.push((field, message));
            }
        } else if field_type == "file"
            && doc.attr(field, "accept") == Some(rules.csv_extension.as_str())
        {
            let wrong_format = doc.files(field).first().is_some_and(|name| {
                !name
                    .to_lowercase()
                    .ends_with(&rules.csv_extension.to_lowercase())
            });
            if wrong_format {
                let target = file_wrapper.unwrap_or(field);
                show_field_error(surface, target, &messages.csv_format);
                report.errors.push((target, messages.csv_format.clone()));
            }
        }
    }

    debug!(
        "FormValidation: form #{} errors={}",
        form.index(),
        report.errors.len()
    );
    report
}

/// Mark `field` invalid and append a `.field-error` message to its parent.
pub fn show_field_error(surface: &mut impl Surface, field: NodeId, message: &str) {
    clear_field_error(surface, field);

    let doc = surface.document_mut();
    doc.set_style(field, "border-color", color::ERROR);

    let Some(parent) = doc.parent(field) else {
        debug!("FormValidation: field #{} has no parent", field.index());
        return;
    };
    let error = doc.create_child(parent, "div", &[form::FIELD_ERROR]);
    doc.set_style(error, "color", color::ERROR);
    doc.set_style(error, "font-size", "0.875rem");
    doc.set_style(error, "margin-top", "5px");
    doc.set_text(error, message);
}

/// Reset `field`'s border and drop the error message next to it.
pub fn clear_field_error(surface: &mut impl Surface, field: NodeId) {
    let doc = surface.document_mut();
    doc.set_style(field, "border-color", "");

    let Some(parent) = doc.parent(field) else {
        return;
    };
    if let Some(existing) = doc
        .query_selector_all_from(parent, form::FIELD_ERROR_SELECTOR)
        .first()
        .copied()
    {
        if let Err(e) = doc.detach(existing) {
            debug!("FormValidation: could not remove error: {}", e);
        }
    }
}

/// Integer prefix of `value`, the way `parseInt` reads it.
fn leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    // Too many digits for i64 still reads as a huge number.
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}
