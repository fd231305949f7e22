//! Form validation and upload CSS.

/// Return form CSS.
pub fn css() -> &'static str {
    r#"
/* ===== FORMS ===== */
.field-error {
    color: #ef4444;
    font-size: 0.875rem;
    margin-top: 5px;
}

.file-input {
    position: relative;
    transition: background 0.3s ease, border-color 0.3s ease, transform 0.3s ease;
}

.file-label {
    cursor: pointer;
}
"#
}
