//! Flash message CSS.

/// Return notifications CSS.
pub fn css() -> &'static str {
    r#"
/* ===== NOTIFICATIONS ===== */
.flash-messages {
    display: flex;
    flex-direction: column;
    gap: 10px;
}

.flash-message {
    display: flex;
    align-items: center;
    gap: 12px;
    padding: 15px 20px;
    border-radius: 12px;
    transition: opacity 0.5s ease, transform 0.5s ease;
}

.flash-icon {
    font-size: 1.4rem;
}

.flash-text {
    flex: 1;
}

/* Close affordance */
.flash-close {
    background: none;
    border: none;
    font-size: 1.4rem;
    cursor: pointer;
    margin-left: 15px;
    color: inherit;
    transition: transform 0.3s ease;
}

/* Kinds */
.flash-success { background: rgba(16, 185, 129, 0.15); color: #047857; }
.flash-error { background: rgba(239, 68, 68, 0.15); color: #b91c1c; }
.flash-warning { background: rgba(245, 158, 11, 0.15); color: #b45309; }
.flash-info { background: rgba(59, 130, 246, 0.15); color: #1d4ed8; }
"#
}
