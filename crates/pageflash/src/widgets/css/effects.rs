//! Decorative effect CSS.

/// Return effects CSS.
pub fn css() -> &'static str {
    r#"
/* ===== EFFECTS ===== */
.animated-bg {
    position: fixed;
    inset: 0;
    overflow: hidden;
    pointer-events: none;
    z-index: -1;
}

.bubble {
    position: absolute;
    bottom: -100px;
    width: 60px;
    height: 60px;
    border-radius: 50%;
    background: rgba(6, 182, 212, 0.15);
    animation: float 15s linear infinite;
}

.bubble:nth-child(2n) { left: 20%; animation-delay: 2s; }
.bubble:nth-child(3n) { left: 45%; animation-delay: 4s; }
.bubble:nth-child(5n) { left: 70%; animation-delay: 6s; }

.confetti {
    position: absolute;
    width: 8px;
    height: 8px;
    border-radius: 50%;
    pointer-events: none;
    z-index: 1000;
    transition-timing-function: cubic-bezier(0.25, 0.46, 0.45, 0.94);
}
"#
}
