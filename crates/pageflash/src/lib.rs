//! pageflash - page interaction runtime.
//!
//! Flash notifications, form feedback and small visual effects for a web
//! page, running over an in-memory document and a virtual clock so every
//! behavior can be driven and inspected without a browser.
//!
//! - `dom` - document tree and selectors
//! - `services` - timers, events and the rendering surface
//! - `widgets` - notification manager and the other page helpers
//! - `page` - event loop and the integration surface for other scripts
//! - `demo` - built-in demo page
//! - `timeline` - recorded timelines for the CLI

pub mod demo;
pub mod dom;
pub mod page;
pub mod services;
pub mod styles;
pub mod timeline;
pub mod widgets;

pub use page::{Page, Step};
pub use widgets::{Kind, NotificationManager, Phase, ToastId};
