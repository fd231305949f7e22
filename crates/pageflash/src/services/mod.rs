//! Runtime services shared by the page helpers.
//!
//! - `timers` - virtual clock and deferred task queue
//! - `events` - event kinds, listener table and propagation
//! - `surface` - the rendering surface the helpers draw on

pub mod events;
pub mod surface;
pub mod timers;
