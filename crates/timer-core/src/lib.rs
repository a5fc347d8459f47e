//! Elapsed-time accumulation for labeled units of work.
//!
//! This crate contains the fundamental types for task timing:
//! - [`TaskTimer`]: a resumable stopwatch identified by a component/subcomponent label pair
//! - [`Label`]: owned, immutable identifier text
//! - [`Clock`]: the time-source seam, with monotonic and manually-driven implementations
//!
//! Reporting and aggregation of finished timers live in the `timer-report`
//! crate; this crate only measures.

pub mod clock;
mod fmt;
mod label;
mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use fmt::format_duration;
pub use label::Label;
pub use timer::TaskTimer;
