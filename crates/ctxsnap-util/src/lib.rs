//! Shared utilities for ctxsnap.
//!
//! This crate provides the common pieces used across the ctxsnap
//! workspace:
//! - Logging setup with tracing
//! - Path utilities
//! - Clock abstraction for injectable timestamps

pub mod clock;
pub mod log;
pub mod path;

pub use clock::{Clock, FixedClock, SystemClock};
