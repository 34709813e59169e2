//! Foundation module - Core utilities and types
//!
//! Integer screen geometry and colours, the control arena handles and the
//! deferred child lists, the frame clock, and logging setup.

pub mod collections;
pub mod logging;
pub mod math;
pub mod time;
