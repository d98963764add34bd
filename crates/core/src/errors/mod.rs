//! Error types and result extensions for rampart operations

mod builders;
mod conversions;
mod display;
mod extensions;
mod types;

pub use display::Report;
pub use extensions::*;
pub use types::{Chain, Error, ErrorCategory, Result, MAX_CAUSE_DEPTH};
