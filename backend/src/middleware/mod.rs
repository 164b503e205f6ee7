//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of routing, namely
//! trace correlation and HTML form method overrides.

pub mod method_override;
pub mod trace;

pub use method_override::MethodOverride;
pub use trace::Trace;
