//! Request middleware.
//!
//! [`Trace`] scopes every request to a trace identifier that log lines and
//! error bodies share.

pub mod trace;

pub use trace::Trace;
