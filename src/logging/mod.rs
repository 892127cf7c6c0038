//! Logging infrastructure: a `tracing` subscriber writing to standard error.
//!
//! Standard output is reserved for the generated resource mapping, so every
//! event, whatever its level, goes to standard error.

mod subscriber;

pub use subscriber::{console_filter, init_subscriber};
