//! Shared utilities for the DPoS wallet.

pub mod logging;
pub mod time;

pub use logging::{init_tracing, LogFormat, LoggingError};
pub use time::humanize_elapsed;
