//! Logging abstractions for runtime-agnostic logging

mod traits;
mod tracing_logger;

pub use traits::{Logger, NoOpLogger};
pub use tracing_logger::TracingLogger;
