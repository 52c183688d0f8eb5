//! The logging seam shared by the store, registry and providers

/// Logger injected into library components
///
/// The server passes a `TracingLogger`; tests and embedders that do not
/// care pass `NoOpLogger`. Messages are prefixed with the emitting
/// component, e.g. `[ConfigStore] ...`.
///
/// Secret values must never be passed to a logger; log service ids and
/// lengths instead.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
