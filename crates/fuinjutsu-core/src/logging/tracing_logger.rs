//! Logger backed by the `tracing` ecosystem

use super::traits::Logger;

/// A logger that forwards to `tracing` events
///
/// Every event carries a `component` field so hosts can filter per
/// subsystem (`config`, `mcp`, `providers`, ...).
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: String,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("fuinjutsu")
    }
}

impl TracingLogger {
    /// Create a logger tagged with a component name
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(component = %self.component, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(component = %self.component, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(component = %self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(component = %self.component, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_creation() {
        assert_eq!(TracingLogger::default().component(), "fuinjutsu");
        assert_eq!(TracingLogger::new("mcp").component(), "mcp");
    }

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: events are dropped, nothing panics
        let logger = TracingLogger::new("test");
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }
}
