//! Observer seam for send results. Clients hold an `Arc<dyn SendObserver>`; the default
//! [`TracingObserver`] logs through `tracing`, [`NoopObserver`] is the silent configuration.

use tracing::{debug, error};

use crate::error::SendError;

/// Receives the outcome of every client operation. Both methods default to no-ops.
pub trait SendObserver: Send + Sync {
    /// Called once per failed operation with the originating operation name.
    fn on_failure(&self, _operation: &'static str, _error: &SendError) {}

    /// Called once per operation whose body decoded into an envelope.
    fn on_success(&self, _operation: &'static str, _ok: bool) {}
}

/// Logs failures at error level and successes at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SendObserver for TracingObserver {
    fn on_failure(&self, operation: &'static str, error: &SendError) {
        error!(
            operation = operation,
            kind = %error.kind(),
            status = ?error.status(),
            "{}",
            error
        );
    }

    fn on_success(&self, operation: &'static str, ok: bool) {
        debug!(operation = operation, ok = ok, "request completed");
    }
}

/// Observer that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SendObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        failures: Mutex<Vec<(&'static str, String)>>,
    }

    impl SendObserver for Recording {
        fn on_failure(&self, operation: &'static str, error: &SendError) {
            self.failures
                .lock()
                .unwrap()
                .push((operation, error.detail().to_string()));
        }
    }

    #[test]
    fn test_default_methods_are_callable_on_trait_object() {
        let observers: Vec<Box<dyn SendObserver>> =
            vec![Box::new(NoopObserver), Box::new(TracingObserver)];
        let err = SendError::transport("sendMessage", "boom");
        for observer in &observers {
            observer.on_failure("sendMessage", &err);
            observer.on_success("sendMessage", true);
        }
    }

    #[test]
    fn test_custom_observer_receives_operation_name() {
        let observer = Recording::default();
        observer.on_failure("sendFile", &SendError::file_unavailable("sendFile", "missing"));
        observer.on_success("sendFile", true);
        let failures = observer.failures.lock().unwrap();
        assert_eq!(failures.as_slice(), &[("sendFile", "missing".to_string())]);
    }
}
