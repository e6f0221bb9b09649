//! User-facing notifications

use tracing::{info, warn};

/// Receiver of short messages meant for the user
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that turns messages into log events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "foodweb::notify", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(target: "foodweb::notify", "{}", message);
    }
}
