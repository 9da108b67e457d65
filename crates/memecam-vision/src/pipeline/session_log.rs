//! Structured session logging.
//!
//! Every pipeline session gets a [`SessionId`] and all of its lifecycle logs
//! carry it, so interleaved camera sessions stay readable.

use tracing::{info, warn, Span};

use memecam_models::SessionId;

/// Session logger with consistent fields.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    session_id: String,
    device: String,
}

impl SessionLogger {
    /// Create a logger for a session running on a `device` class.
    pub fn new(session_id: &SessionId, device: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            device: device.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            device = %self.device,
            "Session started: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            session_id = %self.session_id,
            device = %self.device,
            "Session warning: {}", message
        );
    }

    pub fn log_shutdown(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            device = %self.device,
            "Session closed: {}", message
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Span entered around each processed frame.
    pub fn frame_span(&self, frame_index: u64, timestamp_ms: f64) -> Span {
        tracing::debug_span!(
            "frame",
            session_id = %self.session_id,
            frame = frame_index,
            timestamp_ms = timestamp_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_logger_fields() {
        let id = SessionId::from_string("session-1");
        let logger = SessionLogger::new(&id, "constrained");
        assert_eq!(logger.session_id(), "session-1");
        assert_eq!(logger.device(), "constrained");
    }

    #[test]
    fn test_logging_without_subscriber() {
        let logger = SessionLogger::new(&SessionId::new(), "unconstrained");
        logger.log_start("ready");
        logger.log_warning("hand detector unavailable");
        logger.log_shutdown("done");
        let _span = logger.frame_span(0, 16.6).entered();
    }
}
