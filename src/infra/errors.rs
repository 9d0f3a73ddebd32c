// src/infra/errors.rs — Error types for ontodash

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    // Transport errors (request rejected or body unreadable); rendered inline
    #[error("{message}")]
    Transport { endpoint: String, message: String },

    #[error("{message}")]
    Decode { endpoint: String, message: String },

    // User errors
    #[error("CQ{number} does not exist (valid: 1-{max})")]
    InvalidCq { number: u8, max: u8 },

    #[error("Unknown tab '{0}'")]
    UnknownTab(String),

    #[error("Unknown reasoner operation '{0}'")]
    UnknownReasonerOp(String),

    // Infra
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        DashboardError::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        DashboardError::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Errors the dashboard renders inline instead of propagating.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DashboardError::Transport { .. } | DashboardError::Decode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_displays_raw_message() {
        let e = DashboardError::transport("/cq/3", "timeout");
        assert_eq!(e.to_string(), "timeout");
        assert!(e.is_transport());
    }

    #[test]
    fn test_invalid_cq_not_transport() {
        let e = DashboardError::InvalidCq { number: 11, max: 10 };
        assert!(!e.is_transport());
        assert!(e.to_string().contains("CQ11"));
    }
}
