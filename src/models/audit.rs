//! Audit records for token issuance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEventOutcome {
    Issued,
    Rejected,
    Failed,
}

/// Structured audit log entry for a token request.
///
/// The signed token is never part of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAuditEvent {
    pub outcome: TokenEventOutcome,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub method: String,
    pub endpoint: String,
    pub request_id: Option<String>,
    pub room_name: Option<String>,
    pub participant_identity: Option<String>,
    pub reason: Option<String>,
}

impl TokenAuditEvent {
    pub fn new(
        outcome: TokenEventOutcome,
        ip_address: String,
        method: String,
        endpoint: String,
    ) -> Self {
        Self {
            outcome,
            timestamp: Utc::now(),
            ip_address,
            user_agent: None,
            method,
            endpoint,
            request_id: None,
            room_name: None,
            participant_identity: None,
            reason: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Attach the room and identity the token was (or would have been) issued for
    pub fn with_participant(mut self, room_name: &str, identity: &str) -> Self {
        self.room_name = Some(room_name.to_string());
        self.participant_identity = Some(identity.to_string());
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    /// Emit the event on the `token_audit` target
    pub fn log(&self) {
        match self.outcome {
            TokenEventOutcome::Issued => info!(
                target: "token_audit",
                outcome = ?self.outcome,
                timestamp = %self.timestamp,
                ip_address = %self.ip_address,
                user_agent = ?self.user_agent,
                method = %self.method,
                endpoint = %self.endpoint,
                request_id = ?self.request_id,
                room_name = ?self.room_name,
                participant_identity = ?self.participant_identity,
                "Access token issued"
            ),
            TokenEventOutcome::Rejected | TokenEventOutcome::Failed => warn!(
                target: "token_audit",
                outcome = ?self.outcome,
                timestamp = %self.timestamp,
                ip_address = %self.ip_address,
                user_agent = ?self.user_agent,
                method = %self.method,
                endpoint = %self.endpoint,
                request_id = ?self.request_id,
                room_name = ?self.room_name,
                participant_identity = ?self.participant_identity,
                reason = ?self.reason,
                "Access token request not served"
            ),
        }
    }
}
