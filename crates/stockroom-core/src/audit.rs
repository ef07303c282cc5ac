//! # Audit Recorder
//!
//! Appends one human-readable line per successful store mutation.
//!
//! The log is global, append-only and newest first. Retention is unbounded.

use chrono::Utc;
use tracing::info;

use crate::store::EntityStore;
use crate::types::AuditLog;

impl AuditLog {
    /// Builds a log line stamped with the current time.
    pub fn new(id: i64, actor: impl Into<String>, action: impl Into<String>) -> Self {
        AuditLog {
            id,
            timestamp: Utc::now(),
            user: actor.into(),
            action: action.into(),
        }
    }
}

impl EntityStore {
    /// Records `action` as done by `actor`, at the front of the log.
    pub(crate) fn record(&mut self, actor: &str, action: impl Into<String>) -> &AuditLog {
        let log = AuditLog::new(self.ids.next_id(), actor, action);
        info!(id = log.id, user = %log.user, action = %log.action, "audit");
        self.audit_logs.insert(0, log);
        &self.audit_logs[0]
    }

    /// Records `action` as done by the store's configured actor.
    pub(crate) fn record_as_actor(&mut self, action: impl Into<String>) -> &AuditLog {
        let actor = self.actor.clone();
        self.record(&actor, action)
    }
}
