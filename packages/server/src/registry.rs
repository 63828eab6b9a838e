//! In-memory submission store.
//!
//! Owns every [`Submission`] and [`Evaluation`] for the lifetime of the
//! process. Each accepted `submit` opens a new numbered attempt; stage
//! transitions name the attempt they belong to and are rejected once a newer
//! attempt has replaced it, so data from two attempts is never mixed.

use std::sync::atomic::{AtomicU64, Ordering};

use analyzer::AnalysisResults;
use common::{ContentHash, SubmissionStatus};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::entity::{Evaluation, Submission};

/// Longest accepted submission id, in characters.
pub const MAX_ID_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("submissionId is required")]
    EmptyId,
    #[error("submissionId must be at most {MAX_ID_LEN} characters")]
    IdTooLong,
    #[error("code is required")]
    EmptyCode,
    #[error("Submission '{0}' not found")]
    NotFound(String),
    #[error("Analysis for '{0}' not found")]
    EvaluationNotFound(String),
    #[error("Submission '{0}' is already being analyzed")]
    InFlight(String),
    #[error("Attempt {attempt} of '{id}' was superseded")]
    StaleAttempt { id: String, attempt: u64 },
    #[error("Submission '{id}' cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: SubmissionStatus,
        to: SubmissionStatus,
    },
}

/// Handle for one analysis attempt, returned by [`SubmissionRegistry::submit`].
#[derive(Debug, Clone)]
pub struct Ticket {
    pub attempt: u64,
    pub submission: Submission,
}

impl Ticket {
    pub fn id(&self) -> &str {
        &self.submission.id
    }
}

/// Counters returned by [`SubmissionRegistry::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub total: usize,
    pub completed: usize,
    /// `total - completed`; includes failed submissions.
    pub pending: usize,
    pub failed: usize,
}

#[derive(Debug)]
struct Record {
    attempt: u64,
    submission: Submission,
    evaluation: Option<Evaluation>,
}

#[derive(Debug, Default)]
pub struct SubmissionRegistry {
    records: DashMap<String, Record>,
    attempts: AtomicU64,
}

impl SubmissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `code` under `id` as a fresh `Pending` submission.
    ///
    /// An existing finished submission under the same id is replaced in full,
    /// evaluation included. A submission that is still pending or analyzing
    /// makes this return [`RegistryError::InFlight`].
    pub fn submit(&self, id: &str, code: &str) -> Result<Ticket, RegistryError> {
        if id.trim().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if id.chars().count() > MAX_ID_LEN {
            return Err(RegistryError::IdTooLong);
        }
        if code.is_empty() {
            return Err(RegistryError::EmptyCode);
        }

        let submission = Submission::pending(id.to_string(), ContentHash::of_code(code));
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        let record = Record {
            attempt,
            submission: submission.clone(),
            evaluation: None,
        };

        match self.records.entry(id.to_string()) {
            Entry::Occupied(existing) if existing.get().submission.status.is_in_flight() => {
                return Err(RegistryError::InFlight(id.to_string()));
            }
            Entry::Occupied(mut existing) => {
                debug!(
                    submission_id = id,
                    previous_attempt = existing.get().attempt,
                    attempt,
                    "Replacing finished submission"
                );
                existing.insert(record);
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }

        Ok(Ticket {
            attempt,
            submission,
        })
    }

    /// `Pending -> Analyzing`.
    pub fn start(&self, ticket: &Ticket) -> Result<(), RegistryError> {
        self.transition(ticket, SubmissionStatus::Analyzing, |_| {})
    }

    /// `Analyzing -> Completed`, storing the evaluation under the same lock.
    pub fn complete(
        &self,
        ticket: &Ticket,
        results: AnalysisResults,
    ) -> Result<Evaluation, RegistryError> {
        let mut stored = None;
        self.transition(ticket, SubmissionStatus::Completed, |record| {
            let evaluation = Evaluation::new(
                record.submission.id.clone(),
                record.submission.code_hash,
                results,
            );
            record.evaluation = Some(evaluation.clone());
            stored = Some(evaluation);
        })?;
        stored.ok_or_else(|| RegistryError::EvaluationNotFound(ticket.id().to_string()))
    }

    /// `Pending | Analyzing -> Failed`. No evaluation is stored.
    pub fn fail(&self, ticket: &Ticket, reason: impl Into<String>) -> Result<(), RegistryError> {
        let reason = reason.into();
        self.transition(ticket, SubmissionStatus::Failed, |record| {
            record.submission.failure = Some(reason);
            record.evaluation = None;
        })
    }

    fn transition(
        &self,
        ticket: &Ticket,
        to: SubmissionStatus,
        apply: impl FnOnce(&mut Record),
    ) -> Result<(), RegistryError> {
        let id = ticket.id();
        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        if record.attempt != ticket.attempt {
            return Err(RegistryError::StaleAttempt {
                id: id.to_string(),
                attempt: ticket.attempt,
            });
        }

        let from = record.submission.status;
        if !from.can_transition_to(to) {
            return Err(RegistryError::InvalidTransition {
                id: id.to_string(),
                from,
                to,
            });
        }

        record.submission.status = to;
        apply(record.value_mut());
        debug!(submission_id = id, attempt = ticket.attempt, %from, %to, "Status changed");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Submission, RegistryError> {
        self.records
            .get(id)
            .map(|record| record.submission.clone())
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn get_evaluation(&self, id: &str) -> Result<Evaluation, RegistryError> {
        self.records
            .get(id)
            .and_then(|record| record.evaluation.clone())
            .ok_or_else(|| RegistryError::EvaluationNotFound(id.to_string()))
    }

    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats::default();
        for record in self.records.iter() {
            stats.total += 1;
            match record.submission.status {
                SubmissionStatus::Completed => stats.completed += 1,
                SubmissionStatus::Failed => stats.failed += 1,
                SubmissionStatus::Pending | SubmissionStatus::Analyzing => {}
            }
        }
        stats.pending = stats.total - stats.completed;
        stats
    }
}
