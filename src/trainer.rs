//! Trainer orchestration — the send-daily and check-replies flows.
//!
//! check-replies processes at most one reply per run. The state transition
//! to Processed is the last step, so a failure anywhere upstream leaves the
//! exercise Pending and the whole run safely retryable.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::exercise::select_daily_exercise;
use crate::feedback;
use crate::ingest;
use crate::mail::{Inbox, Outbox, compose};
use crate::state::ExerciseTracker;

/// How many reply candidates to consider per check run.
const REPLY_LIMIT: usize = 5;

/// A reply candidate that survived classification and extraction.
#[derive(Debug, Clone)]
pub struct ReplyCandidate {
    pub subject: String,
    pub cleaned_body: String,
    pub sentences: Vec<String>,
    pub message_id: String,
    pub uid: String,
}

/// Outcome of a send-daily run.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub verb: String,
}

/// Outcome of a check-replies run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No exercise has been sent yet.
    NoPending,
    /// The current exercise already received its correction cycle.
    AlreadyProcessed,
    /// No classified reply with extractable sentences was found.
    NoReply,
    /// Feedback was evaluated and sent.
    FeedbackSent { sentences: usize },
}

/// Wires the exercise tracker and mail transports into the two flows.
pub struct Trainer {
    inbox: Arc<dyn Inbox>,
    outbox: Arc<dyn Outbox>,
    exercises: ExerciseTracker,
    target: String,
}

impl Trainer {
    pub fn new(
        inbox: Arc<dyn Inbox>,
        outbox: Arc<dyn Outbox>,
        exercises: ExerciseTracker,
        target: impl Into<String>,
    ) -> Self {
        Self {
            inbox,
            outbox,
            exercises,
            target: target.into(),
        }
    }

    /// Select today's exercise, persist it, and dispatch the prompt email.
    ///
    /// The record is saved before the send so a dispatch failure leaves a
    /// pending exercise rather than an email with no record behind it.
    pub async fn send_daily(&self, seed: Option<u64>) -> Result<SendOutcome> {
        let exercise = select_daily_exercise(seed);
        self.exercises
            .save(&exercise.verb, &exercise.assignments, None)
            .await?;

        let subject = compose::exercise_subject(&exercise.verb);
        let (plain, html) = compose::exercise_body(&exercise.verb, &exercise.assignments);
        self.outbox
            .send(&self.target, &subject, &plain, Some(&html))
            .await?;

        info!(verb = %exercise.verb, "Sent daily exercise");
        Ok(SendOutcome {
            verb: exercise.verb,
        })
    }

    /// Process at most one reply to the pending exercise.
    pub async fn check_replies(&self, evaluator: &dyn Evaluator) -> Result<CheckOutcome> {
        let Some((verb, assignments)) = self.exercises.get_pending().await else {
            return Ok(if self.exercises.is_processed().await {
                CheckOutcome::AlreadyProcessed
            } else {
                CheckOutcome::NoPending
            });
        };

        let Some(reply) = self.find_reply().await? else {
            return Ok(CheckOutcome::NoReply);
        };

        info!(sentences = reply.sentences.len(), verb = %verb, "Evaluating reply");
        let evaluation = evaluator
            .evaluate(&verb, &assignments, &reply.sentences)
            .await?;

        let sections = feedback::format_sections(&evaluation.results);
        let tables = feedback::format_conjugation_tables(&evaluation.tables);
        let subject = compose::feedback_subject(&verb);
        let (plain, html) =
            compose::feedback_body(&verb, &sections, &tables, &evaluation.encouragement);
        self.outbox
            .send(&self.target, &subject, &plain, Some(&html))
            .await?;

        if let Err(e) = self.inbox.mark_seen(&reply.uid).await {
            warn!(uid = %reply.uid, "Could not acknowledge reply: {e}");
        }

        self.exercises.mark_processed().await?;
        info!("Feedback email sent");
        Ok(CheckOutcome::FeedbackSent {
            sentences: reply.sentences.len(),
        })
    }

    /// The most recent classified reply with extractable sentences.
    async fn find_reply(&self) -> Result<Option<ReplyCandidate>> {
        let candidates = self.inbox.fetch_recent(REPLY_LIMIT).await?;
        for email in candidates {
            if !ingest::is_reply_to_exercise(&email.subject) {
                continue;
            }
            let cleaned = ingest::strip_quotes_and_signature(&email.body);
            let sentences = ingest::extract_sentences(&cleaned, ingest::MAX_SENTENCES);
            if sentences.is_empty() {
                debug!(subject = %email.subject, "Classified reply had no extractable sentences");
                continue;
            }
            return Ok(Some(ReplyCandidate {
                subject: email.subject,
                cleaned_body: cleaned,
                sentences,
                message_id: email.message_id,
                uid: email.uid,
            }));
        }
        Ok(None)
    }
}
