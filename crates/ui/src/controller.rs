//! Request lifecycle for one conversation.
//!
//! Submitting is split in two: [`RequestController::submit`] appends the user
//! message and hands back a [`Dispatch`] describing the single outbound call,
//! and [`RequestController::settle`] later appends exactly one assistant entry
//! for that call. Only one turn is ever in flight.

use crate::transcript::{Message, Transcript};

use dashchat_client::{QueryError, QueryRequest, QueryResult};
use dashchat_core::{DashboardContext, PrivacyConfig, redact_prompt};
use std::fmt;

/// Leading text of every assistant entry produced by a failed query.
pub const ERROR_PREFIX: &str = "Error connecting to AI Assistant.";

/// Sequence number of a user turn within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Sending {
        turn: TurnId,
    },
}

/// The outbound call a caller must issue after an accepted submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub turn: TurnId,
    pub request: QueryRequest,
}

/// Assistant text recorded for a failed query.
pub fn failure_message(error: &QueryError) -> String {
    match error.detail() {
        Some(detail) => format!("{ERROR_PREFIX} {detail}"),
        None => ERROR_PREFIX.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct RequestController {
    phase: Phase,
    next_turn: u64,
    dashboard: DashboardContext,
    privacy: PrivacyConfig,
}

impl RequestController {
    pub fn new(dashboard: DashboardContext) -> Self {
        Self { phase: Phase::Idle, next_turn: 1, dashboard, privacy: PrivacyConfig::default() }
    }

    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Sending { .. })
    }

    pub fn dashboard(&self) -> &DashboardContext {
        &self.dashboard
    }

    /// Accept `text` as the next user turn.
    ///
    /// Blank text and submits while a turn is in flight are ignored and
    /// return `None`. Otherwise the untrimmed text is appended as a user
    /// message and the controller moves to `Sending`.
    pub fn submit(&mut self, transcript: &mut Transcript, text: &str) -> Option<Dispatch> {
        if text.trim().is_empty() {
            tracing::debug!("ignoring blank submit");
            return None;
        }
        if let Phase::Sending { turn } = self.phase {
            tracing::debug!(in_flight = %turn, "ignoring submit while a query is in flight");
            return None;
        }

        let turn = TurnId(self.next_turn);
        self.next_turn += 1;

        transcript.append(Message::user(text));
        self.phase = Phase::Sending { turn };

        tracing::debug!(
            turn = %turn,
            dashboard_id = %self.dashboard,
            prompt = %redact_prompt(text, &self.privacy),
            "query dispatched"
        );

        Some(Dispatch { turn, request: QueryRequest::new(self.dashboard.clone(), text) })
    }

    /// Record the outcome of `turn`.
    ///
    /// Returns `false` and leaves the transcript untouched when `turn` is not
    /// the one in flight.
    pub fn settle(
        &mut self, transcript: &mut Transcript, turn: TurnId, outcome: Result<QueryResult, QueryError>,
    ) -> bool {
        match self.phase {
            Phase::Sending { turn: current } if current == turn => {}
            phase => {
                tracing::debug!(turn = %turn, ?phase, "dropping stale settlement");
                return false;
            }
        }

        let message = match outcome {
            Ok(result) => {
                tracing::debug!(
                    turn = %turn,
                    response = %redact_prompt(result.response_text(), &self.privacy),
                    sql_query = ?result.sql_query,
                    "query answered"
                );
                Message::assistant(result.response_text())
            }
            Err(error) => {
                tracing::warn!(turn = %turn, error = %error, "query failed");
                Message::failure(failure_message(&error))
            }
        };

        transcript.append(message);
        self.phase = Phase::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn setup() -> (RequestController, Transcript) {
        (RequestController::new(DashboardContext::Id(7)), Transcript::with_greeting("Welcome!"))
    }

    #[test]
    fn test_submit_appends_user_and_locks() {
        let (mut controller, mut transcript) = setup();
        let dispatch = controller.submit(&mut transcript, "  What is churn?  ").unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.last().unwrap().text(), "  What is churn?  ");
        assert_eq!(dispatch.request.dashboard_id, DashboardContext::Id(7));
        assert_eq!(dispatch.request.prompt, "  What is churn?  ");
        assert!(controller.is_pending());
        assert_eq!(controller.phase(), Phase::Sending { turn: dispatch.turn });
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let (mut controller, mut transcript) = setup();
        assert!(controller.submit(&mut transcript, "").is_none());
        assert!(controller.submit(&mut transcript, " \n\t ").is_none());
        assert_eq!(transcript.len(), 1);
        assert!(!controller.is_pending());
    }

    #[test]
    fn test_submit_while_pending_is_ignored() {
        let (mut controller, mut transcript) = setup();
        controller.submit(&mut transcript, "first").unwrap();
        assert!(controller.submit(&mut transcript, "second").is_none());
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_settle_success() {
        let (mut controller, mut transcript) = setup();
        let dispatch = controller.submit(&mut transcript, "How is revenue?").unwrap();
        assert!(controller.settle(&mut transcript, dispatch.turn, Ok(QueryResult::text("Revenue is up 5%"))));

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().text(), "Revenue is up 5%");
        assert!(!transcript.last().unwrap().is_failure());
        assert!(!controller.is_pending());
    }

    #[test]
    fn test_success_quoting_error_prefix_is_a_reply() {
        let (mut controller, mut transcript) = setup();
        let dispatch = controller.submit(&mut transcript, "what did the log say?").unwrap();
        let answer = format!("{ERROR_PREFIX} is the log line you saw");
        controller.settle(&mut transcript, dispatch.turn, Ok(QueryResult::text(answer.clone())));

        let last = transcript.last().unwrap();
        assert_eq!(last.text(), answer);
        assert!(!last.is_failure());
    }

    #[test]
    fn test_settle_empty_response() {
        let (mut controller, mut transcript) = setup();
        let dispatch = controller.submit(&mut transcript, "anything").unwrap();
        controller.settle(&mut transcript, dispatch.turn, Ok(QueryResult::text("")));
        assert_eq!(transcript.last().unwrap().text(), "No response");
    }

    #[test]
    fn test_settle_failure_then_next_submit() {
        let (mut controller, mut transcript) = setup();
        let dispatch = controller.submit(&mut transcript, "anything").unwrap();
        let error = QueryError::Status { status: 500, message: Some("boom".to_string()) };
        controller.settle(&mut transcript, dispatch.turn, Err(error));

        assert_eq!(transcript.last().unwrap().text(), "Error connecting to AI Assistant. boom");
        assert!(transcript.last().unwrap().is_failure());
        assert!(!controller.is_pending());
        assert!(controller.submit(&mut transcript, "again").is_some());
    }

    #[test]
    fn test_stale_settle_is_ignored() {
        let (mut controller, mut transcript) = setup();
        let first = controller.submit(&mut transcript, "one").unwrap();
        assert!(controller.settle(&mut transcript, first.turn, Ok(QueryResult::text("a"))));
        assert!(!controller.settle(&mut transcript, first.turn, Ok(QueryResult::text("again"))));

        let second = controller.submit(&mut transcript, "two").unwrap();
        assert_ne!(first.turn, second.turn);
        assert!(!controller.settle(&mut transcript, first.turn, Ok(QueryResult::text("late"))));
        assert_eq!(transcript.len(), 4);
        assert!(controller.is_pending());
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message(&QueryError::Timeout(Duration::from_secs(60))),
            "Error connecting to AI Assistant. request timed out after 60s"
        );
        assert_eq!(
            failure_message(&QueryError::Status { status: 502, message: None }),
            "Error connecting to AI Assistant. HTTP 502"
        );
        assert_eq!(failure_message(&QueryError::Transport("   ".to_string())), ERROR_PREFIX);
    }
}
