use super::InputState;
use crate::controller::{Dispatch, RequestController, TurnId};
use crate::transcript::Transcript;

use dashchat_client::{QueryError, QueryResult};
use dashchat_core::{DashboardContext, PrivacyConfig};

/// One mounted conversation: transcript, draft and request lifecycle.
///
/// Created when the panel opens and dropped when it closes, so history never
/// outlives the panel.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    pub draft: InputState,
    controller: RequestController,
}

impl ChatSession {
    pub fn new(greeting: impl Into<String>, dashboard: DashboardContext) -> Self {
        Self {
            transcript: Transcript::with_greeting(greeting),
            draft: InputState::new(),
            controller: RequestController::new(dashboard),
        }
    }

    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.controller = self.controller.with_privacy(privacy);
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.controller.is_pending()
    }

    pub fn dashboard(&self) -> &DashboardContext {
        self.controller.dashboard()
    }

    /// Submit the current draft. The draft is cleared only when accepted.
    pub fn submit_draft(&mut self) -> Option<Dispatch> {
        let dispatch = self.controller.submit(&mut self.transcript, self.draft.text())?;
        self.draft.take();
        Some(dispatch)
    }

    /// Submit `text` directly, leaving the draft alone
    pub fn submit(&mut self, text: &str) -> Option<Dispatch> {
        self.controller.submit(&mut self.transcript, text)
    }

    pub fn settle(&mut self, turn: TurnId, outcome: Result<QueryResult, QueryError>) -> bool {
        self.controller.settle(&mut self.transcript, turn, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_greeting_only() {
        let session = ChatSession::new("Welcome!", DashboardContext::UNSET);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().snapshot()[0].text(), "Welcome!");
        assert!(!session.is_pending());
    }

    #[test]
    fn test_submit_draft_clears_draft() {
        let mut session = ChatSession::new("Welcome!", DashboardContext::Id(3));
        session.draft.insert_str("What is churn?");
        let dispatch = session.submit_draft().unwrap();

        assert!(session.draft.is_empty());
        assert!(session.is_pending());
        assert_eq!(dispatch.request.prompt, "What is churn?");
        assert_eq!(dispatch.request.dashboard_id, DashboardContext::Id(3));
    }

    #[test]
    fn test_rejected_submit_keeps_draft() {
        let mut session = ChatSession::new("Welcome!", DashboardContext::UNSET);
        session.draft.insert_str("first");
        session.submit_draft().unwrap();

        session.draft.insert_str("second");
        assert!(session.submit_draft().is_none());
        assert_eq!(session.draft.text(), "second");
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_len_after_turns() {
        let mut session = ChatSession::new("Welcome!", DashboardContext::UNSET);
        for n in 1..=3 {
            let dispatch = session.submit(&format!("question {n}")).unwrap();
            assert!(session.settle(dispatch.turn, Ok(QueryResult::text(format!("answer {n}")))));
            assert_eq!(session.transcript().len(), 1 + 2 * n);
        }
    }
}
