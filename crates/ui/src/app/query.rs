use super::App;
use crate::controller::{Dispatch, TurnId};

use dashchat_client::{QueryError, QueryResult};
use std::time::Instant;

/// Completion of one outbound query, sent back to the UI loop
#[derive(Debug)]
pub struct QueryEvent {
    /// Session the query was issued from
    pub epoch: u64,
    pub turn: TurnId,
    pub outcome: Result<QueryResult, QueryError>,
}

impl App {
    /// Issue the single outbound call for `dispatch` on a background task.
    ///
    /// The task races the call against the session's cancellation token, so
    /// closing the panel abandons it without sending a completion.
    pub(crate) fn spawn_query(&self, epoch: u64, dispatch: Dispatch) {
        let service = self.service.clone();
        let tx = self.query_tx.clone();
        let token = self.session_token.clone();
        let Dispatch { turn, request } = dispatch;

        tokio::spawn(async move {
            let started = Instant::now();
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(epoch, turn = %turn, "query abandoned with its session");
                }
                outcome = service.query(request) => {
                    tracing::debug!(
                        epoch,
                        turn = %turn,
                        ok = outcome.is_ok(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "query finished"
                    );
                    if tx.send(QueryEvent { epoch, turn, outcome }).is_err() {
                        tracing::debug!(epoch, turn = %turn, "ui loop gone, dropping query result");
                    }
                }
            }
        });
    }

    /// Wait for the next query completion.
    pub async fn recv_query_event(&mut self) -> Option<QueryEvent> {
        self.query_rx.recv().await
    }

    /// Apply a completion to the session that issued it.
    ///
    /// Returns whether the transcript changed.
    pub fn handle_query_event(&mut self, event: QueryEvent) -> bool {
        let QueryEvent { epoch, turn, outcome } = event;
        if epoch != self.state.epoch() {
            tracing::debug!(epoch, current = self.state.epoch(), turn = %turn, "dropping result from closed session");
            return false;
        }
        match self.state.session_mut() {
            Some(session) => session.settle(turn, outcome),
            None => {
                tracing::debug!(epoch, turn = %turn, "dropping result, panel closed");
                false
            }
        }
    }
}
