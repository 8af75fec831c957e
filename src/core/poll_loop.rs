use crate::core::tracker::ChangeTracker;
use crate::core::{extractor, validator};
use crate::core::{Notifier, Result, StatusApi, StatusUpdate, TrackedState};
use crate::utils::error::BotError;
use chrono::Utc;
use std::time::Duration;

/// Prefix of every failure message sent to the user.
pub const ERROR_PREFIX: &str = "Сбой в работе программы";

/// What a single poll cycle ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The homework list was empty.
    NothingToReport,
    /// A new status message was produced; `delivered` is false when the notifier failed.
    StatusChanged { delivered: bool },
    /// Same status message as the one already sent.
    StatusUnchanged,
    /// Fetch, validation or extraction failed. `reported` tells whether the
    /// message was new and handed to the notifier.
    Failed { message: String, reported: bool },
}

pub struct PollLoop<A: StatusApi, N: Notifier> {
    api: A,
    notifier: N,
    chat_id: String,
    retry_period: Duration,
    tracker: ChangeTracker,
    cursor: i64,
}

impl<A: StatusApi, N: Notifier> PollLoop<A, N> {
    /// Starts watching from the current moment.
    pub fn new(api: A, notifier: N, chat_id: impl Into<String>, retry_period: Duration) -> Self {
        Self {
            api,
            notifier,
            chat_id: chat_id.into(),
            retry_period,
            tracker: ChangeTracker::new(),
            cursor: Utc::now().timestamp(),
        }
    }

    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn state(&self) -> TrackedState {
        TrackedState {
            last_status_message: self.tracker.last_status().map(str::to_string),
            last_error_message: self.tracker.last_error().map(str::to_string),
            cursor: self.cursor,
        }
    }

    /// Polls forever, sleeping `retry_period` between cycles.
    pub async fn run(&mut self) {
        tracing::info!(
            "🚀 Watching homework statuses every {:?} (from {})",
            self.retry_period,
            self.cursor
        );
        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(?outcome, cursor = self.cursor, "Cycle finished");
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One fetch-validate-extract-notify pass. Never fails: every error is
    /// logged and turned into a `CycleOutcome::Failed`.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let since = self.cursor;
        match self.poll(since).await {
            Ok((update, current_date)) => {
                self.cursor = current_date.unwrap_or_else(|| Utc::now().timestamp());
                match update {
                    None => {
                        tracing::debug!("No homework status changes since {}", since);
                        CycleOutcome::NothingToReport
                    }
                    Some(update) => self.report_status(update).await,
                }
            }
            Err(err) => self.report_failure(err).await,
        }
    }

    async fn poll(&self, since: i64) -> Result<(Option<StatusUpdate>, Option<i64>)> {
        tracing::debug!("Requesting homework statuses from {}", since);
        let raw = self.api.fetch(since).await?;
        let payload = validator::validate(&raw)?;
        let update = extractor::extract(&payload)?;
        Ok((update, payload.current_date))
    }

    async fn report_status(&mut self, update: StatusUpdate) -> CycleOutcome {
        tracing::debug!(
            homework = %update.record.homework_name,
            verdict = update.record.verdict.code(),
            date_updated = ?update.record.date_updated,
            "{}",
            update.message
        );

        if !self.tracker.should_notify_status(&update.message) {
            tracing::debug!("Status unchanged, nothing sent");
            return CycleOutcome::StatusUnchanged;
        }

        let delivered = self.deliver(&update.message).await;
        CycleOutcome::StatusChanged { delivered }
    }

    async fn report_failure(&mut self, err: BotError) -> CycleOutcome {
        let message = format!("{}: {}", ERROR_PREFIX, err);
        tracing::error!(category = ?err.category(), "{}", message);

        let reported = self.tracker.should_notify_error(&message);
        if reported {
            self.deliver(&message).await;
        } else {
            tracing::debug!("Failure already reported, nothing sent");
        }

        CycleOutcome::Failed { message, reported }
    }

    /// Delivery failures stop here.
    async fn deliver(&self, text: &str) -> bool {
        match self.notifier.send(&self.chat_id, text).await {
            Ok(()) => {
                tracing::debug!("Message \"{}\" sent", text);
                true
            }
            Err(e) => {
                tracing::error!(category = ?e.category(), "Failed to send \"{}\": {}", text, e);
                false
            }
        }
    }
}
