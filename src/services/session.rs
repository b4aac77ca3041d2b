//! In-memory session state.
//!
//! Holds the latest result of each action plus the strategic report that is
//! fed forward into ideation. Nothing here outlives the process.

use super::StrategyService;
use crate::models::{ContentPackage, StrategicReport};
use crate::{Error, Result};

/// Session that serializes actions and keeps their latest results.
///
/// Each action clears its previous result and the last error before the
/// request starts. On failure the error message is kept and no partial
/// result is stored. Blank input is rejected without touching state.
pub struct StudioSession {
    service: StrategyService,
    content_package: Option<ContentPackage>,
    comment_reply: Option<String>,
    strategic_report: Option<StrategicReport>,
    insights: Option<StrategicReport>,
    last_error: Option<String>,
}

impl StudioSession {
    /// Creates an empty session.
    #[must_use]
    pub const fn new(service: StrategyService) -> Self {
        Self {
            service,
            content_package: None,
            comment_reply: None,
            strategic_report: None,
            insights: None,
            last_error: None,
        }
    }

    /// Seeds the feed-forward context, e.g. from a previously saved report.
    #[must_use]
    pub fn with_insights(mut self, insights: StrategicReport) -> Self {
        self.insights = Some(insights);
        self
    }

    /// Generates a content package, using the stored insights if any.
    ///
    /// # Errors
    ///
    /// Returns the service error; its message is also kept as the last error.
    pub fn generate_content(&mut self) -> Result<&ContentPackage> {
        self.content_package = None;
        self.last_error = None;

        let result = self
            .service
            .generate_content_package(self.insights.as_ref());
        let package = self.settle(result)?;
        Ok(self.content_package.insert(package))
    }

    /// Generates a reply to a batch of comments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for blank input, or the service error.
    pub fn respond_to_comments(&mut self, topic: &str, comments: &str) -> Result<&str> {
        StrategyService::validate_reply_input(topic, comments)?;
        self.comment_reply = None;
        self.last_error = None;

        let result = self.service.generate_comment_reply(topic, comments);
        let reply = self.settle(result)?;
        Ok(self.comment_reply.insert(reply))
    }

    /// Generates a strategic plan and stores it as the new feed-forward context.
    ///
    /// A failed plan leaves the previous insights in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for blank input, or the service error.
    pub fn plan(
        &mut self,
        key_metrics: &str,
        top_videos: &str,
        worst_videos: &str,
    ) -> Result<&StrategicReport> {
        StrategyService::validate_plan_input(key_metrics, top_videos, worst_videos)?;
        self.strategic_report = None;
        self.last_error = None;

        let result = self
            .service
            .generate_strategic_plan(key_metrics, top_videos, worst_videos);
        let report = self.settle(result)?;
        tracing::info!("Strategic report stored as ideation context");
        self.insights = Some(report.clone());
        Ok(self.strategic_report.insert(report))
    }

    /// Records a failure message and passes the result through.
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        result.inspect_err(|err: &Error| {
            tracing::error!(error = %err, "Generation failed");
            self.last_error = Some(err.to_string());
        })
    }

    /// The latest content package.
    #[must_use]
    pub const fn content_package(&self) -> Option<&ContentPackage> {
        self.content_package.as_ref()
    }

    /// The latest comment reply.
    #[must_use]
    pub fn comment_reply(&self) -> Option<&str> {
        self.comment_reply.as_deref()
    }

    /// The latest strategic report.
    #[must_use]
    pub const fn strategic_report(&self) -> Option<&StrategicReport> {
        self.strategic_report.as_ref()
    }

    /// The report fed forward into the next ideation request.
    #[must_use]
    pub const fn insights(&self) -> Option<&StrategicReport> {
        self.insights.as_ref()
    }

    /// Message of the most recent failure, cleared when the next action starts.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Drops every stored result and the feed-forward context.
    pub fn clear(&mut self) {
        self.content_package = None;
        self.comment_reply = None;
        self.strategic_report = None;
        self.insights = None;
        self.last_error = None;
    }
}
