//! Strategy service: the three generation calls.

use super::require_text;
use crate::config::ChannelProfile;
use crate::interpreter;
use crate::llm::{GenerationRequest, LlmProvider};
use crate::models::{ContentPackage, StrategicReport};
use crate::{Result, prompts};
use std::sync::Arc;

/// Service that turns user input into model requests and typed results.
///
/// The provider handle is passed in explicitly; the service never creates
/// or caches a client of its own. Every method makes exactly one request.
#[derive(Clone)]
pub struct StrategyService {
    /// Provider used for every request.
    llm: Arc<dyn LlmProvider>,
    /// Channel profile injected into prompts.
    profile: ChannelProfile,
}

impl StrategyService {
    /// Creates a new strategy service.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>, profile: ChannelProfile) -> Self {
        Self { llm, profile }
    }

    /// Generates a search-grounded upload package.
    ///
    /// `insights` is the previous strategic report, if any; it biases topic
    /// selection toward the channel's success pattern.
    ///
    /// # Errors
    ///
    /// Returns a provider error if the request fails, or an interpretation
    /// error if the reply holds no decodable JSON object.
    pub fn generate_content_package(
        &self,
        insights: Option<&StrategicReport>,
    ) -> Result<ContentPackage> {
        let request = GenerationRequest::new(prompts::content_ideation(&self.profile, insights))
            .with_operation("content_ideation")
            .with_search_grounding();

        tracing::debug!(with_insights = insights.is_some(), "Generating content package");
        let raw = self.llm.generate(&request)?;
        interpreter::interpret(&raw)
    }

    /// Generates a single pinned reply to a batch of comments.
    ///
    /// The reply text is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if either input is blank, or a
    /// provider error if the request fails.
    pub fn generate_comment_reply(&self, topic: &str, comments: &str) -> Result<String> {
        Self::validate_reply_input(topic, comments)?;

        let request = GenerationRequest::new(prompts::comment_reply(&self.profile, topic, comments))
            .with_operation("comment_reply");
        self.llm.generate(&request)
    }

    /// Generates a 30-day strategic report from channel performance data.
    ///
    /// The provider is asked to enforce the report schema, so the reply is
    /// decoded as a whole rather than scanned for an embedded object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if any block is blank, a
    /// provider error if the request fails, or
    /// [`crate::Error::MalformedPayload`] if the reply is not valid JSON.
    pub fn generate_strategic_plan(
        &self,
        key_metrics: &str,
        top_videos: &str,
        worst_videos: &str,
    ) -> Result<StrategicReport> {
        Self::validate_plan_input(key_metrics, top_videos, worst_videos)?;

        let request = GenerationRequest::new(prompts::strategic_plan(
            &self.profile,
            key_metrics,
            top_videos,
            worst_videos,
        ))
        .with_operation("strategic_plan")
        .with_response_schema(prompts::strategic_report_schema());

        let raw = self.llm.generate(&request)?;
        interpreter::decode_whole(&raw)
    }

    pub(crate) fn validate_reply_input(topic: &str, comments: &str) -> Result<()> {
        require_text("video topic", topic)?;
        require_text("comments", comments)
    }

    pub(crate) fn validate_plan_input(
        key_metrics: &str,
        top_videos: &str,
        worst_videos: &str,
    ) -> Result<()> {
        require_text("key metrics", key_metrics)?;
        require_text("top videos", top_videos)?;
        require_text("worst videos", worst_videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Mutex;

    /// Returns a fixed reply and records the requests it saw.
    struct FixedProvider {
        reply: String,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl FixedProvider {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<GenerationRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl LlmProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    fn service(provider: &Arc<FixedProvider>) -> StrategyService {
        StrategyService::new(provider.clone(), ChannelProfile::default())
    }

    #[test]
    fn test_content_package_request_uses_search() {
        let provider = FixedProvider::new(
            "Found it!\n```json\n{\"viralTopic\":\"Emus\",\"title\":\"t\"}\n```",
        );
        let package = service(&provider).generate_content_package(None).unwrap();
        assert_eq!(package.topic, "Emus");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].search_grounding);
        assert!(requests[0].response_schema.is_none());
        assert_eq!(requests[0].operation, "content_ideation");
    }

    #[test]
    fn test_content_package_without_json() {
        let provider = FixedProvider::new("Sorry, I could not search right now.");
        let err = service(&provider).generate_content_package(None).unwrap_err();
        assert!(matches!(err, Error::NoStructuredPayload { .. }));
    }

    #[test]
    fn test_comment_reply_is_verbatim() {
        let provider = FixedProvider::new("  Thanks all! The emus send their regards.\n");
        let reply = service(&provider)
            .generate_comment_reply("Emu War", "lol")
            .unwrap();
        assert_eq!(reply, "  Thanks all! The emus send their regards.\n");
        assert!(provider.requests()[0].prompt.contains("Emu War"));
    }

    #[test]
    fn test_comment_reply_rejects_blank_input() {
        let provider = FixedProvider::new("unused");
        let err = service(&provider)
            .generate_comment_reply("   ", "comments")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(provider.requests().is_empty());
    }

    #[test]
    fn test_strategic_plan_requests_schema() {
        let provider = FixedProvider::new(
            r#"{"topSuccessPattern":"p","coreWeakness":"w","actionPlan":["1","2","3"]}"#,
        );
        let report = service(&provider)
            .generate_strategic_plan("m", "t", "w")
            .unwrap();
        assert!(report.has_full_action_plan());

        let requests = provider.requests();
        assert!(!requests[0].search_grounding);
        assert!(requests[0].response_schema.is_some());
    }

    #[test]
    fn test_strategic_plan_rejects_blank_block() {
        let provider = FixedProvider::new("unused");
        let err = service(&provider)
            .generate_strategic_plan("m", "", "w")
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid input: top videos must not be empty");
        assert!(provider.requests().is_empty());
    }

    #[test]
    fn test_strategic_plan_invalid_json() {
        let provider = FixedProvider::new("{\"topSuccessPattern\": \"p\",");
        let err = service(&provider)
            .generate_strategic_plan("m", "t", "w")
            .unwrap_err();
        assert!(matches!(err, Error::MalformedPayload { .. }));
    }
}
