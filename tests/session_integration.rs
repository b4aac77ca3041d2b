//! Session Integration Tests
//!
//! Drives the strategy service and session with a scripted provider:
//! - Feed-forward of the strategic report into ideation
//! - Last-error bookkeeping and partial-result suppression
//! - Input validation before any request is sent
//! - CLI commands rendering session results

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use shortsmith::cli::{self, OutputFormat, PlanArgs};
use shortsmith::llm::{GenerationRequest, LlmProvider};
use shortsmith::{ChannelProfile, Error, Result, StrategicReport, StrategyService, StudioSession};

/// Provider that answers from a queue and records every request.
struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.seen.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {}", request.operation))
    }
}

const REPORT_JSON: &str = r#"{
  "topSuccessPattern": "Myth-busting hooks in the first second",
  "coreWeakness": "Slow intros over three seconds",
  "actionPlan": ["Open on the twist", "Cut intros", "Post at 6pm"]
}"#;

const PACKAGE_REPLY: &str = r##"Here is the package:
```json
{
  "viralTopic": "The Great Emu War",
  "title": "Australia lost a war to birds?",
  "description": "The 1932 campaign that went wrong.",
  "primaryHashtags": ["#history", "#australia"],
  "engagementHashtags": ["#didyouknow"],
  "outline": {"hook": "Birds won.", "mainPoint": "Machine guns failed.", "cta": "Follow for more."}
}
```"##;

fn session(provider: &Arc<ScriptedProvider>) -> StudioSession {
    StudioSession::new(StrategyService::new(
        provider.clone(),
        ChannelProfile::default(),
    ))
}

fn provider_error() -> Error {
    Error::Provider {
        operation: "gemini_request".to_string(),
        cause: "API returned status 503".to_string(),
    }
}

// ============================================================================
// Feed-forward
// ============================================================================

mod feed_forward {
    use super::*;

    #[test]
    fn test_plan_informs_next_ideation() {
        let provider = ScriptedProvider::new(vec![
            Ok(REPORT_JSON.to_string()),
            Ok(PACKAGE_REPLY.to_string()),
        ]);
        let mut session = session(&provider);

        let report = session.plan("12k views", "Emu War", "Tax history").unwrap();
        assert_eq!(report.action_plan.len(), 3);
        assert!(session.insights().is_some());

        let package = session.generate_content().unwrap();
        assert_eq!(package.topic, "The Great Emu War");
        assert_eq!(package.outline.call_to_action, "Follow for more.");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].response_schema.is_some());
        assert!(!requests[0].search_grounding);
        assert!(requests[1].search_grounding);
        assert!(requests[1]
            .prompt
            .contains("Myth-busting hooks in the first second"));
        assert!(requests[1].prompt.contains("Slow intros over three seconds"));
    }

    #[test]
    fn test_ideation_without_plan_has_no_insights() {
        let provider = ScriptedProvider::new(vec![Ok(PACKAGE_REPLY.to_string())]);
        let mut session = session(&provider);

        session.generate_content().unwrap();
        let prompt = &provider.requests()[0].prompt;
        assert!(!prompt.contains("Myth-busting"));
    }

    #[test]
    fn test_failed_plan_keeps_previous_insights() {
        let provider = ScriptedProvider::new(vec![
            Ok(REPORT_JSON.to_string()),
            Err(provider_error()),
        ]);
        let mut session = session(&provider);

        session.plan("metrics", "top", "worst").unwrap();
        let err = session.plan("metrics", "top", "worst").unwrap_err();
        assert!(matches!(err, Error::Provider { .. }));

        assert!(session.strategic_report().is_none());
        assert_eq!(
            session.insights().map(|r| r.core_weakness.as_str()),
            Some("Slow intros over three seconds")
        );
    }

    #[test]
    fn test_seeded_insights_reach_prompt() {
        let provider = ScriptedProvider::new(vec![Ok(PACKAGE_REPLY.to_string())]);
        let saved = StrategicReport {
            top_success_pattern: "Saved pattern".to_string(),
            core_weakness: "Saved weakness".to_string(),
            action_plan: Vec::new(),
        };
        let mut session = session(&provider).with_insights(saved);

        session.generate_content().unwrap();
        assert!(provider.requests()[0].prompt.contains("Saved pattern"));
    }
}

// ============================================================================
// Error bookkeeping
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_unstructured_reply_records_error() {
        let provider = ScriptedProvider::new(vec![Ok("No data available.".to_string())]);
        let mut session = session(&provider);

        let err = session.generate_content().unwrap_err();
        assert!(matches!(err, Error::NoStructuredPayload { .. }));
        assert!(session.content_package().is_none());
        assert!(session
            .last_error()
            .unwrap()
            .starts_with("no structured payload found"));
    }

    #[test]
    fn test_next_action_clears_last_error() {
        let provider = ScriptedProvider::new(vec![
            Err(provider_error()),
            Ok("Thanks everyone, part two is coming!".to_string()),
        ]);
        let mut session = session(&provider);

        assert!(session.respond_to_comments("Emu War", "more please").is_err());
        assert!(session.last_error().is_some());

        let reply = session.respond_to_comments("Emu War", "more please").unwrap();
        assert_eq!(reply, "Thanks everyone, part two is coming!");
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_blank_input_sends_nothing_and_keeps_state() {
        let provider = ScriptedProvider::new(vec![Ok("First reply".to_string())]);
        let mut session = session(&provider);
        session.respond_to_comments("Emu War", "great video").unwrap();

        let err = session.respond_to_comments("Emu War", "   ").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(session.comment_reply(), Some("First reply"));
        assert!(session.last_error().is_none());

        let err = session.plan("", "top", "worst").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(provider.requests().len(), 1);
    }

    #[test]
    fn test_malformed_plan_reply() {
        let provider = ScriptedProvider::new(vec![Ok("Sure, here it is: {".to_string())]);
        let mut session = session(&provider);

        let err = session.plan("metrics", "top", "worst").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload { .. }));
        assert!(session.insights().is_none());
    }

    #[test]
    fn test_clear_drops_everything() {
        let provider = ScriptedProvider::new(vec![Ok(REPORT_JSON.to_string())]);
        let mut session = session(&provider);
        session.plan("metrics", "top", "worst").unwrap();

        session.clear();
        assert!(session.strategic_report().is_none());
        assert!(session.insights().is_none());
    }
}

// ============================================================================
// CLI commands
// ============================================================================

mod commands {
    use super::*;

    fn service(provider: &Arc<ScriptedProvider>) -> StrategyService {
        StrategyService::new(provider.clone(), ChannelProfile::default())
    }

    #[test]
    fn test_plan_then_ideas_json() {
        let provider = ScriptedProvider::new(vec![
            Ok(REPORT_JSON.to_string()),
            Ok(PACKAGE_REPLY.to_string()),
        ]);
        let args = PlanArgs {
            key_metrics: "12k views".to_string(),
            top_videos: "Emu War".to_string(),
            worst_videos: "Tax history".to_string(),
            save: None,
            then_ideas: true,
        };

        let mut out = Vec::new();
        cli::cmd_plan(service(&provider), &args, OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["report"]["actionPlan"][2], "Post at 6pm");
        assert_eq!(value["package"]["viralTopic"], "The Great Emu War");
    }

    #[test]
    fn test_plan_json_keeps_report_when_ideation_fails() {
        let provider = ScriptedProvider::new(vec![
            Ok(REPORT_JSON.to_string()),
            Ok("No data available.".to_string()),
        ]);
        let args = PlanArgs {
            key_metrics: "12k views".to_string(),
            top_videos: "Emu War".to_string(),
            worst_videos: "Tax history".to_string(),
            save: None,
            then_ideas: true,
        };

        let mut out = Vec::new();
        let err = cli::cmd_plan(service(&provider), &args, OutputFormat::Json, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::NoStructuredPayload { .. }));

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["report"]["coreWeakness"], "Slow intros over three seconds");
        assert!(value.get("package").is_none());
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("no structured payload found"));
    }

    #[test]
    fn test_plan_text_keeps_report_when_ideation_fails() {
        let provider = ScriptedProvider::new(vec![
            Ok(REPORT_JSON.to_string()),
            Err(provider_error()),
        ]);
        let args = PlanArgs {
            key_metrics: "m".to_string(),
            top_videos: "t".to_string(),
            worst_videos: "w".to_string(),
            save: None,
            then_ideas: true,
        };

        let mut out = Vec::new();
        assert!(cli::cmd_plan(service(&provider), &args, OutputFormat::Text, &mut out).is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Core Weakness\n  Slow intros over three seconds"));
    }

    #[test]
    fn test_plan_save_then_ideas_with_insights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let provider = ScriptedProvider::new(vec![
            Ok(REPORT_JSON.to_string()),
            Ok(PACKAGE_REPLY.to_string()),
        ]);

        let args = PlanArgs {
            key_metrics: "m".to_string(),
            top_videos: "t".to_string(),
            worst_videos: "w".to_string(),
            save: Some(path.clone()),
            then_ideas: false,
        };
        let mut out = Vec::new();
        cli::cmd_plan(service(&provider), &args, OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("30-Day Action Plan"));
        assert!(text.contains("  1. Open on the twist"));

        let mut out = Vec::new();
        cli::cmd_ideas(service(&provider), Some(&path), OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Viral Topic Identified: The Great Emu War"));
        assert!(provider.requests()[1].prompt.contains("Myth-busting hooks"));
    }

    #[test]
    fn test_reply_json() {
        let provider = ScriptedProvider::new(vec![Ok("Part two drops Friday!\n".to_string())]);
        let mut out = Vec::new();
        cli::cmd_reply(
            &service(&provider),
            "Emu War",
            "sequel?",
            OutputFormat::Json,
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["reply"], "Part two drops Friday!\n");
        assert_eq!(value["topic"], "Emu War");
    }

    #[test]
    fn test_failed_ideas_writes_nothing() {
        let provider = ScriptedProvider::new(vec![Ok("No data available.".to_string())]);
        let mut out = Vec::new();
        let err = cli::cmd_ideas(service(&provider), None, OutputFormat::Text, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::NoStructuredPayload { .. }));
        assert!(out.is_empty());
    }
}
