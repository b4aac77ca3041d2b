//! Prompt templates.
//!
//! Three fixed templates, parameterized by user text and the
//! [`ChannelProfile`]. User text is inserted verbatim between `---` fences.

use crate::config::ChannelProfile;
use crate::llm::ResponseSchema;
use crate::models::{ACTION_PLAN_LEN, StrategicReport};

/// JSON shape the ideation prompt asks the model to return.
const CONTENT_PACKAGE_SHAPE: &str = r##"{
  "viralTopic": "The single viral topic/event/fact you discovered.",
  "title": "A short, clickable title that is a question or a shocking claim (max 60 chars).",
  "description": "2-3 sentences max. The first sentence must be a strong hook/summary. Include a call-to-action to drop a comment or share.",
  "primaryHashtags": ["an", "array", "of", "4 essential, high-traffic hashtags"],
  "engagementHashtags": ["an", "array", "of", "3 viral/trending hashtags like #fyp"],
  "outline": {
    "hook": "A 1-sentence hook for the script.",
    "mainPoint": "A 1-sentence core point for the script.",
    "cta": "A 1-sentence call to action for the script."
  }
}"##;

/// Builds the content ideation prompt.
///
/// When `insights` is present, the prior report's success pattern and core
/// weakness are quoted and the model is told to favor the former and avoid
/// the latter while searching.
#[must_use]
pub fn content_ideation(profile: &ChannelProfile, insights: Option<&StrategicReport>) -> String {
    let insights_section = insights.map_or_else(String::new, |report| {
        format!(
            r#"
IMPORTANT ADDITIONAL CONTEXT FROM THE CHANNEL'S OWN DATA:
- Top Success Pattern to Emulate: "{pattern}"
- Core Weakness to Avoid: "{weakness}"

When you search for a viral topic, you MUST prioritize topics that align with the channel's success pattern and actively avoid topics that exhibit the core weakness.
"#,
            pattern = report.top_success_pattern,
            weakness = report.core_weakness,
        )
    });

    format!(
        r#"You are a highly innovative, viral YouTube Shorts strategist. Your goal is to maximize viewer retention and engagement with the content idea you generate.

CONTEXT:
- Video Niche: {niche}.
- Max Video Length: {seconds} seconds.
- Target Audience: {audience}.
{insights_section}
TASK STEP 1: REQUIRED. Use your Google Search tool to find and analyze the single most viral and relevant topic/event/fact in the "{niche}" niche on YouTube Shorts or TikTok in the last {hours} hours.

TASK STEP 2: Use the viral topic found in STEP 1 as the primary subject for the content package.

TASK STEP 3: Generate the full YouTube upload package for the topic. Return the output as a single raw JSON object string, without any markdown formatting.

The JSON object must have the following structure:
{shape}
"#,
        niche = profile.niche,
        seconds = profile.max_video_seconds,
        audience = profile.audience,
        hours = profile.trend_window_hours,
        shape = CONTENT_PACKAGE_SHAPE,
    )
}

/// Builds the comment reply prompt.
#[must_use]
pub fn comment_reply(profile: &ChannelProfile, topic: &str, comments: &str) -> String {
    format!(
        r#"You are a fun, witty, and engaging YouTube creator specializing in {niche}. Your task is to write a single, concise, and conversational response to a batch of comments from one of your videos.

Read the video topic and the comments provided. Then write a single reply that you can pin to the top of the comments section.

Your response should:
- Be friendly and appreciative.
- Acknowledge the general sentiment or main questions from the comments.
- Avoid being generic. Make it feel personal and fun.
- Keep it relatively short and easy to read.

Video Topic: "{topic}"

User Comments:
---
{comments}
---

Your response:
"#,
        niche = profile.niche.to_lowercase(),
    )
}

/// Builds the strategic plan prompt.
#[must_use]
pub fn strategic_plan(
    profile: &ChannelProfile,
    key_metrics: &str,
    top_videos: &str,
    worst_videos: &str,
) -> String {
    format!(
        r#"You are a high-level YouTube Content Strategist for the '{niche}' niche. Your audience is {audience}. Your task is to analyze the channel's recent performance data and generate a clear, concise 30-day action plan to improve average retention and view counts.

CONTEXT:
- Goal: {goal}.
- Analysis Period: The last 30 days of performance data.

TASK:
Analyze the following three blocks of data: Key Metrics, Top 5 Videos, and Worst 5 Videos. Based on a holistic analysis of all provided data, generate a strategic report containing only these three sections:

1.  **Top Success Pattern:** Identify and describe the single most impactful element (e.g., topic choice, specific hook style, controversial claim) that is common ONLY to the Best Performing videos.
2.  **Core Weakness:** Identify the single biggest failure point (e.g., confusing titles, slow hooks, niche topics) common ONLY to the Worst Performing videos.
3.  **30-Day Action Plan:** Generate a list of {items} specific, actionable instructions or content themes for the next 30 days. These must directly leverage the 'Top Success Pattern' and eliminate the 'Core Weakness', and should also consider the overall channel Key Metrics.

Here is the performance data:
---
**KEY METRICS:**
{key_metrics}
---
**TOP 5 VIDEOS:**
{top_videos}
---
**WORST 5 VIDEOS:**
{worst_videos}
---
"#,
        niche = profile.niche,
        audience = profile.audience,
        goal = profile.growth_goal,
        items = ACTION_PLAN_LEN,
    )
}

/// Response schema the provider enforces for the strategic plan.
#[must_use]
pub fn strategic_report_schema() -> ResponseSchema {
    ResponseSchema::object()
        .with_required(
            "topSuccessPattern",
            ResponseSchema::string().with_description(
                "The single most impactful element common ONLY to the Best Performing videos.",
            ),
        )
        .with_required(
            "coreWeakness",
            ResponseSchema::string().with_description(
                "The single biggest failure point common ONLY to the Worst Performing videos.",
            ),
        )
        .with_required(
            "actionPlan",
            ResponseSchema::array(ResponseSchema::string()).with_description(format!(
                "A list of {ACTION_PLAN_LEN} specific, actionable instructions for the next 30 days."
            )),
        )
}
