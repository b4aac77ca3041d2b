//! Channel profile injected into every prompt.

use serde::{Deserialize, Serialize};

/// Describes the channel the prompts are written for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelProfile {
    /// Content niche, e.g. "World History and Culture".
    pub niche: String,
    /// Maximum video length in seconds.
    pub max_video_seconds: u32,
    /// Target audience description.
    pub audience: String,
    /// Growth goal stated to the planner.
    pub growth_goal: String,
    /// How far back the trend search looks, in hours.
    pub trend_window_hours: u32,
}

impl Default for ChannelProfile {
    fn default() -> Self {
        Self {
            niche: "World History and Culture".to_string(),
            max_video_seconds: 30,
            audience: "US Gen Z / young adults".to_string(),
            growth_goal: "Increase average views by 25% next month".to_string(),
            trend_window_hours: 48,
        }
    }
}

impl ChannelProfile {
    /// Sets the niche.
    #[must_use]
    pub fn with_niche(mut self, niche: impl Into<String>) -> Self {
        self.niche = niche.into();
        self
    }

    /// Sets the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }
}
