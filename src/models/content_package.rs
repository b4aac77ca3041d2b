//! Upload package produced by content ideation.

use super::{Shape, is_blank, null_as_default, string_list};
use serde::{Deserialize, Serialize};

/// A complete upload package for one short video.
///
/// Field names on the wire follow the shape declared in the ideation prompt
/// (`viralTopic`, `primaryHashtags`, ...). The shorter names are accepted as
/// aliases when decoding. A `null` field decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPackage {
    /// The trending topic the package is built around.
    #[serde(
        rename = "viralTopic",
        alias = "topic",
        deserialize_with = "null_as_default"
    )]
    pub topic: String,
    /// Short, clickable video title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Two or three sentence description with a hook and a call to action.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Essential high-traffic hashtags.
    #[serde(
        rename = "primaryHashtags",
        alias = "primaryTags",
        deserialize_with = "string_list"
    )]
    pub primary_tags: Vec<String>,
    /// Trending engagement hashtags such as `#fyp`.
    #[serde(
        rename = "engagementHashtags",
        alias = "engagementTags",
        deserialize_with = "string_list"
    )]
    pub engagement_tags: Vec<String>,
    /// Script outline.
    #[serde(deserialize_with = "null_as_default")]
    pub outline: Outline,
}

/// Three-beat script outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Outline {
    /// Opening hook sentence.
    #[serde(deserialize_with = "null_as_default")]
    pub hook: String,
    /// Core point sentence.
    #[serde(deserialize_with = "null_as_default")]
    pub main_point: String,
    /// Closing call to action.
    #[serde(
        rename = "cta",
        alias = "callToAction",
        deserialize_with = "null_as_default"
    )]
    pub call_to_action: String,
}

impl ContentPackage {
    /// All hashtags, primary first, in declaration order.
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.primary_tags
            .iter()
            .chain(&self.engagement_tags)
            .map(String::as_str)
    }
}

impl Shape for ContentPackage {
    const NAME: &'static str = "content package";

    fn required_fields() -> &'static [&'static str] {
        &[
            "viralTopic",
            "title",
            "description",
            "primaryHashtags",
            "engagementHashtags",
            "outline.hook",
            "outline.mainPoint",
            "outline.cta",
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("viralTopic", is_blank(&self.topic)),
            ("title", is_blank(&self.title)),
            ("description", is_blank(&self.description)),
            ("primaryHashtags", self.primary_tags.is_empty()),
            ("engagementHashtags", self.engagement_tags.is_empty()),
            ("outline.hook", is_blank(&self.outline.hook)),
            ("outline.mainPoint", is_blank(&self.outline.main_point)),
            ("outline.cta", is_blank(&self.outline.call_to_action)),
        ];
        checks
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }
}
