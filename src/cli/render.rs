//! Plain-text rendering of generation results.

use crate::models::{ContentPackage, StrategicReport};
use std::fmt::Write;

/// Renders a content package as text.
#[must_use]
pub fn render_content_package(package: &ContentPackage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Viral Topic Identified: {}", package.topic);
    let _ = writeln!(out);
    let _ = writeln!(out, "Shorts Title");
    let _ = writeln!(out, "  {}", package.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "Video Description");
    let _ = writeln!(out, "  {}", package.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Hashtags");
    let tags: Vec<&str> = package.all_tags().collect();
    let _ = writeln!(out, "  {}", tags.join(" "));
    let _ = writeln!(out);
    let _ = writeln!(out, "3-Point Script Outline");
    let _ = writeln!(out, "  Hook:       {}", package.outline.hook);
    let _ = writeln!(out, "  Main Point: {}", package.outline.main_point);
    let _ = writeln!(out, "  CTA:        {}", package.outline.call_to_action);
    out
}

/// Renders a strategic report as text.
#[must_use]
pub fn render_strategic_report(report: &StrategicReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Top Success Pattern");
    let _ = writeln!(out, "  {}", report.top_success_pattern);
    let _ = writeln!(out);
    let _ = writeln!(out, "Core Weakness");
    let _ = writeln!(out, "  {}", report.core_weakness);
    let _ = writeln!(out);
    let _ = writeln!(out, "30-Day Action Plan");
    for (index, action) in report.action_plan.iter().enumerate() {
        let _ = writeln!(out, "  {}. {action}", index + 1);
    }
    out
}
