//! `config` command.

use super::{OutputFormat, to_pretty_json, write_error};
use crate::Result;
use crate::config::StudioConfig;
use crate::llm::GeminiClient;
use std::io::Write;

/// Prints the effective configuration with the API key redacted.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn cmd_config_show<W: Write>(
    config: &StudioConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let source = config
        .source
        .as_ref()
        .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string());
    let model = config
        .llm
        .model
        .as_deref()
        .unwrap_or(GeminiClient::DEFAULT_MODEL);
    let endpoint = config
        .llm
        .base_url
        .as_deref()
        .unwrap_or(GeminiClient::DEFAULT_ENDPOINT);
    let api_key = if config.llm.api_key.is_some() {
        "configured"
    } else {
        "missing"
    };
    let timeout_ms = config.llm.timeout_ms.unwrap_or(0);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "source": source,
                "llm": {
                    "model": model,
                    "endpoint": endpoint,
                    "api_key": api_key,
                    "timeout_ms": timeout_ms,
                },
                "channel": config.channel,
            });
            writeln!(out, "{}", to_pretty_json(&value)?).map_err(write_error)
        },
        OutputFormat::Text => {
            let channel = &config.channel;
            writeln!(out, "Config source:    {source}").map_err(write_error)?;
            writeln!(out, "Model:            {model}").map_err(write_error)?;
            writeln!(out, "Endpoint:         {endpoint}").map_err(write_error)?;
            writeln!(out, "API key:          {api_key}").map_err(write_error)?;
            writeln!(out, "Timeout (ms):     {timeout_ms}").map_err(write_error)?;
            writeln!(out, "Niche:            {}", channel.niche).map_err(write_error)?;
            writeln!(out, "Audience:         {}", channel.audience).map_err(write_error)?;
            writeln!(out, "Max length (s):   {}", channel.max_video_seconds).map_err(write_error)?;
            writeln!(out, "Trend window (h): {}", channel.trend_window_hours).map_err(write_error)?;
            writeln!(out, "Growth goal:      {}", channel.growth_goal).map_err(write_error)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_redacts_api_key() {
        let mut config = StudioConfig::default();
        config.llm.api_key = Some("AIzaSecretValue".to_string());

        let mut out = Vec::new();
        cmd_config_show(&config, OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("API key:          configured"));
        assert!(!text.contains("AIzaSecretValue"));
        assert!(text.contains("Model:            gemini-2.5-flash"));
    }

    #[test]
    fn test_show_json() {
        let mut out = Vec::new();
        cmd_config_show(&StudioConfig::default(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["llm"]["api_key"], "missing");
        assert_eq!(value["channel"]["niche"], "World History and Culture");
    }
}
