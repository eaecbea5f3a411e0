//! Markup helpers for Slack mrkdwn, Block Kit, and Discord embeds.

use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};

/// Discord's "blurple", the default embed color.
pub const DISCORD_BLURPLE: u32 = 0x5865F2;

fn replace_all(text: &str, pattern: &str, replacement: &str) -> String {
    match Regex::new(pattern) {
        Ok(re) => re.replace_all(text, replacement).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Convert common markdown to Slack mrkdwn.
///
/// `**bold**` becomes `*bold*`, `~~strike~~` becomes `~strike~`, and
/// `[text](url)` becomes `<url|text>`. Everything else passes through.
pub fn markdown_to_slack(text: &str) -> String {
    let text = replace_all(text, r"\*\*(.+?)\*\*", "*$1*");
    let text = replace_all(&text, r"~~(.+?)~~", "~$1~");
    replace_all(&text, r"\[(.+?)\]\((.+?)\)", "<$2|$1>")
}

/// Discord renders standard markdown, so text is sent unchanged.
pub fn markdown_to_discord(text: &str) -> String {
    text.to_string()
}

/// Build Block Kit blocks: optional header, a mrkdwn section, optional
/// context footer, optional divider.
pub fn slack_blocks(
    text: &str,
    header: Option<&str>,
    footer: Option<&str>,
    divider: bool,
) -> Vec<Value> {
    let mut blocks = Vec::new();

    if let Some(header) = header {
        blocks.push(json!({
            "type": "header",
            "text": {"type": "plain_text", "text": header, "emoji": true},
        }));
    }

    blocks.push(json!({
        "type": "section",
        "text": {"type": "mrkdwn", "text": markdown_to_slack(text)},
    }));

    if let Some(footer) = footer {
        blocks.push(json!({
            "type": "context",
            "elements": [{"type": "mrkdwn", "text": footer}],
        }));
    }

    if divider {
        blocks.push(json!({"type": "divider"}));
    }

    blocks
}

/// Strip colons and map Slack-only aliases to their common names.
pub fn normalize_emoji(emoji: &str) -> String {
    let name = emoji.trim().trim_matches(':');
    match name {
        "+1" => "thumbsup".to_string(),
        "-1" => "thumbsdown".to_string(),
        other => other.to_string(),
    }
}

/// A Discord embed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordEmbed {
    /// Embed title.
    pub title: String,
    /// Markdown body.
    pub description: String,
    /// Sidebar color as `0xRRGGBB`.
    pub color: u32,
    /// Name/value rows.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    /// Footer line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedText>,
    /// Thumbnail image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
}

/// One row of a [`DiscordEmbed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    /// Row label.
    pub name: String,
    /// Row value.
    pub value: String,
    /// Render side by side with neighbouring inline fields.
    pub inline: bool,
}

/// Text wrapper used by embed footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedText {
    /// The text.
    pub text: String,
}

/// Image wrapper used by embed thumbnails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedImage {
    /// Image URL.
    pub url: String,
}

impl DiscordEmbed {
    /// Create an embed with the default color.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: markdown_to_discord(&description.into()),
            color: DISCORD_BLURPLE,
            fields: Vec::new(),
            footer: None,
            thumbnail: None,
        }
    }

    /// Override the sidebar color.
    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Set the footer text.
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedText { text: text.into() });
        self
    }

    /// Set the thumbnail image.
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(EmbedImage { url: url.into() });
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_slack() {
        assert_eq!(markdown_to_slack("**done** now"), "*done* now");
        assert_eq!(markdown_to_slack("~~old~~"), "~old~");
        assert_eq!(
            markdown_to_slack("see [docs](https://example.com)"),
            "see <https://example.com|docs>"
        );
        assert_eq!(markdown_to_slack("_italic_ `code`"), "_italic_ `code`");
    }

    #[test]
    fn test_markdown_to_discord_is_identity() {
        assert_eq!(markdown_to_discord("**bold**"), "**bold**");
    }

    #[test]
    fn test_slack_blocks_layout() {
        let blocks = slack_blocks("**Deploy** finished", Some("CI"), Some("run #42"), true);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[1]["text"]["text"], "*Deploy* finished");
        assert_eq!(blocks[2]["elements"][0]["text"], "run #42");
        assert_eq!(blocks[3]["type"], "divider");

        assert_eq!(slack_blocks("plain", None, None, false).len(), 1);
    }

    #[test]
    fn test_normalize_emoji() {
        assert_eq!(normalize_emoji(":rocket:"), "rocket");
        assert_eq!(normalize_emoji("+1"), "thumbsup");
        assert_eq!(normalize_emoji(":-1:"), "thumbsdown");
        assert_eq!(normalize_emoji("white_check_mark"), "white_check_mark");
    }

    #[test]
    fn test_embed_serialization() {
        let embed = DiscordEmbed::new("Build", "All **green**")
            .field("Tests", "412 passed", true)
            .footer("ci");
        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["color"], DISCORD_BLURPLE);
        assert_eq!(json["fields"][0]["inline"], true);
        assert_eq!(json["footer"]["text"], "ci");
        assert!(json.get("thumbnail").is_none());
    }
}
