use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::EmojiName;

/// Strings that look like `:token:` in real messages but are not emoji
/// (AWS regions, CSS units, URL fragments, ...).
pub const DEFAULT_EXCLUDED: &[&str] = &[
    "us-east-1",
    "aws",
    "hcc",
    "2em",
    "chs",
    "4di4354",
    "6di",
    "hbrreprint",
    "hc",
    "abt",
    "li",
    "so",
    "or",
];

/// Slack writes skin tones as a separate `:skin-tone-N:` token.
pub const DEFAULT_SKIN_TONE_MARKER: &str = "skin-tone";

#[allow(clippy::expect_used)]
static EMOJI_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_-]+?):").expect("emoji token regex"));

/// Finds emoji short-codes in message text.
#[derive(Debug, Clone)]
pub struct EmojiExtractor {
    excluded: HashSet<String>,
    skin_tone_marker: String,
}

impl Default for EmojiExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED.iter().copied(), DEFAULT_SKIN_TONE_MARKER)
    }
}

impl EmojiExtractor {
    pub fn new<I, S>(excluded: I, skin_tone_marker: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: excluded.into_iter().map(Into::into).collect(),
            skin_tone_marker: skin_tone_marker.into(),
        }
    }

    /// Extract the emoji names used in `text`, in order and with repetitions.
    ///
    /// A skin tone written right after an emoji (`:wave::skin-tone-3:`) is read
    /// as part of that emoji, so the whole compound is discarded together with
    /// the modifier.
    pub fn extract(&self, text: Option<&str>) -> Vec<EmojiName> {
        let Some(text) = text else {
            return Vec::new();
        };

        let mut tokens: Vec<String> = Vec::new();
        let mut previous_end = None;

        for captures in EMOJI_TOKEN.captures_iter(text) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let name = name.as_str();

            match tokens.last_mut() {
                Some(previous)
                    if previous_end == Some(whole.start()) && self.is_skin_tone(name) =>
                {
                    previous.push_str("::");
                    previous.push_str(name);
                }
                _ => tokens.push(name.to_string()),
            }
            previous_end = Some(whole.end());
        }

        tokens.retain(|token| self.is_emoji_name(token));
        tokens
    }

    /// Whether a token that matched the `:name:` grammar names a real emoji.
    pub fn is_emoji_name(&self, token: &str) -> bool {
        !self.excluded.contains(token) && !is_number(token) && !self.is_skin_tone(token)
    }

    fn is_skin_tone(&self, token: &str) -> bool {
        !self.skin_tone_marker.is_empty() && token.contains(&self.skin_tone_marker)
    }
}

// "nan" and "inf" parse as floats but are words here.
fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Extract emoji names with the default exclusion list and skin-tone marker.
pub fn extract_emoji_names(text: &str) -> Vec<EmojiName> {
    EmojiExtractor::default().extract(Some(text))
}
