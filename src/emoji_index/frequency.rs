use std::collections::BTreeMap;

use serde::Serialize;

use super::tally::UserEmojiTally;

/// Emoji a user used exactly `count` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyGroup {
    pub count: u64,
    pub glyphs: Vec<String>,
}

/// Render an emoji name as its unicode glyph.
///
/// Slack spells some short-codes with hyphens where the unicode tables use
/// underscores, so both spellings are tried. Unknown names (custom workspace
/// emoji) are returned unchanged.
pub fn resolve_glyph(name: &str) -> String {
    if let Some(emoji) = emojis::get_by_shortcode(name) {
        return emoji.as_str().to_string();
    }
    if name.contains('-')
        && let Some(emoji) = emojis::get_by_shortcode(&name.replace('-', "_"))
    {
        return emoji.as_str().to_string();
    }
    name.to_string()
}

/// Group a tally by count, ascending, with glyphs in tally order.
pub fn group_by_frequency(tally: &UserEmojiTally) -> Vec<FrequencyGroup> {
    let mut by_count: BTreeMap<u64, Vec<String>> = BTreeMap::new();
    for (name, count) in tally.iter() {
        by_count.entry(count).or_default().push(resolve_glyph(name));
    }

    by_count
        .into_iter()
        .map(|(count, glyphs)| FrequencyGroup { count, glyphs })
        .collect()
}
