//! Emoji usage index.
//!
//! Messages go through four steps: [`extract`] pulls `:emoji:` short-codes
//! out of the text, [`tally`] counts them per author and merges channels,
//! [`frequency`] groups each user's counts and resolves glyphs, and
//! [`report`] joins the result with the user directory.
//!
//! Everything here is pure and synchronous; fetching belongs to
//! [`crate::slack`] and [`crate::snapshot`].

pub mod extract;
pub mod frequency;
pub mod report;
pub mod tally;
pub mod types;

pub use extract::{EmojiExtractor, extract_emoji_names};
pub use frequency::{FrequencyGroup, group_by_frequency, resolve_glyph};
pub use report::{FavoriteEntry, Report, UserDirectory, UserEmojiBreakdown, assemble_report};
pub use tally::{UserEmojiTally, UserTallies, merge_user_tallies};
pub use types::{EmojiName, RawChannel, RawMessage, RawUser};

/// The reference data a report is computed with.
#[derive(Debug, Clone)]
pub struct EmojiIndex {
    extractor: EmojiExtractor,
    ignored_users: Vec<String>,
}

impl Default for EmojiIndex {
    fn default() -> Self {
        Self::new(
            EmojiExtractor::default(),
            report::DEFAULT_IGNORED_USERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

impl EmojiIndex {
    pub fn new(extractor: EmojiExtractor, ignored_users: Vec<String>) -> Self {
        Self {
            extractor,
            ignored_users,
        }
    }

    /// Tally the emoji of one channel's messages.
    pub fn tally_channel<'a, I>(&self, messages: I) -> UserTallies
    where
        I: IntoIterator<Item = &'a RawMessage>,
    {
        UserTallies::accumulate(&self.extractor, messages)
    }

    pub fn directory<'a, I>(&self, users: I) -> UserDirectory
    where
        I: IntoIterator<Item = &'a RawUser>,
    {
        UserDirectory::from_users(users, self.ignored_users.as_slice())
    }

    /// Build a report from the user list and an already merged tally.
    pub fn report<'a, I>(&self, users: I, tallies: &UserTallies) -> Report
    where
        I: IntoIterator<Item = &'a RawUser>,
    {
        assemble_report(&self.directory(users), tallies)
    }

    /// Tally every channel, merge the results and build the report.
    pub fn report_from_channels<'a, U, C>(&self, users: U, channels: C) -> Report
    where
        U: IntoIterator<Item = &'a RawUser>,
        C: IntoIterator<Item = &'a [RawMessage]>,
    {
        let tallies = channels
            .into_iter()
            .map(|messages| self.tally_channel(messages))
            .fold(UserTallies::new(), merge_user_tallies);
        self.report(users, &tallies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> RawUser {
        RawUser {
            id: id.to_string(),
            display_name: name.to_string(),
            deleted: false,
            is_bot: false,
        }
    }

    #[test]
    fn test_report_from_channels() {
        let index = EmojiIndex::default();
        let users = vec![
            user("U1", "Alex"),
            user("U2", "German"),
            user("USLACKBOT", "Slackbot"),
        ];
        let general = vec![
            RawMessage::new("U1", "morning :coffee:"),
            RawMessage::new("USLACKBOT", "reminder :alarm_clock:"),
        ];
        let random = vec![
            RawMessage::new("U2", ":cat: :cat:"),
            RawMessage::new("U1", ":coffee: :cat:"),
        ];

        let report =
            index.report_from_channels(&users, [general.as_slice(), random.as_slice()]);

        assert_eq!(report.per_user.len(), 2);
        assert_eq!(report.favorites[0].user_name, "Alex");
        assert_eq!(report.favorites[0].count, 2);
        assert_eq!(report.favorites[0].glyphs, vec![resolve_glyph("coffee")]);
        assert_eq!(report.favorites[1].user_name, "German");
        assert_eq!(report.favorites[1].glyphs, vec![resolve_glyph("cat")]);
    }

    #[test]
    fn test_reports_do_not_share_state() {
        let index = EmojiIndex::default();
        let users = vec![user("U1", "Alex"), user("U2", "German")];
        let first = vec![RawMessage::new("U1", ":tada:")];
        let second = vec![RawMessage::new("U2", ":wave:")];

        let first_report = index.report_from_channels(&users, [first.as_slice()]);
        let second_report = index.report_from_channels(&users, [second.as_slice()]);

        assert_eq!(first_report.per_user.len(), 1);
        assert_eq!(second_report.per_user.len(), 1);
        assert_eq!(second_report.per_user[0].user_name, "German");
    }

    #[test]
    fn test_custom_ignore_list() {
        let index = EmojiIndex::new(EmojiExtractor::default(), vec!["German".to_string()]);
        let users = vec![user("U1", "Alex"), user("U2", "German")];
        let messages = vec![RawMessage::new("U1", ":tada:"), RawMessage::new("U2", ":wave:")];

        let report = index.report(&users, &index.tally_channel(&messages));

        assert_eq!(report.per_user.len(), 1);
        assert_eq!(report.per_user[0].user_name, "Alex");
    }
}
