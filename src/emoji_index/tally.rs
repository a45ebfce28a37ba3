use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use super::extract::EmojiExtractor;
use super::types::{EmojiName, RawMessage};

/// How many times one user used each emoji.
///
/// Keys keep the order in which emoji were first seen. A count is never zero:
/// an emoji the user never used is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserEmojiTally(IndexMap<EmojiName, u64>);

impl UserEmojiTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more use of `name`.
    pub fn add(&mut self, name: impl Into<EmojiName>) {
        self.add_count(name, 1);
    }

    fn add_count(&mut self, name: impl Into<EmojiName>, count: u64) {
        if count == 0 {
            return;
        }
        *self.0.entry(name.into()).or_insert(0) += count;
    }

    /// Add every count of `other` into this tally.
    pub fn merge(&mut self, other: UserEmojiTally) {
        for (name, count) in other.0 {
            self.add_count(name, count);
        }
    }

    pub fn count(&self, name: &str) -> u64 {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct emoji.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl<S: Into<EmojiName>> FromIterator<S> for UserEmojiTally {
    fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
        let mut tally = Self::new();
        for name in names {
            tally.add(name);
        }
        tally
    }
}

/// Emoji tallies keyed by user id, in the order users were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserTallies(IndexMap<String, UserEmojiTally>);

impl UserTallies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally the emoji used in `messages`, attributed to each message's author.
    ///
    /// Messages without an author are skipped, and users who used no emoji
    /// get no entry.
    pub fn accumulate<'a, I>(extractor: &EmojiExtractor, messages: I) -> Self
    where
        I: IntoIterator<Item = &'a RawMessage>,
    {
        let mut tallies = Self::new();
        for message in messages {
            tallies.record(extractor, message);
        }
        tallies
    }

    /// Add the emoji in one message to its author's tally.
    pub fn record(&mut self, extractor: &EmojiExtractor, message: &RawMessage) {
        let Some(user) = message.user.as_deref() else {
            return;
        };
        let names = extractor.extract(message.text.as_deref());
        if names.is_empty() {
            return;
        }

        let tally = self.0.entry(user.to_string()).or_default();
        for name in names {
            tally.add(name);
        }
    }

    /// Sum `other` into these tallies, user by user and emoji by emoji.
    ///
    /// Users new to `self` are appended after the existing ones.
    pub fn merge(mut self, other: UserTallies) -> Self {
        for (user, tally) in other.0 {
            if tally.is_empty() {
                continue;
            }
            match self.0.entry(user) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(tally),
                Entry::Vacant(entry) => {
                    entry.insert(tally);
                }
            }
        }
        self
    }

    pub fn get(&self, user: &str) -> Option<&UserEmojiTally> {
        self.0.get(user)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserEmojiTally)> {
        self.0.iter().map(|(user, tally)| (user.as_str(), tally))
    }
}

impl FromIterator<(String, UserEmojiTally)> for UserTallies {
    fn from_iter<I: IntoIterator<Item = (String, UserEmojiTally)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |acc, (user, tally)| {
                acc.merge(Self(IndexMap::from([(user, tally)])))
            })
    }
}

/// Combine two per-channel results into one.
pub fn merge_user_tallies(a: UserTallies, b: UserTallies) -> UserTallies {
    a.merge(b)
}
