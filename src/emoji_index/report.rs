use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use super::frequency::{FrequencyGroup, group_by_frequency};
use super::tally::UserTallies;
use super::types::RawUser;

/// Service accounts and integrations that show up as regular members.
pub const DEFAULT_IGNORED_USERS: &[&str] = &[
    "Slackbot",
    "On call Onboarding",
    "Zoom",
    "Google Calendar",
    "Pivotal Tracker",
    "atomist",
    "Life Bot",
    "Protocol Droid",
    "R2 D2",
    "GitHub",
    "Begin",
    "Google Drive",
    "Stack Overflow for Teams",
    "Toast",
];

/// User id to display name, restricted to active humans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    names: IndexMap<String, String>,
}

impl UserDirectory {
    /// Keep users that are not deleted, not bots and not in `ignored`.
    pub fn from_users<'a, I, S>(users: I, ignored: &[S]) -> Self
    where
        I: IntoIterator<Item = &'a RawUser>,
        S: AsRef<str>,
    {
        let ignored: HashSet<&str> = ignored.iter().map(|s| s.as_ref()).collect();
        let names = users
            .into_iter()
            .filter(|user| !user.deleted && !user.is_bot)
            .filter(|user| !ignored.contains(user.display_name.as_str()))
            .map(|user| (user.id.clone(), user.display_name.clone()))
            .collect();
        Self { names }
    }

    pub fn name(&self, user_id: &str) -> Option<&str> {
        self.names.get(user_id).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One user's emoji usage, grouped by frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEmojiBreakdown {
    pub user_name: String,
    pub groups: Vec<FrequencyGroup>,
}

/// The emoji a user used the most.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteEntry {
    pub user_name: String,
    pub glyphs: Vec<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub per_user: Vec<UserEmojiBreakdown>,
    pub favorites: Vec<FavoriteEntry>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.per_user.is_empty()
    }
}

/// Join tallies with the directory, in tally order.
///
/// Users missing from the directory and users with an empty tally are left
/// out. The favorite is the last group produced by [`group_by_frequency`],
/// which holds the highest count and every emoji tied at it.
pub fn assemble_report(directory: &UserDirectory, tallies: &UserTallies) -> Report {
    let mut report = Report::default();

    for (user_id, tally) in tallies.iter() {
        let Some(user_name) = directory.name(user_id) else {
            continue;
        };
        let groups = group_by_frequency(tally);
        let Some(favorite) = groups.last() else {
            continue;
        };

        report.favorites.push(FavoriteEntry {
            user_name: user_name.to_string(),
            glyphs: favorite.glyphs.clone(),
            count: favorite.count,
        });
        report.per_user.push(UserEmojiBreakdown {
            user_name: user_name.to_string(),
            groups,
        });
    }

    report
}
