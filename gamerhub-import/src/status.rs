//! Library status reconciliation.
//!
//! A sync derives a *candidate* status from Steam's playtime signals and then
//! reconciles it against the status already stored for the entry. Manual
//! statuses (completed, replaying, dropped) are never overwritten.

use gamerhub_catalog::LibraryStatus;

/// Length of the "recently played" window.
pub const RECENT_WINDOW_SECS: i64 = 14 * 24 * 3600;

/// Playtime signals reported for one owned game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaySignals {
    /// Cumulative playtime in minutes.
    pub playtime_forever: i64,
    /// Playtime over the last two weeks in minutes.
    pub playtime_2weeks: i64,
    /// Unix seconds of the last session, `None` if never played.
    pub last_played: Option<i64>,
}

impl PlaySignals {
    pub fn is_recent(&self, now: i64) -> bool {
        self.playtime_2weeks > 0
            || self
                .last_played
                .is_some_and(|t| t > now - RECENT_WINDOW_SECS)
    }
}

/// The status the signals alone would suggest.
pub fn candidate_status(signals: &PlaySignals, now: i64) -> LibraryStatus {
    if signals.playtime_forever == 0 {
        LibraryStatus::Unplayed
    } else if signals.is_recent(now) {
        LibraryStatus::Playing
    } else {
        LibraryStatus::Dropped
    }
}

struct Rule {
    name: &'static str,
    applies: fn(LibraryStatus, LibraryStatus) -> bool,
    outcome: Outcome,
}

#[derive(Clone, Copy)]
enum Outcome {
    KeepExisting,
    TakeCandidate,
}

/// Evaluated top to bottom; the first rule that applies decides.
const RULES: &[Rule] = &[
    Rule {
        name: "sticky status",
        applies: |existing, _| existing.is_sticky(),
        outcome: Outcome::KeepExisting,
    },
    Rule {
        name: "started playing",
        applies: |existing, candidate| {
            existing == LibraryStatus::Unplayed && candidate == LibraryStatus::Playing
        },
        outcome: Outcome::TakeCandidate,
    },
    Rule {
        name: "stopped playing",
        applies: |existing, candidate| {
            existing == LibraryStatus::Playing && candidate == LibraryStatus::Dropped
        },
        outcome: Outcome::TakeCandidate,
    },
    Rule {
        name: "played long ago",
        applies: |existing, candidate| {
            existing == LibraryStatus::Unplayed && candidate == LibraryStatus::Dropped
        },
        outcome: Outcome::TakeCandidate,
    },
    Rule {
        name: "no change",
        applies: |_, _| true,
        outcome: Outcome::KeepExisting,
    },
];

/// Decide the status to store for an entry after a sync.
///
/// With no existing entry the candidate is used as-is.
pub fn reconcile(existing: Option<LibraryStatus>, signals: &PlaySignals, now: i64) -> LibraryStatus {
    let candidate = candidate_status(signals, now);
    let Some(existing) = existing else {
        return candidate;
    };

    for rule in RULES {
        if (rule.applies)(existing, candidate) {
            log::trace!("status rule '{}': {existing} vs {candidate}", rule.name);
            return match rule.outcome {
                Outcome::KeepExisting => existing,
                Outcome::TakeCandidate => candidate,
            };
        }
    }
    existing
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
