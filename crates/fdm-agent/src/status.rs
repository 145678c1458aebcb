//! Household status and the outcome of a status change.

use std::fmt;

/// Where a household stands this year.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Living at home.
    #[default]
    Normal,
    /// Left pre-emptively after a warning; the house was undamaged when
    /// they left.
    Evacuated,
    /// Forced out by damage.
    Displaced,
    /// Decided to leave but could not.
    Trapped,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Normal, Status::Evacuated, Status::Displaced, Status::Trapped];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Normal    => "normal",
            Status::Evacuated => "evacuated",
            Status::Displaced => "displaced",
            Status::Trapped   => "trapped",
        }
    }

    /// `true` for households living away from home.
    #[inline]
    pub fn is_away(self) -> bool {
        matches!(self, Status::Evacuated | Status::Displaced)
    }

    /// `true` for households still in their house (`Normal` or `Trapped`).
    #[inline]
    pub fn is_home(self) -> bool {
        !self.is_away()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Transition ────────────────────────────────────────────────────────────────

/// Result of [`HouseholdStore::transition`][crate::HouseholdStore::transition].
///
/// Returned instead of mutating a hidden "changed" flag so that call sites
/// can count and log what happened.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Transition {
    Unchanged,
    BecameNormal,
    BecameEvacuated,
    BecameDisplaced,
    BecameTrapped,
}

impl Transition {
    /// The outcome of moving into `status` from a different status.
    pub fn into_status(status: Status) -> Transition {
        match status {
            Status::Normal    => Transition::BecameNormal,
            Status::Evacuated => Transition::BecameEvacuated,
            Status::Displaced => Transition::BecameDisplaced,
            Status::Trapped   => Transition::BecameTrapped,
        }
    }

    #[inline]
    pub fn changed(self) -> bool {
        self != Transition::Unchanged
    }

    /// New status, or `None` for `Unchanged`.
    pub fn target(self) -> Option<Status> {
        match self {
            Transition::Unchanged       => None,
            Transition::BecameNormal    => Some(Status::Normal),
            Transition::BecameEvacuated => Some(Status::Evacuated),
            Transition::BecameDisplaced => Some(Status::Displaced),
            Transition::BecameTrapped   => Some(Status::Trapped),
        }
    }
}

// ── StatusCounts ──────────────────────────────────────────────────────────────

/// Number of households in each status.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCounts {
    pub normal:    usize,
    pub evacuated: usize,
    pub displaced: usize,
    pub trapped:   usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: Status) {
        match status {
            Status::Normal    => self.normal += 1,
            Status::Evacuated => self.evacuated += 1,
            Status::Displaced => self.displaced += 1,
            Status::Trapped   => self.trapped += 1,
        }
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Normal    => self.normal,
            Status::Evacuated => self.evacuated,
            Status::Displaced => self.displaced,
            Status::Trapped   => self.trapped,
        }
    }

    pub fn total(&self) -> usize {
        self.normal + self.evacuated + self.displaced + self.trapped
    }
}

impl FromIterator<Status> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for s in iter {
            counts.add(s);
        }
        counts
    }
}
