//! Urgency tiers for dated obligations.
//!
//! Classification depends only on the due date and the `today` passed in.
//! [`today`] is the one place the host clock is read.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Days ahead (inclusive) that still count as "this week".
pub const THIS_WEEK_DAYS: i64 = 7;

/// Ordered by rank: overdue sorts first, undated last.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    ThisWeek,
    Upcoming,
    NoDate,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "Overdue",
            Urgency::ThisWeek => "This week",
            Urgency::Upcoming => "Upcoming",
            Urgency::NoDate => "No date",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneUrgency {
    Overdue,
    ThisWeek,
    Upcoming,
}

impl MilestoneUrgency {
    pub fn label(&self) -> &'static str {
        Urgency::from(*self).label()
    }
}

impl From<MilestoneUrgency> for Urgency {
    fn from(value: MilestoneUrgency) -> Self {
        match value {
            MilestoneUrgency::Overdue => Urgency::Overdue,
            MilestoneUrgency::ThisWeek => Urgency::ThisWeek,
            MilestoneUrgency::Upcoming => Urgency::Upcoming,
        }
    }
}

/// Host's local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Whole days from `today` until `due`; negative when past.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

pub fn classify_urgency(due: Option<NaiveDate>, today: NaiveDate) -> Urgency {
    match due {
        Some(due) => classify_milestone_urgency(due, today).into(),
        None => Urgency::NoDate,
    }
}

pub fn classify_milestone_urgency(target: NaiveDate, today: NaiveDate) -> MilestoneUrgency {
    match days_until(target, today) {
        d if d < 0 => MilestoneUrgency::Overdue,
        d if d <= THIS_WEEK_DAYS => MilestoneUrgency::ThisWeek,
        _ => MilestoneUrgency::Upcoming,
    }
}
