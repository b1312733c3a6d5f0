use crate::dates::{calculate_target_date, format_relative_months, get_gantt_position};
use crate::levels::{BudgetCategory, WeddingLevel};
use crate::levels::{BudgetCategory as C, WeddingLevel as L};
use crate::urgency::{classify_milestone_urgency, MilestoneUrgency};
use chrono::NaiveDate;
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Static catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct DefaultMilestone {
    pub title: &'static str,
    pub description: &'static str,
    /// Months before the wedding; 0.5 is two weeks, 0.25 one week.
    pub months_before: f64,
    pub category: Option<BudgetCategory>,
    /// Lowest level that includes this milestone.
    pub min_level: WeddingLevel,
}

const fn milestone(
    title: &'static str,
    description: &'static str,
    months_before: f64,
    category: Option<BudgetCategory>,
    min_level: WeddingLevel,
) -> DefaultMilestone {
    DefaultMilestone {
        title,
        description,
        months_before,
        category,
        min_level,
    }
}

static CATALOG: [DefaultMilestone; 27] = [
    milestone(
        "Set the overall budget",
        "Agree on a total budget and who is contributing",
        12.0,
        None,
        L::Diy,
    ),
    milestone(
        "Book the venue",
        "Tour shortlisted venues and sign the contract",
        12.0,
        Some(C::Venue),
        L::Diy,
    ),
    milestone(
        "Hire a wedding planner",
        "Interview full-service planners and sign on",
        12.0,
        Some(C::WeddingPlanner),
        L::Luxury,
    ),
    milestone(
        "Draft the guest list",
        "Collect names and addresses from both families",
        11.0,
        None,
        L::Diy,
    ),
    milestone(
        "Book the photographer",
        "Review portfolios and reserve the date",
        10.0,
        Some(C::Photography),
        L::Diy,
    ),
    milestone(
        "Book the videographer",
        "Choose a film style and reserve coverage hours",
        10.0,
        Some(C::Videography),
        L::Lovely,
    ),
    milestone(
        "Book the caterer",
        "Schedule tastings and confirm the menu direction",
        9.0,
        Some(C::Catering),
        L::Diy,
    ),
    milestone(
        "Book music and entertainment",
        "Reserve the band or DJ for ceremony and reception",
        9.0,
        Some(C::MusicAndEntertainment),
        L::Diy,
    ),
    milestone(
        "Commission the design concept",
        "Engage a designer for custom staging and decor",
        9.0,
        Some(C::FloralsAndDecor),
        L::SuperLuxury,
    ),
    milestone(
        "Reserve hotel room blocks",
        "Hold rooms near the venue for out-of-town guests",
        8.0,
        None,
        L::Lovely,
    ),
    milestone(
        "Shop for wedding attire",
        "Order the dress and suits to leave time for alterations",
        8.0,
        Some(C::Attire),
        L::Diy,
    ),
    milestone(
        "Book the florist",
        "Share the palette and confirm ceremony and table pieces",
        7.0,
        Some(C::FloralsAndDecor),
        L::Diy,
    ),
    milestone(
        "Plan welcome weekend events",
        "Outline the welcome party and farewell brunch",
        7.0,
        None,
        L::SuperLuxury,
    ),
    milestone(
        "Send save-the-dates",
        "Mail or email save-the-dates to the full guest list",
        6.0,
        Some(C::Stationery),
        L::Diy,
    ),
    milestone(
        "Book hair and makeup",
        "Reserve stylists for the wedding party",
        6.0,
        Some(C::HairAndMakeup),
        L::Lovely,
    ),
    milestone(
        "Arrange guest travel concierge",
        "Set up flights, transfers and an itinerary desk for guests",
        6.0,
        Some(C::Transportation),
        L::UltraLuxury,
    ),
    milestone(
        "Book transportation",
        "Reserve cars or shuttles for the wedding day",
        4.0,
        Some(C::Transportation),
        L::Lovely,
    ),
    milestone(
        "Order wedding rings",
        "Finalize ring sizing and engraving",
        4.0,
        Some(C::Rings),
        L::Diy,
    ),
    milestone(
        "Production walkthrough",
        "Walk the site with lighting, staging and AV teams",
        3.0,
        None,
        L::UltraLuxury,
    ),
    milestone(
        "Send invitations",
        "Mail invitations with an RSVP deadline",
        2.5,
        Some(C::Stationery),
        L::Diy,
    ),
    milestone(
        "Hair and makeup trial",
        "Test the wedding day look with the stylist",
        2.0,
        Some(C::HairAndMakeup),
        L::Lovely,
    ),
    milestone(
        "Final attire fitting",
        "Last alterations and pick-up arrangements",
        1.0,
        Some(C::Attire),
        L::Diy,
    ),
    milestone(
        "Order favors and gifts",
        "Order guest favors and wedding party gifts",
        1.0,
        Some(C::FavorsAndGifts),
        L::Lovely,
    ),
    milestone(
        "Confirm final headcount",
        "Send the final guest count and seating to the caterer",
        0.5,
        Some(C::Catering),
        L::Diy,
    ),
    milestone(
        "Confirm the vendor timeline",
        "Share the day-of schedule with every vendor",
        0.5,
        None,
        L::Diy,
    ),
    milestone(
        "Deliver final payments",
        "Settle outstanding vendor balances and prepare tips",
        0.25,
        None,
        L::Diy,
    ),
    milestone(
        "Host the rehearsal dinner",
        "Rehearse the ceremony and host the dinner",
        0.25,
        Some(C::Catering),
        L::Luxury,
    ),
];

pub fn milestone_catalog() -> &'static [DefaultMilestone] {
    &CATALOG
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TemplateMilestone {
    pub title: String,
    pub description: String,
    pub months_before: f64,
    /// Name of the linked budget category, if any.
    pub category_name: Option<String>,
    pub min_level: WeddingLevel,
    pub sort_order: usize,
}

impl TemplateMilestone {
    pub fn relative_label(&self) -> String {
        format_relative_months(self.months_before)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ScheduledMilestone {
    #[serde(flatten)]
    pub template: TemplateMilestone,
    pub target_date: NaiveDate,
}

impl ScheduledMilestone {
    pub fn urgency(&self, today: NaiveDate) -> MilestoneUrgency {
        classify_milestone_urgency(self.target_date, today)
    }

    pub fn gantt_position(&self, window_start: NaiveDate, window_end: NaiveDate) -> f64 {
        get_gantt_position(self.target_date, window_start, window_end)
    }
}

/// Catalog milestones included at `level`, in catalog order, with `sort_order`
/// numbered over the filtered result.
pub fn get_default_milestones_for_level(level: WeddingLevel) -> Vec<TemplateMilestone> {
    let milestones: Vec<TemplateMilestone> = CATALOG
        .iter()
        .filter(|m| m.min_level <= level)
        .enumerate()
        .map(|(sort_order, m)| TemplateMilestone {
            title: m.title.to_string(),
            description: m.description.to_string(),
            months_before: m.months_before,
            category_name: m.category.map(|c| c.name().to_string()),
            min_level: m.min_level,
            sort_order,
        })
        .collect();

    debug!(
        "Level {} includes {} of {} catalog milestones",
        level,
        milestones.len(),
        CATALOG.len()
    );

    milestones
}

/// Unknown ids get the base set only.
pub fn get_default_milestones_for_id(level_id: &str) -> Vec<TemplateMilestone> {
    get_default_milestones_for_level(WeddingLevel::parse_or_default(level_id))
}

pub fn schedule_milestones(
    level: WeddingLevel,
    wedding_date: NaiveDate,
) -> Vec<ScheduledMilestone> {
    get_default_milestones_for_level(level)
        .into_iter()
        .map(|template| ScheduledMilestone {
            target_date: calculate_target_date(wedding_date, template.months_before),
            template,
        })
        .collect()
}

/// Window spanning the earliest milestone through the wedding date.
pub fn timeline_window(
    milestones: &[ScheduledMilestone],
    wedding_date: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let start = milestones
        .iter()
        .map(|m| m.target_date)
        .min()
        .map_or(wedding_date, |earliest| earliest.min(wedding_date));
    let end = milestones
        .iter()
        .map(|m| m.target_date)
        .max()
        .map_or(wedding_date, |latest| latest.max(wedding_date));
    (start, end)
}
