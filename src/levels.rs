//! Wedding levels (budget tiers) and their percentage allocation tables.
//!
//! Each level maps the fixed [`BudgetCategory`] set to a share of the total
//! budget. Tables are static data; [`validate_level_percentages`] checks the
//! sum-to-100 invariant and is exercised for every level in the tests.

use crate::error::{PlanningError, Result};
use crate::numeric::round_half_up;
use log::{debug, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use BudgetCategory::*;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum WeddingLevel {
    #[schemars(description = "Budgets under $50k")]
    Diy,

    #[schemars(description = "$50k up to $100k")]
    Lovely,

    #[schemars(description = "$100k up to $500k")]
    Luxury,

    #[schemars(description = "$500k up to $1M")]
    SuperLuxury,

    #[schemars(description = "$1M and above")]
    UltraLuxury,
}

impl WeddingLevel {
    pub const ALL: [WeddingLevel; 5] = [
        WeddingLevel::Diy,
        WeddingLevel::Lovely,
        WeddingLevel::Luxury,
        WeddingLevel::SuperLuxury,
        WeddingLevel::UltraLuxury,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            WeddingLevel::Diy => "diy",
            WeddingLevel::Lovely => "lovely",
            WeddingLevel::Luxury => "luxury",
            WeddingLevel::SuperLuxury => "super_luxury",
            WeddingLevel::UltraLuxury => "ultra_luxury",
        }
    }

    pub fn display_name(&self) -> &'static str {
        level_definition(*self).name
    }

    pub fn description(&self) -> &'static str {
        level_definition(*self).description
    }

    /// Zero-based position in the ascending order.
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// Lenient lookup used by template selection: unknown ids fall back to the
    /// lowest level with a warning.
    pub fn parse_or_default(id: &str) -> WeddingLevel {
        id.parse().unwrap_or_else(|_| {
            warn!("Unknown wedding level '{}', falling back to '{}'", id, WeddingLevel::Diy);
            WeddingLevel::Diy
        })
    }
}

impl fmt::Display for WeddingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for WeddingLevel {
    type Err = PlanningError;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim();
        WeddingLevel::ALL
            .into_iter()
            .find(|level| level.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| PlanningError::UnknownLevel(s.to_string()))
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
pub enum BudgetCategory {
    Venue,
    Catering,
    Photography,
    Videography,
    Attire,
    HairAndMakeup,
    FloralsAndDecor,
    MusicAndEntertainment,
    Stationery,
    Rings,
    Transportation,
    FavorsAndGifts,
    WeddingPlanner,
    Miscellaneous,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 14] = [
        BudgetCategory::Venue,
        BudgetCategory::Catering,
        BudgetCategory::Photography,
        BudgetCategory::Videography,
        BudgetCategory::Attire,
        BudgetCategory::HairAndMakeup,
        BudgetCategory::FloralsAndDecor,
        BudgetCategory::MusicAndEntertainment,
        BudgetCategory::Stationery,
        BudgetCategory::Rings,
        BudgetCategory::Transportation,
        BudgetCategory::FavorsAndGifts,
        BudgetCategory::WeddingPlanner,
        BudgetCategory::Miscellaneous,
    ];

    /// Name stored on persisted category records.
    pub fn name(&self) -> &'static str {
        match self {
            BudgetCategory::Venue => "Venue",
            BudgetCategory::Catering => "Catering",
            BudgetCategory::Photography => "Photography",
            BudgetCategory::Videography => "Videography",
            BudgetCategory::Attire => "Attire",
            BudgetCategory::HairAndMakeup => "Hair & Makeup",
            BudgetCategory::FloralsAndDecor => "Florals & Decor",
            BudgetCategory::MusicAndEntertainment => "Music & Entertainment",
            BudgetCategory::Stationery => "Stationery",
            BudgetCategory::Rings => "Rings",
            BudgetCategory::Transportation => "Transportation",
            BudgetCategory::FavorsAndGifts => "Favors & Gifts",
            BudgetCategory::WeddingPlanner => "Wedding Planner",
            BudgetCategory::Miscellaneous => "Miscellaneous",
        }
    }

    pub fn from_name(name: &str) -> Option<BudgetCategory> {
        let name = name.trim();
        BudgetCategory::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LevelDefinition {
    pub level: WeddingLevel,
    pub name: &'static str,
    pub description: &'static str,
    /// Inclusive lower bound of the budget range.
    pub min_budget: f64,
    /// Exclusive upper bound; `None` for the top level.
    pub max_budget: Option<f64>,
    pub percentages: &'static [(BudgetCategory, f64)],
}

impl LevelDefinition {
    pub fn contains(&self, total_budget: f64) -> bool {
        total_budget >= self.min_budget && self.max_budget.map_or(true, |max| total_budget < max)
    }

    /// Share for a category; categories missing from the table get 0%.
    pub fn percentage_for(&self, category: BudgetCategory) -> f64 {
        self.percentages
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, pct)| *pct)
            .unwrap_or(0.0)
    }
}

static LEVELS: [LevelDefinition; 5] = [
    LevelDefinition {
        level: WeddingLevel::Diy,
        name: "DIY",
        description: "Hands-on celebration where the couple handles most of the planning",
        min_budget: 0.0,
        max_budget: Some(50_000.0),
        percentages: &[
            (Venue, 30.0),
            (Catering, 28.0),
            (Photography, 10.0),
            (Attire, 8.0),
            (HairAndMakeup, 3.0),
            (FloralsAndDecor, 6.0),
            (MusicAndEntertainment, 5.0),
            (Stationery, 2.0),
            (Rings, 3.0),
            (Transportation, 1.0),
            (FavorsAndGifts, 2.0),
            (Miscellaneous, 2.0),
        ],
    },
    LevelDefinition {
        level: WeddingLevel::Lovely,
        name: "Lovely",
        description: "Classic wedding with a full vendor team and day-of coordination",
        min_budget: 50_000.0,
        max_budget: Some(100_000.0),
        percentages: &[
            (Venue, 28.0),
            (Catering, 25.0),
            (Photography, 10.0),
            (Videography, 4.0),
            (Attire, 7.0),
            (HairAndMakeup, 3.0),
            (FloralsAndDecor, 8.0),
            (MusicAndEntertainment, 6.0),
            (Stationery, 2.0),
            (Rings, 2.0),
            (Transportation, 1.0),
            (FavorsAndGifts, 1.0),
            (WeddingPlanner, 1.0),
            (Miscellaneous, 2.0),
        ],
    },
    LevelDefinition {
        level: WeddingLevel::Luxury,
        name: "Luxury",
        description: "Full-service planning with elevated design and entertainment",
        min_budget: 100_000.0,
        max_budget: Some(500_000.0),
        percentages: &[
            (Venue, 26.0),
            (Catering, 22.0),
            (Photography, 9.0),
            (Videography, 5.0),
            (Attire, 6.0),
            (HairAndMakeup, 2.0),
            (FloralsAndDecor, 10.0),
            (MusicAndEntertainment, 7.0),
            (Stationery, 2.0),
            (Rings, 2.0),
            (Transportation, 2.0),
            (FavorsAndGifts, 1.0),
            (WeddingPlanner, 4.0),
            (Miscellaneous, 2.0),
        ],
    },
    LevelDefinition {
        level: WeddingLevel::SuperLuxury,
        name: "Super Luxury",
        description: "Multi-day events with custom production and guest experiences",
        min_budget: 500_000.0,
        max_budget: Some(1_000_000.0),
        percentages: &[
            (Venue, 25.0),
            (Catering, 20.0),
            (Photography, 8.0),
            (Videography, 5.0),
            (Attire, 5.0),
            (HairAndMakeup, 2.0),
            (FloralsAndDecor, 13.0),
            (MusicAndEntertainment, 8.0),
            (Stationery, 2.0),
            (Rings, 1.0),
            (Transportation, 2.0),
            (FavorsAndGifts, 2.0),
            (WeddingPlanner, 5.0),
            (Miscellaneous, 2.0),
        ],
    },
    LevelDefinition {
        level: WeddingLevel::UltraLuxury,
        name: "Ultra Luxury",
        description: "Destination or estate weddings with bespoke everything",
        min_budget: 1_000_000.0,
        max_budget: None,
        percentages: &[
            (Venue, 24.0),
            (Catering, 18.0),
            (Photography, 7.0),
            (Videography, 5.0),
            (Attire, 5.0),
            (HairAndMakeup, 2.0),
            (FloralsAndDecor, 15.0),
            (MusicAndEntertainment, 9.0),
            (Stationery, 2.0),
            (Rings, 1.0),
            (Transportation, 2.0),
            (FavorsAndGifts, 2.0),
            (WeddingPlanner, 6.0),
            (Miscellaneous, 2.0),
        ],
    },
];

pub fn level_definition(level: WeddingLevel) -> &'static LevelDefinition {
    &LEVELS[level.rank()]
}

pub fn level_definitions() -> &'static [LevelDefinition] {
    &LEVELS
}

pub fn get_wedding_level_for_budget(total_budget: f64) -> WeddingLevel {
    level_definitions()
        .iter()
        .find(|def| def.contains(total_budget))
        .map(|def| def.level)
        .unwrap_or(WeddingLevel::Diy)
}

pub fn validate_level_percentages(level: WeddingLevel) -> Result<()> {
    let def = level_definition(level);

    if def.percentages.iter().any(|(_, pct)| *pct < 0.0) {
        return Err(PlanningError::InvalidPercentages {
            level: level.to_string(),
            details: "All percentages must be non-negative".to_string(),
        });
    }

    for (i, (category, _)) in def.percentages.iter().enumerate() {
        if def.percentages[..i].iter().any(|(c, _)| c == category) {
            return Err(PlanningError::InvalidPercentages {
                level: level.to_string(),
                details: format!("{} listed more than once", category.name()),
            });
        }
    }

    let sum: f64 = def.percentages.iter().map(|(_, pct)| pct).sum();
    if (sum - 100.0).abs() > 1e-9 {
        return Err(PlanningError::InvalidPercentages {
            level: level.to_string(),
            details: format!("Percentages must sum to 100 (got {})", sum),
        });
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CategoryAllocation {
    pub category: BudgetCategory,
    pub name: String,
    pub percentage: f64,
    /// Whole-dollar amount.
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AllocationPlan {
    /// Level id that was requested.
    pub level_id: String,
    /// `None` when the requested id was unknown and no allocation was applied.
    pub level: Option<WeddingLevel>,
    pub total_budget: f64,
    pub allocations: Vec<CategoryAllocation>,
}

impl AllocationPlan {
    fn empty(level_id: &str, level: Option<WeddingLevel>, total_budget: f64) -> Self {
        Self {
            level_id: level_id.to_string(),
            level,
            total_budget,
            allocations: BudgetCategory::ALL
                .into_iter()
                .map(|category| CategoryAllocation {
                    category,
                    name: category.name().to_string(),
                    percentage: 0.0,
                    amount: 0.0,
                })
                .collect(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.level.is_none()
    }

    pub fn amount_for(&self, category: BudgetCategory) -> f64 {
        self.allocations
            .iter()
            .find(|a| a.category == category)
            .map(|a| a.amount)
            .unwrap_or(0.0)
    }

    pub fn allocated_total(&self) -> f64 {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    /// Allocated sum minus the whole-dollar budget.
    pub fn drift(&self) -> f64 {
        self.allocated_total() - round_half_up(self.total_budget.max(0.0))
    }

    /// One rounding unit per category.
    pub fn tolerance(&self) -> f64 {
        self.allocations.len() as f64
    }
}

/// Dollar allocation per category for `level`.
///
/// Amounts are `round(percentage / 100 * total_budget)` to the nearest dollar.
/// A non-positive or non-finite budget yields all zeros.
pub fn calculate_allocations(level: WeddingLevel, total_budget: f64) -> AllocationPlan {
    let budget = if total_budget.is_finite() { total_budget } else { 0.0 };
    let mut plan = AllocationPlan::empty(level.id(), Some(level), budget);

    if budget <= 0.0 {
        return plan;
    }

    let def = level_definition(level);
    for allocation in &mut plan.allocations {
        allocation.percentage = def.percentage_for(allocation.category);
        allocation.amount = round_half_up(allocation.percentage / 100.0 * budget);
    }

    debug!(
        "Allocated {} of {} across {} categories for level {}",
        plan.allocated_total(),
        budget,
        plan.allocations.len(),
        level
    );

    if let Err(e) = verify_allocation_sum(&plan) {
        warn!("{}", e);
    }

    plan
}

/// Same as [`calculate_allocations`] for a free-form level id. Unknown ids
/// return an all-zero plan whose `level` is `None`.
pub fn calculate_allocations_for_id(level_id: &str, total_budget: f64) -> AllocationPlan {
    match level_id.parse::<WeddingLevel>() {
        Ok(level) => {
            let mut plan = calculate_allocations(level, total_budget);
            plan.level_id = level_id.to_string();
            plan
        }
        Err(e) => {
            warn!("{}; no allocation applied", e);
            let budget = if total_budget.is_finite() { total_budget } else { 0.0 };
            AllocationPlan::empty(level_id, None, budget)
        }
    }
}

/// Checks that rounded allocations add back up to the budget within
/// [`AllocationPlan::tolerance`].
pub fn verify_allocation_sum(plan: &AllocationPlan) -> Result<()> {
    let level = match plan.level {
        Some(level) => level,
        None => return Err(PlanningError::UnknownLevel(plan.level_id.clone())),
    };

    if plan.drift().abs() > plan.tolerance() {
        return Err(PlanningError::AllocationDrift {
            level: level.to_string(),
            expected: round_half_up(plan.total_budget.max(0.0)),
            actual: plan.allocated_total(),
            tolerance: plan.tolerance(),
        });
    }

    Ok(())
}
