//! # Wedding Budget Engine
//!
//! Pure, stateless calculations behind a wedding budgeting tool: turning raw
//! category, line item and payment records into planning artifacts.
//!
//! ## Core Concepts
//!
//! - **Wedding level**: a budget-size tier driving both allocation percentages
//!   and which planning milestones apply
//! - **Allocation**: a category's whole-dollar share of the total budget
//! - **Milestone**: a planning task placed a number of months before the wedding
//! - **Urgency**: how soon a payment or milestone falls relative to "today"
//! - **Financial position**: committed, paid, pending and uncommitted totals
//!
//! Nothing here touches a clock or a store. "Today" is always an argument;
//! [`urgency::today`] is provided for callers who want the host date.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wedding_budget_engine::*;
//! use chrono::NaiveDate;
//!
//! let level = get_wedding_level_for_budget(65_000.0);
//! let plan = calculate_allocations(level, 65_000.0);
//! let milestones = schedule_milestones(level, NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
//!
//! let config = DashboardConfig {
//!     total_budget: 65_000.0,
//!     wedding_date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
//!     today: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
//! };
//! let dashboard = DashboardProcessor::build(&categories, &config);
//! ```

pub mod dates;
pub mod error;
pub mod finance;
pub mod levels;
pub mod milestones;
pub mod numeric;
pub mod schema;
pub mod urgency;

pub use dates::{
    calculate_months_before, calculate_target_date, format_relative_months, get_gantt_position,
    get_months_between, parse_iso_date,
};
pub use error::{PlanningError, Result};
pub use finance::{
    build_cash_flow_data, build_category_allocation_data, build_paid_vs_remaining_data,
    build_payment_schedule_data, CashFlowPoint, CategoryAllocationPoint, FinancialPosition,
    ScheduledPayment,
};
pub use levels::{
    calculate_allocations, calculate_allocations_for_id, get_wedding_level_for_budget,
    level_definition, validate_level_percentages, verify_allocation_sum, AllocationPlan,
    BudgetCategory, CategoryAllocation, LevelDefinition, WeddingLevel,
};
pub use milestones::{
    get_default_milestones_for_id, get_default_milestones_for_level, schedule_milestones,
    timeline_window, ScheduledMilestone, TemplateMilestone,
};
pub use numeric::{format_currency, parse_numeric_input, round2, sanitize_numeric_string};
pub use schema::*;
pub use urgency::{classify_milestone_urgency, classify_urgency, MilestoneUrgency, Urgency};

use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDashboard {
    /// Level implied by the total budget, for template suggestions.
    pub suggested_level: WeddingLevel,
    pub cash_flow: Vec<CashFlowPoint>,
    pub category_allocations: Vec<CategoryAllocationPoint>,
    pub position: FinancialPosition,
    pub payment_schedule: Vec<ScheduledPayment>,
    /// Committed beyond budget.
    pub over_budget: f64,
    /// Paid beyond committed.
    pub over_paid: f64,
}

pub struct DashboardProcessor;

impl DashboardProcessor {
    pub fn build(categories: &[Category], config: &DashboardConfig) -> BudgetDashboard {
        info!(
            "Building dashboard for {} categories (budget {})",
            categories.len(),
            format_currency(config.total_budget)
        );

        let position = build_paid_vs_remaining_data(categories, config.total_budget);
        let payment_schedule = build_payment_schedule_data(categories, config.today);

        let overdue = payment_schedule
            .iter()
            .filter(|p| p.urgency == Urgency::Overdue)
            .count();
        if overdue > 0 {
            debug!("{} payments are overdue as of {}", overdue, config.today);
        }

        BudgetDashboard {
            suggested_level: get_wedding_level_for_budget(config.total_budget),
            cash_flow: build_cash_flow_data(categories, config.wedding_date, config.today),
            category_allocations: build_category_allocation_data(categories),
            over_budget: position.over_budget(),
            over_paid: position.over_paid(),
            position,
            payment_schedule,
        }
    }

    pub fn build_from_records(records: &BudgetRecords) -> BudgetDashboard {
        Self::build(&records.categories, &records.config)
    }

    pub fn build_from_json(json: &str) -> Result<BudgetDashboard> {
        let records: BudgetRecords = serde_json::from_str(json)?;
        Ok(Self::build_from_records(&records))
    }
}

/// Parses the store's category tree (a JSON array of categories), ordered by
/// `sort_order`.
pub fn load_categories_from_json(json: &str) -> Result<Vec<Category>> {
    let mut categories: Vec<Category> = serde_json::from_str(json)?;
    categories.sort_by_key(|c| c.sort_order);
    debug!("Loaded {} categories", categories.len());
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_dashboard_end_to_end() {
        let json = r#"{
            "config": {
                "total_budget": "40,000",
                "wedding_date": "2025-10-04",
                "today": "2025-06-15"
            },
            "categories": [
                {"name": "Venue", "target_amount": 12000, "sort_order": 1, "line_items": [
                    {"name": "Orchard Barn", "actual_cost": 11000, "payments": [
                        {"id": "v1", "amount": 3000, "due_date": "2025-02-01",
                         "status": "paid", "paid_date": "2025-01-30"},
                        {"id": "v2", "amount": 8000, "due_date": "2025-09-04", "status": "pending"}
                    ]}
                ]},
                {"name": "Stationery", "target_amount": 0, "sort_order": 2}
            ]
        }"#;

        let dashboard = DashboardProcessor::build_from_json(json).unwrap();
        assert_eq!(dashboard.suggested_level, WeddingLevel::Diy);
        assert_eq!(dashboard.position.total_committed, 11_000.0);
        assert_eq!(dashboard.position.total_paid, 3_000.0);
        assert_eq!(dashboard.position.uncommitted, 29_000.0);
        assert_eq!(dashboard.over_budget, 0.0);
        assert_eq!(dashboard.category_allocations.len(), 1);
        assert_eq!(dashboard.payment_schedule.len(), 1);
        assert_eq!(dashboard.payment_schedule[0].urgency, Urgency::Upcoming);
        assert_eq!(
            dashboard.cash_flow.first().unwrap().month,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(dashboard.cash_flow.last().unwrap().key, "2025-09");
        assert_eq!(dashboard.cash_flow.len(), 9);
    }

    #[test]
    fn test_load_categories_sorts_and_rejects_bad_json() {
        let categories = load_categories_from_json(
            r#"[{"name": "Catering", "sort_order": 2}, {"name": "Venue", "sort_order": 1}]"#,
        )
        .unwrap();
        assert_eq!(categories[0].name, "Venue");

        assert!(matches!(
            load_categories_from_json("{not json"),
            Err(PlanningError::SerializationError(_))
        ));
    }
}
