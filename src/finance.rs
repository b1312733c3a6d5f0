//! Dashboard aggregates over the category → line item → payment tree.

use crate::dates::{month_key, month_label, month_start, month_starts_in_range};
use crate::numeric::round2;
use crate::schema::{Category, LineItem, Payment};
use crate::urgency::{classify_urgency, Urgency};
use chrono::NaiveDate;
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CashFlowPoint {
    /// First day of the month.
    pub month: NaiveDate,
    /// `YYYY-MM`
    pub key: String,
    /// `Mon YYYY`
    pub label: String,
    pub paid: f64,
    pub upcoming: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CategoryAllocationPoint {
    pub name: String,
    /// Budgeted (target) amount.
    pub value: f64,
    pub spent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FinancialPosition {
    pub total_budget: f64,
    /// Unclamped; may exceed `total_budget`.
    pub total_committed: f64,
    /// Unclamped; may exceed `total_committed`.
    pub total_paid: f64,
    /// Floored at zero.
    pub total_pending: f64,
    /// Floored at zero.
    pub uncommitted: f64,
}

impl FinancialPosition {
    /// Commitments beyond the budget, zero when within budget.
    pub fn over_budget(&self) -> f64 {
        round2((self.total_committed - self.total_budget).max(0.0))
    }

    /// Payments beyond what has been committed, zero otherwise.
    pub fn over_paid(&self) -> f64 {
        round2((self.total_paid - self.total_committed).max(0.0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ScheduledPayment {
    pub payment_id: String,
    pub vendor_name: String,
    pub category_name: String,
    pub label: String,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    pub urgency: Urgency,
}

struct PaymentRef<'a> {
    category: &'a Category,
    line_item: &'a LineItem,
    /// Position within the line item's payments.
    index: usize,
    payment: &'a Payment,
}

fn flatten_payments(categories: &[Category]) -> impl Iterator<Item = PaymentRef<'_>> {
    categories.iter().flat_map(|category| {
        category.line_items.iter().flat_map(move |line_item| {
            line_item
                .payments
                .iter()
                .enumerate()
                .map(move |(index, payment)| PaymentRef {
                    category,
                    line_item,
                    index,
                    payment,
                })
        })
    })
}

/// Monthly paid/upcoming totals as a contiguous series.
///
/// Payments land in the month of their effective date; undated payments are
/// left out. The series runs from the earlier of this month and the first
/// payment month to the later of this month and the last payment month. With
/// no dated payments it spans this month through the `anchor_date` month (in
/// whichever order they fall).
pub fn build_cash_flow_data(
    categories: &[Category],
    anchor_date: NaiveDate,
    today: NaiveDate,
) -> Vec<CashFlowPoint> {
    let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    let mut excluded = 0usize;

    for entry in flatten_payments(categories) {
        let Some(date) = entry.payment.effective_date() else {
            excluded += 1;
            continue;
        };
        let bucket = buckets.entry(month_start(date)).or_insert((0.0, 0.0));
        if entry.payment.is_paid() {
            bucket.0 += entry.payment.amount;
        } else {
            bucket.1 += entry.payment.amount;
        }
    }

    let this_month = month_start(today);
    let (start, end) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(&first), Some(&last)) => (first.min(this_month), last.max(this_month)),
        _ => {
            let anchor_month = month_start(anchor_date);
            (this_month.min(anchor_month), this_month.max(anchor_month))
        }
    };

    let series: Vec<CashFlowPoint> = month_starts_in_range(start, end)
        .into_iter()
        .map(|month| {
            let (paid, upcoming) = buckets.get(&month).copied().unwrap_or((0.0, 0.0));
            CashFlowPoint {
                month,
                key: month_key(month),
                label: month_label(month),
                paid: round2(paid),
                upcoming: round2(upcoming),
            }
        })
        .collect();

    debug!(
        "Cash flow spans {} to {} ({} months, {} undated payments excluded)",
        start,
        end,
        series.len(),
        excluded
    );

    series
}

/// Target vs spend for every category with a positive target.
pub fn build_category_allocation_data(categories: &[Category]) -> Vec<CategoryAllocationPoint> {
    categories
        .iter()
        .filter(|c| c.target_amount > 0.0)
        .map(|c| CategoryAllocationPoint {
            name: c.name.clone(),
            value: round2(c.target_amount),
            spent: c.actual_spend(),
        })
        .collect()
}

pub fn build_paid_vs_remaining_data(
    categories: &[Category],
    total_budget: f64,
) -> FinancialPosition {
    let line_items = || categories.iter().flat_map(|c| c.line_items.iter());

    let total_committed: f64 = line_items().map(|li| li.actual_cost).sum();
    let total_paid: f64 = line_items().map(|li| li.total_paid()).sum();

    FinancialPosition {
        total_budget: round2(total_budget),
        total_committed: round2(total_committed),
        total_paid: round2(total_paid),
        total_pending: round2((total_committed - total_paid).max(0.0)),
        uncommitted: round2((total_budget - total_committed).max(0.0)),
    }
}

fn due_date_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Every unpaid payment, most urgent first, then by due date. Equal keys keep
/// their tree order.
pub fn build_payment_schedule_data(
    categories: &[Category],
    today: NaiveDate,
) -> Vec<ScheduledPayment> {
    let mut schedule: Vec<ScheduledPayment> = flatten_payments(categories)
        .filter(|entry| !entry.payment.is_paid())
        .map(|entry| ScheduledPayment {
            payment_id: entry.payment.id.clone(),
            vendor_name: entry.line_item.display_vendor().to_string(),
            category_name: entry.category.name.clone(),
            label: entry
                .payment
                .label
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| format!("Payment {}", entry.index + 1)),
            amount: round2(entry.payment.amount),
            due_date: entry.payment.due_date,
            urgency: classify_urgency(entry.payment.due_date, today),
        })
        .collect();

    schedule.sort_by(|a, b| {
        a.urgency
            .cmp(&b.urgency)
            .then_with(|| due_date_order(a.due_date, b.due_date))
    });

    debug!("Payment schedule holds {} unpaid payments", schedule.len());

    schedule
}
