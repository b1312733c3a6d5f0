use crate::numeric::{deserialize_amount, round2};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    #[schemars(description = "Scheduled but not yet paid")]
    Pending,

    #[schemars(description = "Settled; paid_date records when")]
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Payment {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    #[schemars(description = "Optional display label such as 'Deposit' or 'Final balance'")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Payment amount; numeric text is accepted")]
    pub amount: f64,

    #[serde(default)]
    #[schemars(description = "Due date in YYYY-MM-DD format, or null when not scheduled")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: PaymentStatus,

    #[serde(default)]
    #[schemars(description = "Date the payment was settled, YYYY-MM-DD")]
    pub paid_date: Option<NaiveDate>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Date a payment lands on a cash-flow chart: the paid date for settled
    /// payments (falling back to the due date), the due date otherwise.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        match self.status {
            PaymentStatus::Paid => self.paid_date.or(self.due_date),
            PaymentStatus::Pending => self.due_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LineItem {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub vendor_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Contracted cost of this item")]
    pub actual_cost: f64,

    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(
        with = "f64",
        description = "Legacy running total, used only when no itemized payments exist"
    )]
    pub paid_to_date: f64,

    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl LineItem {
    /// Sum of settled payments, or the legacy `paid_to_date` for items that
    /// predate itemized payments.
    pub fn total_paid(&self) -> f64 {
        if self.payments.is_empty() {
            return round2(self.paid_to_date);
        }
        round2(
            self.payments
                .iter()
                .filter(|p| p.is_paid())
                .map(|p| p.amount)
                .sum(),
        )
    }

    pub fn total_scheduled(&self) -> f64 {
        round2(self.payments.iter().map(|p| p.amount).sum())
    }

    pub fn display_vendor(&self) -> &str {
        self.vendor_name
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Category {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Budgeted amount for this category")]
    pub target_amount: f64,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Category {
    pub fn actual_spend(&self) -> f64 {
        round2(self.line_items.iter().map(|li| li.actual_cost).sum())
    }
}

/// Per-computation inputs that are not part of the category tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DashboardConfig {
    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Client's total wedding budget")]
    pub total_budget: f64,

    #[schemars(description = "Wedding date; anchors milestones and the default cash-flow span")]
    pub wedding_date: NaiveDate,

    #[schemars(description = "Reference date for urgency and cash-flow spans")]
    pub today: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BudgetRecords {
    pub config: DashboardConfig,

    #[serde(default)]
    pub categories: Vec<Category>,
}

impl BudgetRecords {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(BudgetRecords)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
