use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseBreakdown {
    #[serde(default)]
    pub stripe_fees: Option<f64>,
    #[serde(default)]
    pub clawprint_fees: Option<f64>,
    #[serde(default)]
    pub registered_agent: Option<f64>,
    #[serde(default)]
    pub bookkeeping: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
}

/// Expenses arrive either as a single figure or as a categorized breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Expenses {
    Total(f64),
    Breakdown(ExpenseBreakdown),
}

impl Expenses {
    pub fn total(&self) -> Option<f64> {
        match self {
            Expenses::Total(total) => Some(*total),
            Expenses::Breakdown(breakdown) => breakdown.total,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub expenses: Option<Expenses>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub current_balance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub amount: f64,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /businesses/:id/financials` response.
///
/// Figures may be reported flat (`revenue`, `expenses`, `balance`) or nested
/// under `summary`; the accessors prefer the nested form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Financials {
    pub business_id: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub period_start: Option<String>,
    #[serde(default)]
    pub period_end: Option<String>,
    #[serde(default)]
    pub summary: Option<FinancialSummary>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub expenses: Option<Expenses>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub transactions: Vec<Transaction>,
}

impl Financials {
    pub fn revenue(&self) -> Option<f64> {
        self.summary
            .as_ref()
            .and_then(|s| s.revenue)
            .or(self.revenue)
    }

    pub fn expenses(&self) -> Option<&Expenses> {
        self.summary
            .as_ref()
            .and_then(|s| s.expenses.as_ref())
            .or(self.expenses.as_ref())
    }

    /// Net income, derived from revenue and expenses when not reported.
    pub fn net_income(&self) -> Option<f64> {
        self.summary
            .as_ref()
            .and_then(|s| s.net_income)
            .or(self.net_income)
            .or_else(|| Some(self.revenue()? - self.expenses()?.total()?))
    }

    pub fn balance(&self) -> Option<f64> {
        self.summary
            .as_ref()
            .and_then(|s| s.current_balance)
            .or(self.balance)
    }
}
