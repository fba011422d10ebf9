//! Totals shown on the dashboard: income, expense, balance, per-category
//! spending and how much of the monthly budget is left.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::repos::{TransactionKind, TransactionRow};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("month must look like YYYY-MM")]
pub struct MonthParseError;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first_day = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| MonthParseError)?;

        Ok(Self {
            year: first_day.year(),
            month: first_day.month(),
        })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub monthly_budget: Option<f64>,
    /// Only for a single month; the limit is per month.
    pub budget_remaining: Option<f64>,
    /// Expenses only, largest first.
    pub by_category: Vec<CategoryTotal>,
}

pub fn summarize(
    rows: &[TransactionRow],
    monthly_budget: Option<f64>,
    month: Option<Month>,
) -> Summary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut per_category: BTreeMap<&str, f64> = BTreeMap::new();

    for row in rows
        .iter()
        .filter(|row| month.is_none_or(|m| m.contains(row.date)))
    {
        match row.kind {
            TransactionKind::Income => total_income += row.amount,
            TransactionKind::Expense => {
                total_expense += row.amount;
                *per_category.entry(row.category.as_str()).or_default() += row.amount;
            }
        }
    }

    let mut by_category: Vec<CategoryTotal> = per_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    // BTreeMap order keeps ties alphabetical under a stable sort.
    by_category.sort_by(|a, b| b.total.total_cmp(&a.total));

    Summary {
        month: month.map(|m| m.to_string()),
        total_income,
        total_expense,
        balance: total_income - total_expense,
        monthly_budget,
        budget_remaining: month
            .and(monthly_budget)
            .map(|limit| limit - total_expense),
        by_category,
    }
}
