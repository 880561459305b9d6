//! Metrics engine: totals, savings rate, category spend, monthly trend, and IQR anomalies.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use ledgerlens_core::{Transaction, TransactionSet, YearMonth, parse_calendar_date};

use crate::stats::IqrBounds;

/// Round to two decimals, ties to even (0.125 -> 0.12, 0.375 -> 0.38).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// Total absolute expense for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub total: f64,
}

/// Summary derived from one transaction set. Read-only once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    /// Percentage of income kept; 0 when there is no income
    pub savings_rate: f64,
    /// Descending by total; ties keep first-seen order
    pub category_spend: Vec<CategorySpend>,
    /// Net signed amount per month, chronological; undated rows excluded
    pub monthly_trend: BTreeMap<YearMonth, f64>,
    pub anomalies: Vec<Transaction>,
    pub anomaly_bounds: IqrBounds,
}

impl MetricsResult {
    /// Category with the largest spend, if there were any expenses.
    pub fn top_category(&self) -> Option<&CategorySpend> {
        self.category_spend.first()
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

pub fn compute_metrics(txns: &TransactionSet) -> MetricsResult {
    let income: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses: f64 = txns
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum::<f64>()
        .abs();

    let net = income - expenses;
    let rate = if income > 0.0 { net / income * 100.0 } else { 0.0 };

    let amounts = txns.amounts();
    // TransactionSet is never empty, so the bounds always exist.
    let bounds = IqrBounds::from_amounts(&amounts).unwrap_or(IqrBounds {
        q1: 0.0,
        q3: 0.0,
        iqr: 0.0,
        lower: 0.0,
        upper: 0.0,
    });
    let anomalies: Vec<Transaction> = txns
        .iter()
        .filter(|t| bounds.is_outlier(t.amount))
        .cloned()
        .collect();

    debug!(
        rows = txns.len(),
        lower = bounds.lower,
        upper = bounds.upper,
        anomalies = anomalies.len(),
        "computed metrics"
    );

    MetricsResult {
        total_income: round2(income),
        total_expenses: round2(expenses),
        net_savings: round2(net),
        savings_rate: round2(rate),
        category_spend: category_spend(txns.as_slice()),
        monthly_trend: monthly_trend(txns.as_slice()),
        anomalies,
        anomaly_bounds: bounds,
    }
}

fn category_spend(txns: &[Transaction]) -> Vec<CategorySpend> {
    let mut out: Vec<CategorySpend> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in txns.iter().filter(|t| t.is_expense()) {
        let idx = *index.entry(t.category.as_str()).or_insert_with(|| {
            out.push(CategorySpend {
                category: t.category.clone(),
                total: 0.0,
            });
            out.len() - 1
        });
        out[idx].total += t.amount;
    }

    for c in &mut out {
        c.total = c.total.abs();
    }
    // Stable: equal totals stay in first-seen order.
    out.sort_by(|a, b| b.total.total_cmp(&a.total));
    out
}

fn monthly_trend(txns: &[Transaction]) -> BTreeMap<YearMonth, f64> {
    let mut trend = BTreeMap::new();
    for t in txns {
        let Some(date) = parse_calendar_date(&t.date) else {
            continue;
        };
        *trend.entry(YearMonth::of(date)).or_insert(0.0) += t.amount;
    }
    trend
}
