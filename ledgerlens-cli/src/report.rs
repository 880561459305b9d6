//! Plain-text rendering of transactions and metrics for the terminal.

use std::fmt::Write;

use ledgerlens_core::TransactionSet;
use ledgerlens_finance::MetricsResult;

pub fn preview(txns: &TransactionSet, limit: usize, cur: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Parsed transactions ({})\n", txns.len());
    let _ = writeln!(out, "{:<12} {:<36} {:>12}  {}", "date", "description", "amount", "category");
    for t in txns.iter().take(limit) {
        let _ = writeln!(
            out,
            "{:<12} {:<36} {:>12}  {}",
            truncate(&t.date, 12),
            truncate(&t.description, 36),
            money(t.amount, cur),
            t.category
        );
    }
    if txns.len() > limit {
        let _ = writeln!(out, "... {} more", txns.len() - limit);
    }
    out
}

pub fn summary(m: &MetricsResult, cur: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Financial summary\n");
    let _ = writeln!(out, "Total income:   {}", money(m.total_income, cur));
    let _ = writeln!(out, "Total expenses: {}", money(m.total_expenses, cur));
    let _ = writeln!(out, "Net savings:    {}", money(m.net_savings, cur));
    let _ = writeln!(out, "Savings rate:   {:.2}%", m.savings_rate);

    if !m.category_spend.is_empty() {
        let _ = writeln!(out, "\n## Spending by category\n");
        for c in &m.category_spend {
            let _ = writeln!(out, "- {:<24} {}", c.category, money(c.total, cur));
        }
    }

    if !m.monthly_trend.is_empty() {
        let _ = writeln!(out, "\n## Monthly trend (net)\n");
        for (month, net) in &m.monthly_trend {
            let _ = writeln!(out, "- {month}  {}", money(*net, cur));
        }
    }

    if m.has_anomalies() {
        let b = &m.anomaly_bounds;
        let _ = writeln!(
            out,
            "\n## Anomalous transactions (outside {} .. {})\n",
            money(b.lower, cur),
            money(b.upper, cur)
        );
        for t in &m.anomalies {
            let _ = writeln!(out, "- {} | {} | {}", t.date, t.description, money(t.amount, cur));
        }
    }
    out
}

fn money(v: f64, cur: &str) -> String {
    if v < 0.0 {
        format!("-{cur}{:.2}", v.abs())
    } else {
        format!("{cur}{v:.2}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}
