//! Rule-based backend: fixed-wording advice read straight off the metrics.
//!
//! No prompt and no network. The output is the same for the same metrics,
//! which makes it the offline choice and the one to diff in tests.

use crate::metrics::MetricsResult;

use super::DISCLAIMER;

/// Savings rates below this percentage are called low.
const LOW_SAVINGS_RATE: f64 = 10.0;
/// Below this (and not low) is moderate; at or above is strong.
const STRONG_SAVINGS_RATE: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedBackend;

impl RuleBasedBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn advise(&self, m: &MetricsResult) -> String {
        let mut lines = vec![
            format!("Your total income is ${:.2}.", m.total_income),
            format!("Your total expenses are ${:.2}.", m.total_expenses),
            format!(
                "Your net savings are ${:.2}, resulting in a savings rate of {:.2}%.",
                m.net_savings, m.savings_rate
            ),
            savings_tier(m.savings_rate).to_string(),
        ];

        if let Some(top) = m.top_category() {
            lines.push(format!(
                "Your highest spending category is '{}', totaling ${:.2}.",
                top.category, top.total
            ));
        }

        if m.has_anomalies() {
            lines.push(
                "Some transactions appear unusually large compared to your normal spending. \
                 Reviewing these may help identify errors or one-time expenses."
                    .to_string(),
            );
        }

        lines.push(String::new());
        lines.push(format!("Disclaimer: {DISCLAIMER}"));
        lines.join("\n")
    }
}

fn savings_tier(rate: f64) -> &'static str {
    if rate < LOW_SAVINGS_RATE {
        "Your savings rate is relatively low. You may want to review discretionary spending categories."
    } else if rate < STRONG_SAVINGS_RATE {
        "Your savings rate is moderate. Increasing savings slightly could improve financial resilience."
    } else {
        "Your savings rate is strong. You are saving a healthy portion of your income."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CategorySpend;
    use crate::stats::IqrBounds;
    use ledgerlens_core::Transaction;
    use std::collections::BTreeMap;

    fn metrics(rate: f64, categories: Vec<CategorySpend>, anomalies: Vec<Transaction>) -> MetricsResult {
        MetricsResult {
            total_income: 5000.0,
            total_expenses: 5000.0 * (1.0 - rate / 100.0),
            net_savings: 50.0 * rate,
            savings_rate: rate,
            category_spend: categories,
            monthly_trend: BTreeMap::new(),
            anomalies,
            anomaly_bounds: IqrBounds {
                q1: 0.0,
                q3: 0.0,
                iqr: 0.0,
                lower: 0.0,
                upper: 0.0,
            },
        }
    }

    #[test]
    fn test_savings_tiers() {
        assert!(savings_tier(3.97).contains("relatively low"));
        assert!(savings_tier(10.0).contains("moderate"));
        assert!(savings_tier(19.99).contains("moderate"));
        assert!(savings_tier(20.0).contains("strong"));
        assert!(savings_tier(-12.0).contains("relatively low"));
    }

    #[test]
    fn test_full_advice_text() {
        let m = metrics(
            25.0,
            vec![
                CategorySpend { category: "Rent".into(), total: 1500.0 },
                CategorySpend { category: "Food".into(), total: 400.0 },
            ],
            vec![Transaction::undated("TV", -2400.0)],
        );
        let text = RuleBasedBackend::new().advise(&m);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Your total income is $5000.00.");
        assert_eq!(lines[1], "Your total expenses are $3750.00.");
        assert_eq!(
            lines[2],
            "Your net savings are $1250.00, resulting in a savings rate of 25.00%."
        );
        assert!(lines[3].starts_with("Your savings rate is strong."));
        assert_eq!(lines[4], "Your highest spending category is 'Rent', totaling $1500.00.");
        assert!(lines[5].starts_with("Some transactions appear unusually large"));
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], format!("Disclaimer: {DISCLAIMER}"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_optional_sentences_are_left_out() {
        let text = RuleBasedBackend::new().advise(&metrics(15.0, vec![], vec![]));
        assert!(text.contains("Your savings rate is moderate."));
        assert!(!text.contains("highest spending category"));
        assert!(!text.contains("unusually large"));
        assert!(text.ends_with(&format!("\n\nDisclaimer: {DISCLAIMER}")));
    }
}
