//! Regex scanners for money amounts in unstructured text.
//!
//! Statement lines:  "WHOLE FOODS MKT 04/12      -$1,204.50"  → last amount token wins.
//! Free text:        "I spent $120 on flight tickets and $80 on hotel."
//!                   → one (amount, description) phrase per non-overlapping match.

use regex::Regex;

use ledgerlens_core::Result;

/// Optional sign, optional `$`, digit groups with optional thousands separators, optional fraction.
const STATEMENT_AMOUNT: &str = r"[-+]?\$?\d+(?:,\d{3})*(?:\.\d+)?";

/// Amount, optional "on"/"for", then a 2–61 character description run starting with a letter.
const SPENDING_PHRASE: &str = concat!(
    r"(?i)(?P<amount>\$?\d+(?:\.\d+)?)\s*(?:on|for)?\s*",
    r"(?P<desc>[A-Za-z][A-Za-z0-9\s\-&/]{1,60})"
);

/// Strip `$` and thousands separators, then parse. `None` when not a finite number.
pub fn parse_money(token: &str) -> Option<f64> {
    let cleaned: String = token.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The amount selected from one statement line
#[derive(Debug, Clone, PartialEq)]
pub struct LineAmount {
    /// Matched token as it appeared, e.g. "-$1,204.50"
    pub token: String,
    pub value: f64,
    /// Line text with the matched token removed, trimmed
    pub remainder: String,
}

pub struct AmountScanner {
    re: Regex,
}

impl AmountScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re: Regex::new(STATEMENT_AMOUNT)?,
        })
    }

    /// All amount-like tokens on the line, left to right.
    pub fn tokens<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.re.find_iter(line).map(|m| m.as_str()).collect()
    }

    /// Take the trailing amount on the line. `None` if there is no token or it does not parse.
    pub fn last_amount(&self, line: &str) -> Option<LineAmount> {
        let m = self.re.find_iter(line).last()?;
        let value = parse_money(m.as_str())?;

        let mut remainder = String::with_capacity(line.len());
        remainder.push_str(&line[..m.start()]);
        remainder.push_str(&line[m.end()..]);

        Some(LineAmount {
            token: m.as_str().to_string(),
            value,
            remainder: remainder.trim().to_string(),
        })
    }
}

/// One spending phrase found in free text
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub amount: f64,
    pub description: String,
}

pub struct PhraseScanner {
    re: Regex,
}

impl PhraseScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re: Regex::new(SPENDING_PHRASE)?,
        })
    }

    /// Non-overlapping matches, left to right. Candidates whose amount does not parse are dropped.
    pub fn scan(&self, text: &str) -> Vec<Phrase> {
        self.re
            .captures_iter(text)
            .filter_map(|caps| {
                let amount = parse_money(&caps["amount"])?;
                let description = caps["desc"]
                    .trim()
                    .trim_end_matches(|c: char| c == ',' || c == '.' || c.is_whitespace())
                    .to_string();
                Some(Phrase { amount, description })
            })
            .collect()
    }
}
