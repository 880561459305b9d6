//! Mock backend: deterministic advice derived from the prompt, no network.

use ledgerlens_core::{Error, Result};

use super::DISCLAIMER;

#[derive(Clone, Default)]
pub struct MockBackend {
    fail: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// A backend whose every request fails like an unreachable service.
    pub fn failing() -> Self {
        Self { fail: true }
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        if self.fail {
            return Err(Error::UpstreamAdvisory("mock backend unavailable".to_string()));
        }

        let metric_lines: Vec<&str> = prompt
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with("- "))
            .collect();

        Ok(format!(
            "Summary of your finances:\n{}\n\n{DISCLAIMER}",
            metric_lines.join("\n")
        ))
    }
}
