//! Anthropic Messages API backend

use std::time::Duration;

use serde::{Deserialize, Serialize};

use ledgerlens_core::{Error, Result};

use super::{AdvisorySettings, http_client, request_error};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Msg<'a>>,
}

#[derive(Deserialize)]
struct Resp {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    t: String,
    text: Option<String>,
}

impl AnthropicBackend {
    pub fn new(settings: &AdvisorySettings, api_key: String) -> Result<Self> {
        Ok(Self {
            client: http_client(settings.timeout())?,
            base_url: settings.base_url().trim_end_matches('/').to_string(),
            model: settings.model().to_string(),
            api_key,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout: settings.timeout(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = Req {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error("anthropic", self.timeout, e))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(Error::UpstreamAdvisory(format!("anthropic error: {status} {txt}")));
        }

        let out: Resp = resp
            .json()
            .await
            .map_err(|e| Error::UpstreamAdvisory(format!("parse anthropic response: {e}")))?;

        Ok(collect_text(out.content))
    }
}

fn collect_text(blocks: Vec<ContentBlock>) -> String {
    let mut s = String::new();
    for b in blocks {
        if b.t == "text" {
            if let Some(t) = b.text {
                s.push_str(&t);
            }
        }
    }
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_text_blocks_only() {
        let resp: Resp = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Spend less "},{"type":"tool_use"},{"type":"text","text":"on rent."}]}"#,
        )
        .unwrap();
        assert_eq!(collect_text(resp.content), "Spend less on rent.");
    }
}
