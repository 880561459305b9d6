//! OpenAI-compatible chat completions backend
//!
//! Works with any server implementing `/v1/chat/completions`: NVIDIA's hosted
//! endpoint (the default), OpenAI, vLLM, LocalAI, llama-server.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use ledgerlens_core::{Error, Result};

use super::{AdvisorySettings, http_client, request_error};

#[derive(Clone)]
pub struct OpenAiCompatibleBackend {
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
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: Option<String>,
}

impl OpenAiCompatibleBackend {
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
        format!("{}/v1/chat/completions", self.base_url)
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error("openai_compatible", self.timeout, e))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(Error::UpstreamAdvisory(format!("API error: {status} {txt}")));
        }

        let out: Resp = resp
            .json()
            .await
            .map_err(|e| Error::UpstreamAdvisory(format!("parse response: {e}")))?;

        out.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| Error::UpstreamAdvisory("response contained no choices".to_string()))
    }
}
