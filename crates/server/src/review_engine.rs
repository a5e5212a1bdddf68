//! Guideline-aware review generation over a pluggable completion model.

use std::sync::{Arc, OnceLock};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::standards;

const TOP_GUIDELINES: usize = 3;

#[async_trait]
pub trait ReviewModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Google Gemini `generateContent` REST client.
pub struct GeminiModel {
    http: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiModel {
    pub fn new(api_key: String, model: String, api_base: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            api_base,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ReviewModel for GeminiModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await
            .context("gemini request failed")?
            .error_for_status()
            .context("gemini returned an error status")?;
        let reply: GenerateContentResponse = response
            .json()
            .await
            .context("gemini reply was not valid JSON")?;
        let text: String = reply
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(anyhow!("gemini reply contained no text"));
        }
        Ok(text)
    }
}

pub struct ReviewEngine {
    model: Arc<dyn ReviewModel>,
}

impl ReviewEngine {
    pub fn new(model: Arc<dyn ReviewModel>) -> Self {
        Self { model }
    }

    /// Produces the markdown review and the score parsed from its trailing
    /// `Score:` line, if the model supplied one. The full reply, score line
    /// included, stays in the review text.
    pub async fn review(&self, code: &str, standards_text: &str) -> Result<(String, Option<f64>)> {
        let guidelines = standards::top_guidelines(code, standards_text, TOP_GUIDELINES);
        let reply = self.model.complete(&review_prompt(&guidelines, code)).await?;
        let score = extract_score(&reply);
        info!(score, reply_bytes = reply.len(), "review generated");
        Ok((reply, score))
    }

    /// Rewrites the code to comply with the retrieved guidelines.
    pub async fn suggested_fix(&self, code: &str, standards_text: &str) -> Result<String> {
        let guidelines = standards::top_guidelines(code, standards_text, TOP_GUIDELINES);
        self.model.complete(&fix_prompt(&guidelines, code)).await
    }
}

fn review_prompt(guidelines: &str, code: &str) -> String {
    format!(
        "You are a senior code reviewer.\n\n\
         Here are the relevant code review guidelines:\n{guidelines}\n\n\
         Please review the following code and produce output in this format:\n\n\
         1. Start with a Markdown bullet list of all issues and suggestions, \
         indicating severity (Low/Medium/High).\n\
         2. At the very end, on its own line, write: \"Score: X.YZ\", where X.YZ \
         is a decimal between 0.00 and 1.00 representing the overall code \
         quality (higher is better).\n\n\
         Code:\n{code}\n"
    )
}

fn fix_prompt(guidelines: &str, code: &str) -> String {
    format!(
        "You are a senior software engineer.\n\n\
         You must rewrite the code below to fully comply with the following \
         coding standards:\n\n{guidelines}\n\n\
         Instructions:\n\
         - Apply every rule listed above\n\
         - Fix all naming, formatting, structural, and stylistic issues as described\n\
         - Ensure the corrected code is clean, complete, and consistent with the rules\n\
         - Only return the fixed code, without explanations or commentary\n\n\
         Code:\n{code}\n"
    )
}

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^Score:\s*([0-1](?:\.\d{1,2})?)\s*$").expect("score pattern")
    })
}

fn extract_score(reply: &str) -> Option<f64> {
    let captures = score_pattern().captures(reply)?;
    captures.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
#[path = "tests/review_engine_tests.rs"]
mod tests;
