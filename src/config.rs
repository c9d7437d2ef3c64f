//! Application configuration: compiled-in defaults, optionally overridden by a
//! JSON document stored under `cp_config` in local storage.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::assistant::credentials::{BrowserStorage, KeyValueStore};
use crate::board::BoardConfig;
use crate::util::{clog, cwarn};

pub const CONFIG_STORAGE_KEY: &str = "cp_config";

pub const SYSTEM_PROMPT: &str = "You are LYRA, the assistant on Dhananjay Kumar Seth's portfolio website. \
Dhananjay is an Electronics and Communication Engineering student who works on game development (Roblox, Unity) \
and electronics projects. Only answer questions about Dhananjay, his projects, skills, education, resume and how to contact him. \
Politely decline anything unrelated. Keep answers under three sentences.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub timeout_ms: u32,
    /// Pause before a canned reply is shown, so the widget looks like it is typing.
    pub reply_delay_ms: u32,
    /// Replaces the built-in generic replies when non-empty.
    pub generic_replies: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 150,
            timeout_ms: 8000,
            reply_delay_ms: 1000,
            generic_replies: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub assistant: AssistantConfig,
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parsing app config override")
    }

    /// Defaults merged with any stored override; a bad override is ignored.
    pub fn load_from<S: KeyValueStore>(store: &S) -> Self {
        let Some(raw) = store.get(CONFIG_STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(cfg) => {
                clog("config: applied stored override");
                cfg
            }
            Err(e) => {
                cwarn(&format!("config: {e:#}; using defaults"));
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        Self::load_from(&BrowserStorage)
    }
}
