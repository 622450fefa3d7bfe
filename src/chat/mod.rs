use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::Config;

pub mod openai;

pub use openai::ChatClient;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Talk {
    pub role: Role,
    pub content: String,
}

impl Talk {
    pub fn new(role: Role, content: String) -> Self {
        Self { role, content }
    }
}

/// A single prompt submitted to a completion service.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
}

/// Text-generation capability the pipeline depends on.
///
/// The live implementation is [`ChatClient`]; tests plug in fixed replies.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Which model and sampling temperature each pipeline stage uses.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub structure_model: String,
    pub answer_model: String,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            structure_model: "gpt-3.5-turbo".to_string(),
            answer_model: "gpt-4".to_string(),
            temperature: 0.2,
        }
    }
}

impl ModelSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            structure_model: config.structure_model.clone(),
            answer_model: config.answer_model.clone(),
            temperature: config.temperature,
        }
    }

    pub fn structure_request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            prompt,
            model: self.structure_model.clone(),
            temperature: self.temperature,
        }
    }

    pub fn answer_request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            prompt,
            model: self.answer_model.clone(),
            temperature: self.temperature,
        }
    }
}
