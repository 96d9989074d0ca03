use crate::statement::StatementTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
}

/// The free-text menu options that are answered by the chat model instead of a calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssistantTask {
    StatementAnalysis(StatementTable),
    AccountClassification(String),
    AccountingQuestion(String),
}

impl AssistantTask {
    pub fn title(&self) -> &'static str {
        match self {
            AssistantTask::StatementAnalysis(_) => "Statement Analysis",
            AssistantTask::AccountClassification(_) => "Account Classification",
            AssistantTask::AccountingQuestion(_) => "Accounting Questions",
        }
    }
}
