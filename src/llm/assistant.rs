use log::info;

use crate::error::Result;
use crate::llm::client::ChatCompletion;
use crate::llm::prompts::{classification_prompt, statement_analysis_prompt, SYSTEM_PROMPT};
use crate::llm::types::AssistantTask;
use crate::statement::StatementTable;

/// Forwards free-text accounting requests to a chat model and returns its answer verbatim.
///
/// The client handle is passed in once and never replaced.
pub struct AccountingAssistant<C: ChatCompletion> {
    client: C,
}

impl<C: ChatCompletion> AccountingAssistant<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Ask for insights on an uploaded statement; the whole table is embedded in the prompt.
    pub async fn analyze_statement(&self, table: &StatementTable) -> Result<String> {
        info!(
            "Requesting statement analysis for a table with {} rows",
            table.rows.len()
        );
        let prompt = statement_analysis_prompt(&table.to_text());
        self.client.complete(SYSTEM_PROMPT, &prompt).await
    }

    pub async fn classify_transaction(&self, description: &str) -> Result<String> {
        info!("Requesting account classification");
        self.client
            .complete(SYSTEM_PROMPT, &classification_prompt(description))
            .await
    }

    /// The question is sent as-is, without a template.
    pub async fn answer_question(&self, question: &str) -> Result<String> {
        info!("Forwarding accounting question");
        self.client.complete(SYSTEM_PROMPT, question).await
    }

    pub async fn run(&self, task: &AssistantTask) -> Result<String> {
        match task {
            AssistantTask::StatementAnalysis(table) => self.analyze_statement(table).await,
            AssistantTask::AccountClassification(text) => self.classify_transaction(text).await,
            AssistantTask::AccountingQuestion(text) => self.answer_question(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountingError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl ChatCompletion for RecordingClient {
        async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            if self.fail {
                return Err(AccountingError::ChatFailed("offline".to_string()));
            }
            Ok(format!("answer #{}", self.calls.lock().unwrap().len()))
        }
    }

    #[tokio::test]
    async fn test_question_is_forwarded_verbatim() {
        let assistant = AccountingAssistant::new(RecordingClient::default());
        let answer = assistant
            .answer_question("How do I book prepaid rent?")
            .await
            .unwrap();
        assert_eq!(answer, "answer #1");

        let calls = assistant.client().calls.lock().unwrap();
        assert_eq!(calls[0].0, SYSTEM_PROMPT);
        assert_eq!(calls[0].1, "How do I book prepaid rent?");
    }

    #[tokio::test]
    async fn test_statement_table_is_embedded() {
        let assistant = AccountingAssistant::new(RecordingClient::default());
        let table = StatementTable::from_csv_str("Account,2023\nRevenue,1200\n").unwrap();

        assistant
            .run(&AssistantTask::StatementAnalysis(table))
            .await
            .unwrap();

        let calls = assistant.client().calls.lock().unwrap();
        assert!(calls[0].1.contains("Revenue  1200"));
    }

    #[tokio::test]
    async fn test_classification_uses_template() {
        let assistant = AccountingAssistant::new(RecordingClient::default());
        assistant
            .run(&AssistantTask::AccountClassification(
                "Bought a delivery van".to_string(),
            ))
            .await
            .unwrap();

        let calls = assistant.client().calls.lock().unwrap();
        assert!(calls[0].1.starts_with("Classify the following accounting transaction"));
        assert!(calls[0].1.ends_with("Bought a delivery van"));
    }

    #[tokio::test]
    async fn test_client_failure_is_returned_not_panicked() {
        let assistant = AccountingAssistant::new(RecordingClient {
            fail: true,
            ..Default::default()
        });
        let result = assistant.answer_question("anything").await;
        assert!(matches!(result, Err(AccountingError::ChatFailed(_))));
    }
}
