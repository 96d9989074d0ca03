// Prompt templates for the free-text assistant tasks

pub const SYSTEM_PROMPT: &str = "You are an accounting expert.";

pub fn statement_analysis_prompt(table_text: &str) -> String {
    format!(
        "Analyze the following financial data and provide important insights:\n{}",
        table_text
    )
}

pub fn classification_prompt(description: &str) -> String {
    format!(
        "Classify the following accounting transaction and suggest the appropriate account:\n{}",
        description
    )
}
