use accounting_calculators::llm::{AccountingAssistant, AssistantTask, OpenAiClient};
use accounting_calculators::StatementTable;
use dotenv::dotenv;
use std::error::Error;
use std::io::{self, Write};

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn choose_task() -> Result<Option<AssistantTask>, Box<dyn Error>> {
    println!("1) Statement analysis (CSV file)");
    println!("2) Account classification");
    println!("3) Accounting question");
    println!("q) Quit");

    let task = match read_line("> ")?.as_str() {
        "1" => {
            let path = read_line("CSV path: ")?;
            let table = StatementTable::from_csv_reader(std::fs::File::open(path)?)?;
            println!("\nLoaded data:\n{}", table.to_text());
            AssistantTask::StatementAnalysis(table)
        }
        "2" => AssistantTask::AccountClassification(read_line("Transaction description: ")?),
        "3" => AssistantTask::AccountingQuestion(read_line("Your question: ")?),
        "q" | "quit" | "exit" => return Ok(None),
        other => {
            println!("Unknown option '{}'", other);
            return choose_task();
        }
    };
    Ok(Some(task))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let client = match OpenAiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {}. Check your .env file.", e);
            std::process::exit(1);
        }
    };

    println!("💬 Accounting Assistant ({})\n", client.model());
    let assistant = AccountingAssistant::new(client);

    while let Some(task) = choose_task()? {
        println!("\nThinking...");
        match assistant.run(&task).await {
            Ok(answer) => {
                println!("\n### {}\n{}\n", task.title(), answer);
                println!("------------------------------------------------------------------");
            }
            Err(e) => eprintln!("❌ Error: {}", e),
        }
    }

    Ok(())
}
