use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use equiphelper_client::{
    render_message, ChatSession, ConversationStorage, Equipment, EquipmentCatalog, FileStorage,
    HttpAskBackend, Segment, SubmitOutcome,
};
use equiphelper_types::ChatMessage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Terminal chat client for the equipHelper answer service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the answer service
    #[arg(long, env = "EQUIPHELPER_SERVER", default_value = "http://localhost:3000")]
    server: String,

    /// Directory holding the stored conversation
    #[arg(long, env = "EQUIPHELPER_DATA_DIR", default_value = ".equiphelper")]
    data_dir: PathBuf,

    /// Directory the PDF export is written to
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

const HELP: &str = "\
Commands:
  /equipment [name]  list categories, or select one (\"/equipment none\" clears)
  /questions         list questions for the selected category
  /pick <n>          ask question n from the list
  /clear             clear the conversation
  /export            save the conversation as a PDF
  /help              show this help
  /quit              exit
Anything else is sent as a question.";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let storage = FileStorage::in_dir(&args.data_dir);
    let mut session = ChatSession::open(
        HttpAskBackend::new(&args.server),
        storage,
        EquipmentCatalog::standard()?,
    );

    println!("equipHelper");
    if session.is_first_visit() {
        println!("Welcome! Ask me about firefighting equipment or maintenance.");
    }
    for message in session.messages() {
        print_message(message);
    }
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit" | "/exit", _) => break,
            ("/help", _) => println!("{}", HELP),
            ("/equipment", "") => {
                for equipment in session.catalog().categories() {
                    println!("  {}", equipment);
                }
            }
            ("/equipment", "none") => session.select_equipment(None),
            ("/equipment", name) => match name.parse::<Equipment>() {
                Ok(equipment) => {
                    session.select_equipment(Some(equipment));
                    print_questions(&session);
                }
                Err(e) => println!("{}", e),
            },
            ("/questions", _) => print_questions(&session),
            ("/pick", n) => {
                let question = n
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| session.predefined_questions().get(i).cloned());
                match question {
                    Some(question) => {
                        println!("You: {}", question);
                        let outcome = session.select_predefined_question(&question).await;
                        print_reply(&session, outcome);
                    }
                    None => println!("No such question; use /questions to list them."),
                }
            }
            ("/clear", _) => {
                session.clear_history();
                for message in session.messages() {
                    print_message(message);
                }
            }
            ("/export", _) => match session.export_to_document(&args.export_dir) {
                Ok(path) => println!("Saved {}", path.display()),
                Err(e) => println!("Export failed: {}", e),
            },
            _ if line.starts_with('/') => println!("Unknown command; /help lists them."),
            _ => {
                session.set_draft(line);
                let outcome = session.submit_draft().await;
                print_reply(&session, outcome);
            }
        }
    }

    Ok(())
}

fn print_questions<B, S>(session: &ChatSession<B, S>)
where
    B: equiphelper_client::AskBackend,
    S: ConversationStorage,
{
    match session.selected_equipment() {
        Some(equipment) => {
            println!("{} questions:", equipment);
            for (i, question) in session.predefined_questions().iter().enumerate() {
                println!("  {}. {}", i + 1, question);
            }
        }
        None => println!("Select equipment first: /equipment <name>"),
    }
}

fn print_reply<B, S>(session: &ChatSession<B, S>, outcome: SubmitOutcome)
where
    B: equiphelper_client::AskBackend,
    S: ConversationStorage,
{
    if outcome == SubmitOutcome::Ignored {
        return;
    }
    if let Some(message) = session.messages().last() {
        print_message(message);
    }
}

fn print_message(message: &ChatMessage) {
    println!("{}:", message.kind.sender());
    for segment in render_message(message) {
        match segment {
            Segment::Paragraph(text) => println!("  {}", text),
            Segment::Image(url) => println!("  [image: {}]", url),
        }
    }
}
