use std::sync::Arc;

use clap::{Parser, Subcommand};

use verb_trainer::config::{EvaluatorConfig, MailConfig, state_file_path};
use verb_trainer::evaluator::create_evaluator;
use verb_trainer::mail::{ImapInbox, SmtpOutbox};
use verb_trainer::state::{ExerciseTracker, FileBackend};
use verb_trainer::trainer::{CheckOutcome, Trainer};

#[derive(Parser)]
#[command(name = "verb-trainer")]
#[command(about = "Daily Spanish verb practice over email")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select today's verb and tenses, save state, send the exercise email
    SendDaily {
        /// Deterministic selection seed, for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fetch replies, evaluate with the LLM, send the feedback email
    CheckReplies,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mail_config = MailConfig::from_env()?;
    let target = mail_config.target_email.clone();
    let tracker = ExerciseTracker::new(Arc::new(FileBackend::new(state_file_path())));
    let inbox = Arc::new(ImapInbox::new(mail_config.clone()));
    let outbox = Arc::new(SmtpOutbox::new(mail_config));
    let trainer = Trainer::new(inbox, outbox, tracker, target);

    match cli.command {
        Command::SendDaily { seed } => {
            let outcome = trainer.send_daily(seed).await?;
            println!(
                "Sent daily exercise: {} (mixed tenses)",
                outcome.verb.to_uppercase()
            );
        }
        Command::CheckReplies => {
            let evaluator = create_evaluator(&EvaluatorConfig::from_env()?);
            match trainer.check_replies(evaluator.as_ref()).await? {
                CheckOutcome::NoPending => {
                    println!("No pending exercise (run send-daily first).");
                }
                CheckOutcome::AlreadyProcessed => {
                    println!("Reply for today's exercise already processed. Nothing to do.");
                }
                CheckOutcome::NoReply => {
                    println!(
                        "No reply found. Reply to the daily exercise email with your 5 sentences."
                    );
                }
                CheckOutcome::FeedbackSent { sentences } => {
                    println!("Feedback email sent ({sentences} sentences evaluated).");
                }
            }
        }
    }

    Ok(())
}
