use crate::demo::{
    run_demo, run_journal_digest, run_journal_prompt, run_quiz_questions, run_quiz_score,
    DigestArgs, PromptArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use weaver_core::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Daily Weaver",
    about = "Run the Daily Weaver journal and quiz service, or score answers from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect and score the movie quiz
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
    /// Daily journal helpers backed by the configured data directory
    Journal {
        #[command(subcommand)]
        command: JournalCommand,
    },
    /// Walk through quiz scoring, daily picks, and a journal entry using in-memory storage
    Demo,
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// List the quiz questions and their choices
    Questions,
    /// Score a set of answers and print the ranking and rationale
    Score(ScoreArgs),
}

#[derive(Subcommand, Debug)]
enum JournalCommand {
    /// Show the special question of the day
    Prompt(PromptArgs),
    /// Summarize recorded entries per week, month, or year
    Digest(DigestArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz {
            command: QuizCommand::Questions,
        } => run_quiz_questions(),
        Command::Quiz {
            command: QuizCommand::Score(args),
        } => run_quiz_score(args),
        Command::Journal {
            command: JournalCommand::Prompt(args),
        } => run_journal_prompt(args),
        Command::Journal {
            command: JournalCommand::Digest(args),
        } => run_journal_digest(args),
        Command::Demo => run_demo(),
    }
}
