use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "studystreak", version, about = "StudyStreak CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study streak tracking
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Pomodoro timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Today's motivational quote
    Quote,
    /// Daily practice question
    Question {
        #[command(subcommand)]
        action: commands::question::QuestionAction,
    },
    /// Personal-message banners
    Messages {
        #[command(subcommand)]
        action: commands::messages::MessagesAction,
    },
    /// Days remaining until the exam
    Countdown,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Quote => commands::quote::run(),
        Commands::Question { action } => commands::question::run(action),
        Commands::Messages { action } => commands::messages::run(action),
        Commands::Countdown => commands::countdown::run(),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "studystreak",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
