use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mock_test::{ApiClient, Config, Start};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the quiz API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the stored test result
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the home screen
    Home,
    /// Start the test directly
    Test,
    /// Open the admin panel
    Admin,
    /// Show the last stored result
    Result,
    /// Print one question with its answer as JSON
    Show {
        /// Question id
        id: i64,
    },
}

fn config_from(args: &Args) -> Config {
    let mut config = Config::from_env();
    if let Some(api_url) = &args.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(state_dir) = &args.state_dir {
        config.state_dir = state_dir.clone();
        if args.log_dir.is_none() {
            config.log_dir = state_dir.join("logs");
        }
    }
    if let Some(log_dir) = &args.log_dir {
        config.log_dir = log_dir.clone();
    }
    config
}

async fn show(config: &Config, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::new(config.api_url.as_str())?;
    let question = api.get_question_with_answer(id).await?;
    println!("{}", serde_json::to_string_pretty(&question)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = config_from(&args);
    let _guard = match mock_test::logging::init(&config.log_dir, &config.log_filter) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error setting up logging in {}: {}", config.log_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let start = match args.command {
        Some(Command::Show { id }) => {
            return match show(&config, id).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error fetching question {}: {}", id, e);
                    ExitCode::FAILURE
                }
            };
        }
        Some(Command::Test) => Start::Test,
        Some(Command::Admin) => Start::Admin,
        Some(Command::Result) => Start::Result,
        Some(Command::Home) | None => Start::Home,
    };

    match mock_test::run(&config, start).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("client stopped: {}", e);
            eprintln!("Error running mock test: {}", e);
            ExitCode::FAILURE
        }
    }
}
