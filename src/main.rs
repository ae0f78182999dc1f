use chrono::Local;
use clap::Parser;
use journal_bot::application::{
    init, ConfigService, JournalPipeline, PublishService, Scheduler, SystemClock,
};
use journal_bot::cli::{format_config, format_prompt_list, format_publish_result, Cli, Commands};
use journal_bot::error::Result;
use journal_bot::infrastructure::{
    Config, Credentials, FileSystemRepository, GitHubContents, JournalRepository,
};
use journal_bot::logging;
use rand::rngs::ThreadRng;
use std::path::PathBuf;
use tracing::{error, info};

type DailyScheduler = Scheduler<JournalPipeline<GitHubContents, ThreadRng>, SystemClock>;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(log_file(&cli).as_deref(), cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// The log file lives in an existing journal root; `init` logs to stderr only.
fn log_file(cli: &Cli) -> Option<PathBuf> {
    match cli.command {
        Commands::Init => None,
        _ if cli.root.is_dir() => Some(FileSystemRepository::new(cli.root.clone()).log_path()),
        _ => None,
    }
}

fn run(cli: Cli) -> Result<()> {
    let repo = FileSystemRepository::new(cli.root);

    match cli.command {
        Commands::Run { date } => {
            let mut scheduler = build_scheduler(repo)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());

            info!("Running journal bot for {}", date.format("%Y-%m-%d"));
            let result = scheduler
                .run_immediate(date)
                .inspect_err(|e| error!("Journal bot failed: {}", e))?;

            print!("{}", format_publish_result(&result));
            Ok(())
        }
        Commands::Schedule { at } => {
            let config = repo.load_config()?;
            let at = match at {
                Some(at) => at,
                None => config.schedule_time()?,
            };
            let mut scheduler = build_scheduler(repo)?;

            info!("Journal bot scheduled daily at {}", at);
            scheduler.run_recurring(at);
            Ok(())
        }
        Commands::Init => init::init(repo.root()),
        Commands::Prompts => {
            let config = repo.load_config()?;
            print!("{}", format_prompt_list(&config.prompts));
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(repo);

            if list {
                print!("{}", format_config(&service.list()?));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: journal-bot config [--list | <key> [<value>]]");
                println!("Valid keys: repository, branch, journal_dir, schedule, api_url");
                Ok(())
            }
        }
    }
}

/// Load config and credentials, failing fast before any pipeline work.
fn build_scheduler(repo: FileSystemRepository) -> Result<DailyScheduler> {
    let config: Config = repo.load_config()?;
    let credentials = Credentials::from_env()?;
    info!(
        "Publishing to {}/{} on branch {}",
        credentials.account, config.repository, config.branch
    );

    let remote = GitHubContents::new(
        &config.api_url,
        &config.repository,
        &config.branch,
        credentials,
    )?;
    let publisher = PublishService::new(repo, remote, config.journal_dir);
    let pipeline = JournalPipeline::new(config.prompts, publisher, rand::rng());

    Ok(Scheduler::new(pipeline, SystemClock))
}
