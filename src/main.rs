use affinity::cli::commands::{Cli, Commands};
use affinity::config::Config;
use affinity::domain::ports::user_repository::NewUser;
use affinity::Affinity;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries only JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("affinity=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let app = match Config::from_env().and_then(|config| Affinity::new(&config)) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing affinity: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(app, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: Affinity, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Sync => {
            let report = app.sync().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Similar {
            interests,
            k,
            register,
        } => {
            app.sync().await?;
            let matched = app.find_similar(&interests, k, register).await?;
            println!("{}", serde_json::to_string_pretty(&matched)?);
        }
        Commands::Neighbors { id, k } => {
            app.sync().await?;
            let results = app.similar_to_user(&id, k)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::UserAdd { json } => {
            let user: NewUser = serde_json::from_str(&json)?;
            let id = app.add_user(&user.name, user.interests)?;
            println!("{}", serde_json::json!({ "id": id }));
        }
        Commands::Users => {
            let users = app.users()?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Commands::Stats => {
            app.sync().await?;
            let stats = app.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
