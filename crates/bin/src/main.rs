use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;
mod session;
mod templates;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sitebuilder=info".parse()?))
        .init();

    let cli = Cli::parse();
    let format = cli.output_format();

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Health(args) => commands::health::run(args).await,
        Commands::Signup(args) => commands::account::signup(args, format).await,
        Commands::Login(args) => commands::account::login(args, format).await,
        Commands::Logout(args) => commands::account::logout(args, format).await,
        Commands::Whoami(args) => commands::account::whoami(args, format).await,
        Commands::Users(args) => commands::account::users(args, format).await,
        Commands::Search(args) => commands::domains::search(args, format).await,
        Commands::Register(args) => commands::domains::register(args, format).await,
        Commands::Domains(args) => commands::domains::list(args, format).await,
        Commands::Preview(args) => commands::domains::preview(args, format).await,
        Commands::Draft(args) => commands::domains::draft(args, format).await,
        Commands::Publish(args) => commands::domains::publish(args, format).await,
        Commands::Visit(args) => commands::visit::run(args, format).await,
    }
}
