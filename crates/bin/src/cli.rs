//! CLI argument definitions for the sitebuilder binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Sitebuilder: claim a faux domain and publish a website to it
#[derive(Parser, Debug)]
#[command(name = "sitebuilder")]
#[command(about = "Sitebuilder - register faux domains, edit and publish sites")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sitebuilder web host
    Serve(ServeArgs),
    /// Check health of a running sitebuilder web host
    Health(HealthArgs),
    /// Create an account (does not log in)
    Signup(SignupArgs),
    /// Log in and remember the account for later commands
    Login(LoginArgs),
    /// Forget the logged-in account
    Logout(ProfileOnlyArgs),
    /// Show the logged-in account
    Whoami(ProfileOnlyArgs),
    /// List every account (administrator only)
    Users(ProfileOnlyArgs),
    /// Suggest domain names for a query
    Search(SearchArgs),
    /// Register a domain for the logged-in account
    Register(DomainArgs),
    /// List the logged-in account's domains
    Domains(DomainsArgs),
    /// Print the editor preview of a domain, draft included
    Preview(PreviewArgs),
    /// Save buffers from files into the domain's draft
    Draft(EditArgs),
    /// Publish buffers from files (or the saved draft) as the domain's site
    Publish(EditArgs),
    /// Visit a domain and print the page it shows
    Visit(VisitArgs),
}

/// Where the profile lives and how its administrator is seeded
#[derive(clap::Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Data directory holding sitebuilder.json
    #[arg(short = 'D', long, env = "SITEBUILDER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Password for the administrator account, used only when it does not exist yet
    #[arg(long, env = "SITEBUILDER_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "SITEBUILDER_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "SITEBUILDER_HOST")]
    pub host: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(default_value = "http://127.0.0.1:3000")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

/// Arguments for commands that only need the profile
#[derive(clap::Args, Debug)]
pub struct ProfileOnlyArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the signup command
#[derive(clap::Args, Debug)]
pub struct SignupArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Username; the account email becomes <username>@singla.com
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the login command
#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the search command
#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Name to build candidates from
    pub query: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for commands acting on one domain
#[derive(clap::Args, Debug)]
pub struct DomainArgs {
    /// Full domain name, e.g. mysite.scom
    pub domain: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the domains command
#[derive(clap::Args, Debug)]
pub struct DomainsArgs {
    /// List every registered domain (administrator only)
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the preview command
#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// Full domain name
    pub domain: String,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the draft and publish commands
///
/// Buffers without a file keep what the editor would open with: the saved
/// draft, or the published content.
#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Full domain name
    pub domain: String,

    /// File with the new HTML buffer
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// File with the new CSS buffer
    #[arg(long)]
    pub css: Option<PathBuf>,

    /// File with the new JavaScript buffer
    #[arg(long)]
    pub js: Option<PathBuf>,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the visit command
#[derive(clap::Args, Debug)]
pub struct VisitArgs {
    /// Domain to visit; `.scom` is assumed without an extension
    pub domain: String,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub profile: ProfileArgs,
}
