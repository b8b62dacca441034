use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dnsm", version, about = "Manage DNS domains and records")]
pub struct Cli {
    /// API base URL (overrides config and DNSM_BASE_API)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and keep the session for later commands
    Login {
        #[arg(short, long)]
        username: Option<String>,
        /// Remember the credentials for the next login
        #[arg(long, conflicts_with = "forget")]
        remember: bool,
        /// Forget previously remembered credentials
        #[arg(long)]
        forget: bool,
    },
    /// Log out here and on the server
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List domains, one page at a time
    Domains {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Inspect, create or delete a domain
    Domain {
        #[command(subcommand)]
        action: DomainAction,
    },
    /// Manage the records of a domain
    Records {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Navigate to a console route and show where the guard lets you land
    Open { path: String },
    /// List console routes shown in the navigation menu
    Routes {
        /// Include hidden routes such as login and error pages
        #[arg(long)]
        all: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum DomainAction {
    Show { name: String },
    Create { name: String },
    Delete { name: String },
}

#[derive(Debug, Subcommand)]
pub enum RecordAction {
    List {
        domain: String,
    },
    Add {
        domain: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    Update {
        domain: String,
        /// Current name of the record
        record: String,
        #[command(flatten)]
        fields: RecordArgs,
    },
    Delete {
        domain: String,
        record: String,
    },
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "type")]
    pub record_type: String,
    #[arg(long)]
    pub value: String,
    #[arg(long, default_value_t = 600)]
    pub ttl: u32,
    /// MX priority
    #[arg(long)]
    pub priority: Option<u32>,
}
