use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    /// Overrides `client.server_address` from the configuration
    #[arg(long)]
    pub server: Option<String>,

    /// Signs in with this user if no session could be resumed
    #[arg(short, long, env = "OPS_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "OPS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Branch to sign in to
    #[arg(short, long, default_value_t = 1)]
    pub branch: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Shows the signed in user and their permissions
    Whoami,
    /// Lists the navigation entries the session may see
    Nav,
    /// Checks if the session may open a page
    Page { path: String },
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Quotations(QuotationsCommand),
    #[command(subcommand)]
    Roles(RolesCommand),
    #[command(subcommand)]
    Permissions(PermissionsCommand),
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum UsersCommand {
    List {
        /// Case insensitive match on id, username, email, role or branch
        #[arg(long, default_value = "")]
        search: String,
    },
    Create {
        username: String,
        email: String,
        #[arg(long, env = "OPS_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        role_id: u64,
        #[arg(long)]
        branch_id: Option<u64>,
    },
    /// Switches a user between active and inactive
    ToggleStatus { id: u64 },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum QuotationsCommand {
    List,
    Create {
        client_name: String,
        /// Taken as typed so that validation can report bad input
        amount: String,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum RolesCommand {
    Create { name: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PermissionsCommand {
    Create {
        name: String,
        #[arg(default_value = "")]
        description: String,
    },
}
