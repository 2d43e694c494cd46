//! Clap derive structures for the `pharmadesk` CLI.
//!
//! Defines the command tree, global flags, and the field flags shared by
//! create/update commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pharmadesk -- pharmacy administration from the command line
#[derive(Debug, Parser)]
#[command(
    name = "pharmadesk",
    version,
    about = "Administer pharmacies, owners, users, and duty shifts",
    long_about = "Console for the pharmacy administration backend.\n\n\
        Log in once with `pharmadesk login`; the session token is kept in the\n\
        system keyring (or a private file) and reused by later commands.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "PHARMADESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "PHARMADESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session token (overrides the stored one)
    #[arg(long, env = "PHARMADESK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PHARMADESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PHARMADESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "PHARMADESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Manage pharmacy owners
    #[command(alias = "duenios")]
    Owners(OwnersArgs),

    /// Manage pharmacies
    #[command(alias = "ph")]
    Pharmacies(PharmaciesArgs),

    /// Manage console users
    Users(UsersArgs),

    /// List zones, codes, and controlled-substance categories
    #[command(alias = "refs")]
    References(ReferencesArgs),

    /// Duty shift report and owner notifications
    Shifts(ShiftsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login e-mail (defaults to the profile's email)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password; prompted for when unset
    #[arg(long, env = "PHARMADESK_PASSWORD", hide = true, hide_env_values = true)]
    pub password: Option<String>,
}

// ── Owners ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OwnersArgs {
    #[command(subcommand)]
    pub command: OwnersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OwnersCommand {
    /// List owners
    #[command(alias = "ls")]
    List {
        /// Only owners whose full name contains this text
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },

    /// Show one owner
    Get {
        /// Owner id
        id: String,
    },

    /// Register an owner
    Create(OwnerFields),

    /// Edit an owner; only the given fields change
    Update {
        /// Owner id
        id: String,

        #[command(flatten)]
        fields: OwnerFields,
    },

    /// Delete an owner
    #[command(alias = "rm")]
    Delete {
        /// Owner id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct OwnerFields {
    /// Given name
    #[arg(long)]
    pub name: Option<String>,

    /// First surname
    #[arg(long)]
    pub first_last_name: Option<String>,

    /// Second surname (empty string clears it)
    #[arg(long)]
    pub second_surname: Option<String>,

    /// Identity card number
    #[arg(long)]
    pub ci: Option<String>,

    /// Cellphone number
    #[arg(long)]
    pub cellphone: Option<String>,

    /// Contact e-mail (empty string clears it)
    #[arg(long)]
    pub email: Option<String>,
}

// ── Pharmacies ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PharmaciesArgs {
    #[command(subcommand)]
    pub command: PharmaciesCommand,
}

#[derive(Debug, Subcommand)]
pub enum PharmaciesCommand {
    /// List pharmacies
    #[command(alias = "ls")]
    List {
        /// Only pharmacies whose name contains this text
        #[arg(long, short = 'n')]
        name: Option<String>,
    },

    /// Server-side search
    Search {
        /// Filter text passed to the backend
        filter: String,
    },

    /// Show one pharmacy
    Get {
        /// Pharmacy id
        id: String,
    },

    /// Register a pharmacy
    Create(PharmacyFields),

    /// Edit a pharmacy; only the given fields change
    Update {
        /// Pharmacy id
        id: String,

        #[command(flatten)]
        fields: PharmacyFields,
    },

    /// Delete a pharmacy
    #[command(alias = "rm")]
    Delete {
        /// Pharmacy id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct PharmacyFields {
    /// Pharmacy name
    #[arg(long)]
    pub name: Option<String>,

    /// Registry record number
    #[arg(long)]
    pub record_number: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,

    /// Registered business name
    #[arg(long)]
    pub business_name: Option<String>,

    /// Tax id
    #[arg(long)]
    pub nit: Option<String>,

    /// Zone (id or name)
    #[arg(long)]
    pub zone: Option<String>,

    /// Owner (id or full name)
    #[arg(long)]
    pub owner: Option<String>,

    /// Pharmacy code (id or name)
    #[arg(long)]
    pub code: Option<String>,

    /// Responsible user (id or username)
    #[arg(long)]
    pub user: Option<String>,

    /// Controlled-substance category (id or name, empty string clears it)
    #[arg(long)]
    pub substances: Option<String>,

    /// Opening hours: 8 or 12
    #[arg(long)]
    pub hours: Option<String>,

    /// Sector: private, public, 0, or 1
    #[arg(long)]
    pub sector: Option<String>,

    /// Photo to attach (png, jpeg, gif, webp; at most 5 MiB)
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<PathBuf>,

    /// Remove the current photo
    #[arg(long)]
    pub clear_image: bool,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    #[command(alias = "ls")]
    List {
        /// Only users whose username contains this text
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },

    /// Show one user
    Get {
        /// User id
        id: String,
    },

    /// Create a user (password prompted for when not given)
    Create(UserFields),

    /// Edit a user; the password only changes when one is given
    Update {
        /// User id
        id: String,

        #[command(flatten)]
        fields: UserFields,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete {
        /// User id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct UserFields {
    /// Username
    #[arg(long)]
    pub username: Option<String>,

    /// Login e-mail
    #[arg(long)]
    pub email: Option<String>,

    /// Role (e.g., admin)
    #[arg(long)]
    pub role: Option<String>,

    /// New password
    #[arg(long, env = "PHARMADESK_NEW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Prompt for a new password
    #[arg(long, conflicts_with = "password")]
    pub ask_password: bool,
}

// ── References ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReferencesArgs {
    #[command(subcommand)]
    pub command: ReferencesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReferencesCommand {
    /// List zones
    Zones,
    /// List pharmacy codes
    Codes,
    /// List controlled-substance categories
    Substances,
}

// ── Shifts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ShiftsArgs {
    #[command(subcommand)]
    pub command: ShiftsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShiftsCommand {
    /// Show the duty shifts for a month
    #[command(alias = "ls")]
    List(ShiftFilterArgs),

    /// E-mail each listed owner their shift
    SendEmails(ShiftFilterArgs),
}

#[derive(Debug, Args)]
pub struct ShiftFilterArgs {
    /// Pharmacy code to filter by
    #[arg(long, short = 'c')]
    pub code: Option<String>,

    /// Month as a number (1-12) or name; defaults to the current month
    #[arg(long, short = 'm')]
    pub month: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Print the config file path
    Path,

    /// Set the backend URL of the active profile
    SetUrl {
        /// Backend base URL, e.g. https://pharmacies.example.org
        url: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
