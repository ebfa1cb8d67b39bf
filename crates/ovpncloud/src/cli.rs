//! Clap derive structures for the `ovpncloud` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

use ovpncloud_api::{NetworkItemType, RouteType};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ovpncloud -- reconcile OpenVPN Cloud connectors, routes and DNS records
#[derive(Debug, Parser)]
#[command(
    name = "ovpncloud",
    version,
    about = "Manage OpenVPN Cloud network configuration from the command line",
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
    /// Tenant profile to use
    #[arg(long, short = 'p', env = "OVPNCLOUD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Tenant API root (overrides profile)
    #[arg(long, env = "OVPNCLOUD_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// API bearer token
    #[arg(long, env = "OVPNCLOUD_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OVPNCLOUD_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "OVPNCLOUD_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "OVPNCLOUD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one id per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage connectors
    #[command(alias = "conn")]
    Connectors(ConnectorsArgs),

    /// Manage network routes
    Routes(RoutesArgs),

    /// Inspect networks
    #[command(alias = "net")]
    Networks(NetworksArgs),

    /// Manage DNS records
    Dns(DnsArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),
}

// ── Shared value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ItemTypeArg {
    Host,
    Network,
}

impl From<ItemTypeArg> for NetworkItemType {
    fn from(arg: ItemTypeArg) -> Self {
        match arg {
            ItemTypeArg::Host => Self::Host,
            ItemTypeArg::Network => Self::Network,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RouteTypeArg {
    #[value(name = "ipv4")]
    IpV4,
    #[value(name = "ipv6")]
    IpV6,
    Domain,
}

impl From<RouteTypeArg> for RouteType {
    fn from(arg: RouteTypeArg) -> Self {
        match arg {
            RouteTypeArg::IpV4 => Self::IpV4,
            RouteTypeArg::IpV6 => Self::IpV6,
            RouteTypeArg::Domain => Self::Domain,
        }
    }
}

// ── Connectors ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConnectorsArgs {
    #[command(subcommand)]
    pub command: ConnectorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConnectorsCommand {
    /// List connectors, optionally only those of one network
    #[command(alias = "ls")]
    List {
        /// Network item id to filter on (exact match)
        #[arg(long, short = 'n')]
        network: Option<String>,
    },

    /// Show a connector by id
    Get { id: String },

    /// Find a connector by name within a network
    Find {
        name: String,

        #[arg(long, short = 'n')]
        network: String,
    },

    /// Create a connector
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        network_item_id: String,

        #[arg(long, value_enum, default_value = "network")]
        network_item_type: ItemTypeArg,

        #[arg(long)]
        vpn_region: String,
    },

    /// Delete a connector
    #[command(alias = "rm")]
    Delete {
        id: String,

        #[arg(long)]
        network_item_id: String,

        #[arg(long, value_enum, default_value = "network")]
        network_item_type: ItemTypeArg,
    },
}

// ── Routes ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: RoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List the routes of a network
    #[command(alias = "ls")]
    List { network: String },

    /// Show one route of a network
    Get { network: String, id: String },

    /// Find a route by id across every network
    Resolve { id: String },

    /// Create a route
    Create {
        network: String,

        #[arg(long = "type", value_enum)]
        route_type: RouteTypeArg,

        /// Subnet (ipv4/ipv6) or domain name
        #[arg(long)]
        value: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Replace a route
    Update {
        network: String,
        id: String,

        #[arg(long = "type", value_enum)]
        route_type: RouteTypeArg,

        #[arg(long)]
        value: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a route and wait until it is gone
    #[command(alias = "rm")]
    Delete { network: String, id: String },
}

// ── Networks ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworksArgs {
    #[command(subcommand)]
    pub command: NetworksCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworksCommand {
    /// List networks
    #[command(alias = "ls")]
    List,

    /// Show a network by id
    Get { id: String },
}

// ── DNS ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// Show a DNS record by id
    Get { id: String },

    /// Create a DNS record
    Create {
        #[arg(long)]
        domain: String,

        #[arg(long, default_value = "")]
        description: String,

        /// IPv4 address (repeatable)
        #[arg(long = "ipv4")]
        ipv4_addresses: Vec<String>,

        /// IPv6 address (repeatable)
        #[arg(long = "ipv6")]
        ipv6_addresses: Vec<String>,
    },

    /// Delete a DNS record
    #[command(alias = "rm")]
    Delete { id: String },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Write a profile to the config file
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        #[arg(long)]
        base_url: String,

        /// Environment variable holding the API token
        #[arg(long, default_value = "OVPNCLOUD_API_TOKEN")]
        token_env: String,
    },

    /// List configured profiles
    Profiles,
}
