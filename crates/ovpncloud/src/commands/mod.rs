//! Command dispatch.

pub mod config_cmd;
pub mod connectors;
pub mod dns;
pub mod networks;
pub mod routes;

use crate::cli::{Command, GlobalOpts};
use crate::config::Tenant;
use crate::error::CliError;

/// Route a parsed command to its handler. Only tenant commands load
/// credentials and build a client.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Connectors(args) => {
            let tenant = Tenant::connect(global)?;
            tenant.finish(connectors::handle(&tenant.client, args, global).await)
        }
        Command::Routes(args) => {
            let tenant = Tenant::connect(global)?;
            tenant.finish(routes::handle(&tenant.client, args, global).await)
        }
        Command::Networks(args) => {
            let tenant = Tenant::connect(global)?;
            tenant.finish(networks::handle(&tenant.client, args, global).await)
        }
        Command::Dns(args) => {
            let tenant = Tenant::connect(global)?;
            tenant.finish(dns::handle(&tenant.client, args, global).await)
        }
    }
}
