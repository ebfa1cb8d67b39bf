//! Connector command handlers.

use tabled::Tabled;

use ovpncloud_api::{CloudClient, Connector, NetworkItem, ResourceKind};

use crate::cli::{ConnectorsArgs, ConnectorsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ConnectorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Network Item")]
    network_item: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "IPv4")]
    ipv4: String,
}

impl From<&Connector> for ConnectorRow {
    fn from(c: &Connector) -> Self {
        Self {
            id: c.id.clone().unwrap_or_default(),
            name: c.name.clone(),
            network_item: format!("{} ({})", c.network_item_id, c.network_item_type),
            region: c.vpn_region_id.clone(),
            ipv4: c.ipv4_address.clone(),
        }
    }
}

fn detail(c: &Connector) -> Vec<(&'static str, String)> {
    vec![
        ("ID", c.id.clone().unwrap_or_default()),
        ("Name", c.name.clone()),
        ("Network Item", c.network_item_id.clone()),
        ("Item Type", c.network_item_type.to_string()),
        ("Region", c.vpn_region_id.clone()),
        ("IPv4", c.ipv4_address.clone()),
        ("IPv6", c.ipv6_address.clone()),
    ]
}

fn id_of(c: &Connector) -> String {
    c.id.clone().unwrap_or_default()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &CloudClient,
    args: ConnectorsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConnectorsCommand::List { network } => {
            let connectors = match network {
                Some(ref id) => client.list_connectors_for_network(id).await?,
                None => client.list_connectors().await?,
            };
            let out = output::render_list(
                &global.output,
                &connectors,
                |c| ConnectorRow::from(c),
                id_of,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConnectorsCommand::Get { id } => {
            let connector = client.get_connector(&id).await?;
            let out = output::render_single(&global.output, &connector, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConnectorsCommand::Find { name, network } => {
            let connector = client
                .resolve_connector_by_name(&name, &network)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    kind: ResourceKind::Connector,
                    id: name,
                    list_command: format!("connectors list --network {network}"),
                })?;
            let out = output::render_single(&global.output, &connector, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConnectorsCommand::Create {
            name,
            network_item_id,
            network_item_type,
            vpn_region,
        } => {
            let item = NetworkItem::new(network_item_id, network_item_type.into());
            let created = client
                .create_connector(&Connector::new(name, &item, vpn_region))
                .await?;
            let out = output::render_single(&global.output, &created, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConnectorsCommand::Delete {
            id,
            network_item_id,
            network_item_type,
        } => {
            let item = NetworkItem::new(network_item_id, network_item_type.into());
            client.delete_connector(&id, &item).await?;
            output::print_status(&format!("Connector '{id}' deleted"), global.quiet);
            Ok(())
        }
    }
}
