//! Network command handlers.

use tabled::Tabled;

use ovpncloud_api::{CloudClient, Network};

use crate::cli::{GlobalOpts, NetworksArgs, NetworksCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Egress")]
    egress: String,
    #[tabled(rename = "Internet Access")]
    internet_access: String,
}

impl From<&Network> for NetworkRow {
    fn from(n: &Network) -> Self {
        Self {
            id: n.id.clone(),
            name: n.name.clone(),
            egress: if n.egress { "yes" } else { "no" }.into(),
            internet_access: n.internet_access.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    client: &CloudClient,
    args: NetworksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let out = match args.command {
        NetworksCommand::List => {
            let networks = client.list_networks().await?;
            output::render_list(
                &global.output,
                &networks,
                |n| NetworkRow::from(n),
                |n| n.id.clone(),
            )?
        }
        NetworksCommand::Get { id } => {
            let network = client.get_network(&id).await?;
            output::render_single(
                &global.output,
                &network,
                |n| {
                    vec![
                        ("ID", n.id.clone()),
                        ("Name", n.name.clone()),
                        ("Description", n.description.clone()),
                        ("Egress", n.egress.to_string()),
                        ("Internet Access", n.internet_access.clone().unwrap_or_default()),
                    ]
                },
                |n| n.id.clone(),
            )?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
