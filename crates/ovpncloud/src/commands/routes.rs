//! Route command handlers.

use tabled::Tabled;

use ovpncloud_api::{CloudClient, NetworkRoute, ResourceKind, Route};

use crate::cli::{GlobalOpts, RoutesArgs, RoutesCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    route_type: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Route> for RouteRow {
    fn from(r: &Route) -> Self {
        Self {
            id: r.id.clone().unwrap_or_default(),
            route_type: r.route_type.to_string(),
            target: r.target().unwrap_or_default().to_owned(),
            description: r.description.clone(),
        }
    }
}

fn detail(nr: &NetworkRoute) -> Vec<(&'static str, String)> {
    vec![
        ("ID", nr.id().unwrap_or_default().to_owned()),
        ("Network", nr.network_id.clone()),
        ("Type", nr.route.route_type.to_string()),
        ("Target", nr.route.target().unwrap_or_default().to_owned()),
        ("Description", nr.route.description.clone()),
    ]
}

fn id_of(nr: &NetworkRoute) -> String {
    nr.id().unwrap_or_default().to_owned()
}

fn not_found(network: Option<&str>, id: String) -> CliError {
    CliError::NotFound {
        kind: ResourceKind::Route,
        id,
        list_command: network.map_or_else(
            || "networks list".into(),
            |n| format!("routes list {n}"),
        ),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &CloudClient,
    args: RoutesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RoutesCommand::List { network } => {
            let routes = client.list_routes(&network).await?;
            let out = output::render_list(
                &global.output,
                &routes,
                |r| RouteRow::from(r),
                |r| r.id.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Get { network, id } => {
            let route = client
                .get_route_in_network(&network, &id)
                .await?
                .ok_or_else(|| not_found(Some(network.as_str()), id))?;
            let out = output::render_single(&global.output, &route, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Resolve { id } => {
            let route = client
                .resolve_route_by_id(&id)
                .await?
                .ok_or_else(|| not_found(None, id))?;
            let out = output::render_single(&global.output, &route, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Create {
            network,
            route_type,
            value,
            description,
        } => {
            let route = Route::new(route_type.into(), value, description);
            let created = client.create_route(&route, &network).await?;
            let out = output::render_single(&global.output, &created, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Update {
            network,
            id,
            route_type,
            value,
            description,
        } => {
            let route = Route::new(route_type.into(), value, description).with_id(id);
            let updated = client.update_route(&route, &network).await?;
            let out = output::render_single(&global.output, &updated, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Delete { network, id } => {
            client.delete_route(&network, &id).await?;
            output::print_status(&format!("Route '{id}' deleted"), global.quiet);
            Ok(())
        }
    }
}
