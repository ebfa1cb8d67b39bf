//! DNS record command handlers.

use ovpncloud_api::{CloudClient, DnsRecord};

use crate::cli::{DnsArgs, DnsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(r: &DnsRecord) -> Vec<(&'static str, String)> {
    vec![
        ("ID", r.id.clone().unwrap_or_default()),
        ("Domain", r.domain.clone()),
        ("Description", r.description.clone()),
        ("IPv4", r.ipv4_addresses.join(", ")),
        ("IPv6", r.ipv6_addresses.join(", ")),
    ]
}

fn id_of(r: &DnsRecord) -> String {
    r.id.clone().unwrap_or_default()
}

pub async fn handle(client: &CloudClient, args: DnsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DnsCommand::Get { id } => {
            let record = client.get_dns_record(&id).await?;
            let out = output::render_single(&global.output, &record, detail, id_of)?;
            output::print_output(&out, global.quiet);
        }

        DnsCommand::Create {
            domain,
            description,
            ipv4_addresses,
            ipv6_addresses,
        } => {
            if ipv4_addresses.is_empty() && ipv6_addresses.is_empty() {
                return Err(CliError::Validation {
                    field: "addresses".into(),
                    reason: "pass at least one --ipv4 or --ipv6".into(),
                });
            }
            let record = DnsRecord {
                id: None,
                domain,
                description,
                ipv4_addresses,
                ipv6_addresses,
            };
            let created = client.create_dns_record(&record).await?;
            let out = output::render_single(&global.output, &created, detail, id_of)?;
            output::print_output(&out, global.quiet);
        }

        DnsCommand::Delete { id } => {
            client.delete_dns_record(&id).await?;
            output::print_status(&format!("DNS record '{id}' deleted"), global.quiet);
        }
    }
    Ok(())
}
