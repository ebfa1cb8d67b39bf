// ovpncloud-api: Async reconciliation client for the OpenVPN Cloud REST API

pub mod client;
pub mod confirm;
pub mod connectors;
pub mod dns_records;
pub mod error;
pub mod models;
pub mod networks;
pub mod resolver;
pub mod routes;
pub mod transport;

pub use client::{ClientConfig, CloudClient};
pub use confirm::{DeletePolicies, DeletePolicy};
pub use error::Error;
pub use models::{
    Connector, DnsRecord, Network, NetworkItem, NetworkItemType, NetworkRoute, ResourceKind,
    Route, RouteType,
};
pub use transport::{TlsMode, TransportConfig};
