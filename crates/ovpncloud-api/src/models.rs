// Wire models for the `/api/beta` resources.
//
// Field names follow the API's camelCase JSON. Optional fields are skipped
// on serialization so create bodies never carry a placeholder id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of remote entity an operation or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Connector,
    Route,
    DnsRecord,
    Network,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connector => "connector",
            Self::Route => "route",
            Self::DnsRecord => "DNS record",
            Self::Network => "network",
        })
    }
}

// ── Connectors ──────────────────────────────────────────────────────

/// The kind of scope a connector is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkItemType {
    Host,
    Network,
}

impl NetworkItemType {
    /// The wire representation (`HOST` / `NETWORK`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Host => "HOST",
            Self::Network => "NETWORK",
        }
    }
}

impl fmt::Display for NetworkItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The owning scope of a connector: a host or a whole network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkItem {
    pub id: String,
    pub item_type: NetworkItemType,
}

impl NetworkItem {
    pub fn new(id: impl Into<String>, item_type: NetworkItemType) -> Self {
        Self {
            id: id.into(),
            item_type,
        }
    }

    /// Query parameters the connector endpoints route on.
    ///
    /// The same pair is also present in the connector body; create, update
    /// and delete all take it from here so the two cannot drift apart.
    pub(crate) fn query(&self) -> [(&'static str, String); 2] {
        [
            ("networkItemId", self.id.clone()),
            ("networkItemType", self.item_type.as_str().to_owned()),
        ]
    }
}

/// A network access point bound to a host or a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub network_item_id: String,
    pub network_item_type: NetworkItemType,
    #[serde(default)]
    pub vpn_region_id: String,
    #[serde(default, rename = "ipV4Address")]
    pub ipv4_address: String,
    #[serde(default, rename = "ipV6Address")]
    pub ipv6_address: String,
}

impl Connector {
    /// A new, not yet created connector.
    pub fn new(
        name: impl Into<String>,
        network_item: &NetworkItem,
        vpn_region_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            network_item_id: network_item.id.clone(),
            network_item_type: network_item.item_type,
            vpn_region_id: vpn_region_id.into(),
            ipv4_address: String::new(),
            ipv6_address: String::new(),
        }
    }

    pub fn network_item(&self) -> NetworkItem {
        NetworkItem::new(self.network_item_id.clone(), self.network_item_type)
    }
}

// ── Routes ──────────────────────────────────────────────────────────

/// Selects which field of a [`Route`] carries its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteType {
    #[serde(rename = "IP_V4")]
    IpV4,
    #[serde(rename = "IP_V6")]
    IpV6,
    #[serde(rename = "DOMAIN")]
    Domain,
}

impl RouteType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IpV4 => "IP_V4",
            Self::IpV6 => "IP_V6",
            Self::Domain => "DOMAIN",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A traffic-steering rule owned by exactly one network.
///
/// The API reads `value` on create/update and answers with the target in
/// `subnet` (IP routes) or `domain` (domain routes). Use [`Route::target`]
/// rather than picking a field by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Route {
    /// A create/update body for a route of the given type.
    pub fn new(
        route_type: RouteType,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            description: description.into(),
            route_type,
            subnet: None,
            domain: None,
            value: Some(value.into()),
        }
    }

    /// Same route addressed by `id`, for updates.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The authoritative target for this route's type.
    ///
    /// Falls back to `value` when the server has not populated the
    /// type-specific field (or for bodies that were never sent).
    pub fn target(&self) -> Option<&str> {
        let authoritative = match self.route_type {
            RouteType::IpV4 | RouteType::IpV6 => self.subnet.as_deref(),
            RouteType::Domain => self.domain.as_deref(),
        };
        authoritative.or(self.value.as_deref())
    }
}

/// A route together with the network it was read from.
///
/// The API's route representation does not name its owner, so every
/// operation that knows the owning network hands it back alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRoute {
    pub network_id: String,
    #[serde(flatten)]
    pub route: Route,
}

impl NetworkRoute {
    pub fn new(network_id: impl Into<String>, route: Route) -> Self {
        Self {
            network_id: network_id.into(),
            route,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.route.id.as_deref()
    }
}

// ── Networks ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub egress: bool,
    #[serde(default)]
    pub internet_access: Option<String>,
}

// ── DNS records ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub domain: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "ipV4Addresses")]
    pub ipv4_addresses: Vec<String>,
    #[serde(default, rename = "ipV6Addresses")]
    pub ipv6_addresses: Vec<String>,
}
