// Cross-entity lookups the API has no endpoint for.

use tracing::{debug, trace};

use crate::client::CloudClient;
use crate::error::Error;
use crate::models::NetworkRoute;

impl CloudClient {
    /// Find a route by id alone, without knowing its network.
    ///
    /// Lists every network and scans each one's routes in listing order,
    /// so a call costs one request per network plus one for the listing:
    /// O(networks × routes). Meant for import and manual lookup, not for
    /// steady-state reconciliation.
    ///
    /// The first network holding `route_id` wins. `Ok(None)` only after
    /// every network has been scanned; any failed listing is an error.
    pub async fn resolve_route_by_id(&self, route_id: &str) -> Result<Option<NetworkRoute>, Error> {
        let networks = self.list_networks().await?;
        debug!(route_id, networks = networks.len(), "resolving route across networks");

        for network in &networks {
            if let Some(found) = self.get_route_in_network(&network.id, route_id).await? {
                debug!(route_id, network_id = %network.id, "route resolved");
                return Ok(Some(found));
            }
            trace!(route_id, network_id = %network.id, "route not in network");
        }

        Ok(None)
    }
}
