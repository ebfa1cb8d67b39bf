// Route endpoints.
//
// Routes are only reachable through their owning network: there is no
// global listing and no fetch-by-id. Lookups scan the network's route list.

use crate::client::CloudClient;
use crate::confirm::confirm_delete;
use crate::error::Error;
use crate::models::{NetworkRoute, ResourceKind, Route};

fn routes_path(network_id: &str) -> [&str; 3] {
    ["networks", network_id, "routes"]
}

fn route_path<'a>(network_id: &'a str, route_id: &'a str) -> [&'a str; 4] {
    ["networks", network_id, "routes", route_id]
}

impl CloudClient {
    /// Create a route under `network_id`.
    ///
    /// The returned route carries its new id and the server-populated
    /// `subnet` or `domain` field.
    pub async fn create_route(&self, route: &Route, network_id: &str) -> Result<NetworkRoute, Error> {
        let created: Route = self.post(&routes_path(network_id), &[], route).await?;
        Ok(NetworkRoute::new(network_id, created))
    }

    /// All routes of one network.
    pub async fn list_routes(&self, network_id: &str) -> Result<Vec<Route>, Error> {
        self.get(&routes_path(network_id)).await
    }

    /// Replace a route within its network.
    pub async fn update_route(&self, route: &Route, network_id: &str) -> Result<NetworkRoute, Error> {
        let id = route.id.as_deref().ok_or(Error::MissingId {
            kind: ResourceKind::Route,
        })?;
        let updated: Route = self.put(&route_path(network_id, id), route).await?;
        Ok(NetworkRoute::new(network_id, updated))
    }

    /// Find `route_id` among the routes of `network_id`.
    ///
    /// `Ok(None)` means the listing succeeded and the route is not in it.
    pub async fn get_route_in_network(
        &self,
        network_id: &str,
        route_id: &str,
    ) -> Result<Option<NetworkRoute>, Error> {
        let found = self
            .list_routes(network_id)
            .await?
            .into_iter()
            .find(|r| r.id.as_deref() == Some(route_id))
            .map(|r| NetworkRoute::new(network_id, r));
        Ok(found)
    }

    /// Delete a route and wait until it is gone.
    ///
    /// The API acknowledges deletes before the route leaves the listing, so
    /// each attempt is followed by a read-back. With the default policy this
    /// issues at most four deletes before failing with
    /// [`Error::DeleteNotConfirmed`].
    pub async fn delete_route(&self, network_id: &str, route_id: &str) -> Result<(), Error> {
        let path = route_path(network_id, route_id);

        confirm_delete(
            &self.delete_policies().route,
            self.cancellation_token(),
            ResourceKind::Route,
            route_id,
            || self.delete(&path, &[]),
            || self.get_route_in_network(network_id, route_id),
        )
        .await
    }
}
