// Network endpoints.
//
// Only the read side is needed here: networks are enumerated to find the
// owner of a route when nothing but the route id is known.

use crate::client::CloudClient;
use crate::error::Error;
use crate::models::{Network, ResourceKind};

impl CloudClient {
    pub async fn list_networks(&self) -> Result<Vec<Network>, Error> {
        self.get(&["networks"]).await
    }

    /// Fetch one network. A 404 becomes [`Error::NotFound`].
    pub async fn get_network(&self, id: &str) -> Result<Network, Error> {
        self.get(&["networks", id])
            .await
            .map_err(|e| match e {
                Error::Api { status: 404, .. } => Error::NotFound {
                    kind: ResourceKind::Network,
                    id: id.to_owned(),
                },
                other => other,
            })
    }
}
