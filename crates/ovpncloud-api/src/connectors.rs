// Connector endpoints.
//
// The API only offers a global connector listing, so every network- or
// name-scoped lookup is a client-side filter over `GET connectors`.

use tracing::trace;

use crate::client::CloudClient;
use crate::confirm::confirm_delete;
use crate::error::Error;
use crate::models::{Connector, NetworkItem, ResourceKind};

impl CloudClient {
    /// Every connector in the tenant, in API order.
    pub async fn list_connectors(&self) -> Result<Vec<Connector>, Error> {
        self.get(&["connectors"]).await
    }

    /// Fetch one connector. A 404 becomes [`Error::NotFound`].
    pub async fn get_connector(&self, id: &str) -> Result<Connector, Error> {
        self.get(&["connectors", id])
            .await
            .map_err(|e| match e {
                Error::Api { status: 404, .. } => Error::NotFound {
                    kind: ResourceKind::Connector,
                    id: id.to_owned(),
                },
                other => other,
            })
    }

    /// Create a connector under its network item.
    ///
    /// The network item travels both in the body and in the query string;
    /// the API routes on the latter.
    pub async fn create_connector(&self, connector: &Connector) -> Result<Connector, Error> {
        let item = connector.network_item();
        self.post(&["connectors"], &item.query(), connector).await
    }

    /// Replace a connector. Fields left empty in `connector` are cleared
    /// server-side.
    pub async fn update_connector(&self, connector: &Connector) -> Result<Connector, Error> {
        let id = connector.id.as_deref().ok_or(Error::MissingId {
            kind: ResourceKind::Connector,
        })?;
        let item = connector.network_item();
        self.post(&["connectors", id], &item.query(), connector)
            .await
    }

    /// Delete a connector.
    ///
    /// Single shot by default: success means the API accepted the call.
    /// With a confirming connector policy the connector is read back from
    /// the global listing until it disappears.
    pub async fn delete_connector(&self, id: &str, item: &NetworkItem) -> Result<(), Error> {
        let path = ["connectors", id];
        let query = item.query();

        confirm_delete(
            &self.delete_policies().connector,
            self.cancellation_token(),
            ResourceKind::Connector,
            id,
            || self.delete(&path, &query),
            || self.find_connector(id),
        )
        .await
    }

    /// Look a connector up by id in the global listing.
    ///
    /// `Ok(None)` means the listing succeeded and the id is not in it.
    pub async fn find_connector(&self, id: &str) -> Result<Option<Connector>, Error> {
        let found = self
            .list_connectors()
            .await?
            .into_iter()
            .find(|c| c.id.as_deref() == Some(id));
        Ok(found)
    }

    /// Connectors whose network item id is exactly `network_id`, in API order.
    pub async fn list_connectors_for_network(
        &self,
        network_id: &str,
    ) -> Result<Vec<Connector>, Error> {
        let connectors: Vec<Connector> = self
            .list_connectors()
            .await?
            .into_iter()
            .filter(|c| c.network_item_id == network_id)
            .collect();
        trace!(network_id, count = connectors.len(), "connectors for network");
        Ok(connectors)
    }

    /// First connector in `network_id` named exactly `name`.
    ///
    /// A missing connector is `Ok(None)`; a failed listing is an error.
    pub async fn resolve_connector_by_name(
        &self,
        name: &str,
        network_id: &str,
    ) -> Result<Option<Connector>, Error> {
        let found = self
            .list_connectors_for_network(network_id)
            .await?
            .into_iter()
            .find(|c| c.name == name);
        Ok(found)
    }
}
