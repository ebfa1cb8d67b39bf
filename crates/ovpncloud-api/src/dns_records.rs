// DNS record endpoints.

use crate::client::CloudClient;
use crate::confirm::confirm_delete;
use crate::error::Error;
use crate::models::{DnsRecord, ResourceKind};

impl CloudClient {
    pub async fn create_dns_record(&self, record: &DnsRecord) -> Result<DnsRecord, Error> {
        self.post(&["dns-records"], &[], record).await
    }

    /// Fetch one record. A 404 becomes [`Error::NotFound`].
    pub async fn get_dns_record(&self, id: &str) -> Result<DnsRecord, Error> {
        self.get(&["dns-records", id])
            .await
            .map_err(|e| match e {
                Error::Api { status: 404, .. } => Error::NotFound {
                    kind: ResourceKind::DnsRecord,
                    id: id.to_owned(),
                },
                other => other,
            })
    }

    /// `Ok(None)` when the API answers 404 for `id`.
    pub async fn find_dns_record(&self, id: &str) -> Result<Option<DnsRecord>, Error> {
        match self.get_dns_record(id).await {
            Ok(record) => Ok(Some(record)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn update_dns_record(&self, record: &DnsRecord) -> Result<DnsRecord, Error> {
        let id = record.id.as_deref().ok_or(Error::MissingId {
            kind: ResourceKind::DnsRecord,
        })?;
        self.put(&["dns-records", id], record).await
    }

    /// Delete a record, reading it back first when the DNS policy confirms.
    pub async fn delete_dns_record(&self, id: &str) -> Result<(), Error> {
        let path = ["dns-records", id];

        confirm_delete(
            &self.delete_policies().dns_record,
            self.cancellation_token(),
            ResourceKind::DnsRecord,
            id,
            || self.delete(&path, &[]),
            || self.find_dns_record(id),
        )
        .await
    }
}
