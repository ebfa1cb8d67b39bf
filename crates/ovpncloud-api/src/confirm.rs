// Confirmed delete.
//
// The API acknowledges a delete before the entity stops showing up in
// listings. A confirmed delete re-reads after every attempt and only
// reports success once the read-back comes back empty.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::Error;
use crate::models::ResourceKind;

/// How a delete of one resource kind is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePolicy {
    /// Read back after the delete and retry while the entity is still visible.
    pub confirm: bool,
    /// Delete attempts allowed after the first one.
    pub max_retries: u32,
    /// Pause between a failed read-back and the next attempt.
    pub retry_delay: Duration,
}

impl DeletePolicy {
    pub const DEFAULT_RETRIES: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    /// Delete, read back, and retry up to three more times.
    pub fn confirmed() -> Self {
        Self {
            confirm: true,
            max_retries: Self::DEFAULT_RETRIES,
            retry_delay: Self::DEFAULT_DELAY,
        }
    }

    /// One delete call; success as soon as the API acknowledges it.
    pub fn single_shot() -> Self {
        Self {
            confirm: false,
            max_retries: 0,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Upper bound on delete calls issued for one operation.
    pub fn max_attempts(&self) -> u32 {
        if self.confirm {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }
}

/// Delete policy per resource kind.
///
/// Routes are confirmed by default. Connectors and DNS records are deleted
/// in a single shot unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePolicies {
    pub connector: DeletePolicy,
    pub route: DeletePolicy,
    pub dns_record: DeletePolicy,
}

impl Default for DeletePolicies {
    fn default() -> Self {
        Self {
            connector: DeletePolicy::single_shot(),
            route: DeletePolicy::confirmed(),
            dns_record: DeletePolicy::single_shot(),
        }
    }
}

/// Run `delete` until `read_back` no longer finds the entity.
///
/// Attempts are strictly sequential. Errors from either closure end the
/// loop immediately and are returned unchanged; cancellation is checked
/// before every attempt and during the pause between attempts.
pub(crate) async fn confirm_delete<T, D, DFut, P, PFut>(
    policy: &DeletePolicy,
    cancel: &CancellationToken,
    kind: ResourceKind,
    id: &str,
    mut delete: D,
    mut read_back: P,
) -> Result<(), Error>
where
    T: Serialize,
    D: FnMut() -> DFut,
    DFut: Future<Output = Result<(), Error>>,
    P: FnMut() -> PFut,
    PFut: Future<Output = Result<Option<T>, Error>>,
{
    if !policy.confirm {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        return delete().await;
    }

    let max_attempts = policy.max_attempts();
    let mut attempt: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        attempt += 1;
        debug!(%kind, id, attempt, "delete attempt");

        delete().await?;

        let Some(still_present) = read_back().await? else {
            debug!(%kind, id, attempt, "delete confirmed");
            return Ok(());
        };

        if attempt >= max_attempts {
            warn!(%kind, id, attempt, "entity still present, giving up");
            let last_seen = serde_json::to_value(&still_present).unwrap_or_default();
            return Err(Error::DeleteNotConfirmed {
                kind,
                id: id.to_owned(),
                attempts: attempt,
                last_seen: Box::new(last_seen),
            });
        }

        warn!(%kind, id, attempt, "entity still present after delete, retrying");

        if !policy.retry_delay.is_zero() {
            tokio::select! {
                () = cancel.cancelled() => return Err(Error::Cancelled),
                () = tokio::time::sleep(policy.retry_delay) => {}
            }
        }
    }
}
