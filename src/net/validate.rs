use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
    time::Duration,
};

use tokio::{sync::Semaphore, task::JoinSet, time::timeout};

use crate::error::FilterError;

use super::{
    domain::bare_domain,
    resolver::{DohResolver, STATUS_NOERROR},
};

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Keeps only the entries whose domain resolves
pub struct Validator<R: DohResolver> {
    resolver: Arc<R>,
    timeout: Duration,
    concurrency: usize,
}

impl<R: DohResolver> Validator<R> {
    /// Create a validator allowing at most `concurrency` lookups in flight
    ///
    /// A `concurrency` of zero is treated as one.
    pub fn new(resolver: Arc<R>, timeout: Duration, concurrency: usize) -> Self {
        Self {
            resolver,
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Check every entry against the resolver
    ///
    /// # Behavior
    /// 1. Lookups are started in sorted order; with a concurrency of one only a
    ///    single request is ever outstanding
    /// 2. Each entry is stripped of list syntax before its lookup
    /// 3. An entry survives only if its lookup returns status 0 within the timeout
    /// 4. Any other outcome drops the entry and logs the reason; nothing is retried
    /// 5. Returns once every lookup has finished or timed out
    pub async fn validate(&self, entries: &BTreeSet<String>) -> BTreeSet<String> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut lookups = JoinSet::new();
        let mut pending = HashMap::new();

        for entry in entries {
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };
            let resolver = Arc::clone(&self.resolver);
            let entry = entry.clone();
            let lookup_timeout = self.timeout;

            let task_entry = entry.clone();
            let handle = lookups.spawn(async move {
                let outcome = check_entry(resolver.as_ref(), &task_entry, lookup_timeout).await;
                drop(permit);
                outcome
            });
            pending.insert(handle.id(), entry);
        }

        let mut validated = BTreeSet::new();
        while let Some(joined) = lookups.join_next_with_id().await {
            match joined {
                Ok((id, Ok(()))) => {
                    if let Some(entry) = pending.remove(&id) {
                        log::debug!("{entry}: resolved");
                        validated.insert(entry);
                    }
                }
                Ok((id, Err(err))) => {
                    let entry = pending.remove(&id).unwrap_or_default();
                    log::warn!("Dropping {entry}: {err}");
                }
                Err(err) => {
                    let entry = pending.remove(&err.id()).unwrap_or_default();
                    log::error!("Dropping {entry}: lookup task failed: {err}");
                }
            }
        }

        log::info!(
            "Validated {} of {} new entries",
            validated.len(),
            entries.len()
        );
        validated
    }
}

async fn check_entry<R: DohResolver + ?Sized>(
    resolver: &R,
    entry: &str,
    lookup_timeout: Duration,
) -> Result<(), FilterError> {
    let domain = bare_domain(entry)?;
    let status = match timeout(lookup_timeout, resolver.query_status(domain)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(FilterError::LookupTimeout {
                domain: domain.to_string(),
                timeout: lookup_timeout,
            });
        }
    };

    if status != STATUS_NOERROR {
        return Err(FilterError::LookupStatus {
            domain: domain.to_string(),
            status,
        });
    }
    Ok(())
}
