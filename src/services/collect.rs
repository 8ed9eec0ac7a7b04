//! Entry points that trigger an ingestion run.

use std::time::Duration;

use crate::forms::collect::CollectPayload;
use crate::repository::CatalogWriter;
use crate::services::ingest::{IngestOptions, run_ingestion};
use crate::upstream::VodSource;

use super::{ServiceError, ServiceResult};

/// Pages fetched by every scheduled run.
pub const SCHEDULED_PAGES: u32 = 1;

/// Compare a presented credential with the configured one.
///
/// An empty configured value never authorizes anything.
pub fn check_credential(provided: Option<&str>, expected: &str) -> ServiceResult<()> {
    match provided {
        Some(provided) if !expected.is_empty() && provided == expected => Ok(()),
        _ => Err(ServiceError::Unauthorized),
    }
}

/// Manual collection: authorize, then ingest `payload.pages` pages while the
/// caller waits.
pub async fn collect_manual<S, R>(
    payload: CollectPayload,
    admin_key: &str,
    source: &S,
    repo: &R,
    page_delay: Duration,
) -> ServiceResult<usize>
where
    S: VodSource,
    R: CatalogWriter,
{
    check_credential(payload.api_key.as_deref(), admin_key)?;

    log::info!("Manual collection of {} page(s) started", payload.pages);
    let saved = run_ingestion(source, repo, IngestOptions::new(payload.pages, page_delay)).await?;
    log::info!("Manual collection finished, {saved} videos saved");

    Ok(saved)
}

/// Scheduled collection body. Outcomes are only logged; nobody is waiting
/// for them.
pub async fn collect_scheduled<S, R>(source: &S, repo: &R, page_delay: Duration)
where
    S: VodSource,
    R: CatalogWriter,
{
    let options = IngestOptions::new(SCHEDULED_PAGES, page_delay);
    match run_ingestion(source, repo, options).await {
        Ok(saved) => log::info!("Scheduled collection finished, {saved} videos saved"),
        Err(e) => log::error!("Scheduled collection failed: {e}"),
    }
}
