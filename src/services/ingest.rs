//! Pulls the upstream listing into the catalog.
//!
//! A run walks pages in increasing order inside one storage transaction. A
//! failed page fetch (or any storage failure outside a single record) rolls
//! the whole run back, while a record that cannot be converted or written is
//! logged and skipped.

use std::time::Duration;

use actix_web::rt::time::sleep;
use chrono::Utc;
use thiserror::Error;

use crate::repository::errors::RepositoryError;
use crate::repository::{CatalogWriter, IngestTransaction};
use crate::upstream::{UpstreamError, VodSource, category_from_record, video_from_record};

/// Errors that abort an ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("storage failure during ingestion: {0}")]
    Repository(#[from] RepositoryError),
}

/// Knobs of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Highest page number to fetch.
    pub max_pages: u32,
    /// Pause between two page fetches.
    pub page_delay: Duration,
}

impl IngestOptions {
    pub fn new(max_pages: u32, page_delay: Duration) -> Self {
        Self {
            max_pages,
            page_delay,
        }
    }
}

/// Run one ingestion and return the number of videos saved.
///
/// Nothing is committed unless every page fetch of the run succeeded.
pub async fn run_ingestion<S, R>(
    source: &S,
    repo: &R,
    options: IngestOptions,
) -> Result<usize, IngestError>
where
    S: VodSource,
    R: CatalogWriter,
{
    let mut transaction = repo.begin_ingest()?;

    match ingest_pages(source, &mut transaction, options).await {
        Ok(saved) => {
            transaction.commit()?;
            log::info!("Ingestion committed {saved} videos");
            Ok(saved)
        }
        Err(e) => {
            log::error!("Ingestion failed, rolling back: {e}");
            if let Err(rollback) = transaction.rollback() {
                log::error!("Rollback of failed ingestion failed: {rollback}");
            }
            Err(e)
        }
    }
}

async fn ingest_pages<S, T>(
    source: &S,
    transaction: &mut T,
    options: IngestOptions,
) -> Result<usize, IngestError>
where
    S: VodSource,
    T: IngestTransaction,
{
    let mut saved = 0;

    for page in 1..=options.max_pages {
        let payload = source.fetch_page(page).await?;

        if !payload.is_success() || payload.list.is_empty() {
            log::info!(
                "Upstream page {page} has no data (code {:?}), stopping",
                payload.code
            );
            break;
        }

        if page == 1 {
            for record in &payload.categories {
                match category_from_record(record) {
                    Ok(category) => {
                        transaction.upsert_category(&category)?;
                    }
                    Err(e) => log::warn!("Skipping category {record}: {e}"),
                }
            }
        }

        let now = Utc::now().naive_utc();
        for record in &payload.list {
            let video = match video_from_record(record, now) {
                Ok(video) => video,
                Err(e) => {
                    log::warn!("Skipping malformed video on page {page}: {e}");
                    continue;
                }
            };
            match transaction.upsert_video(&video) {
                Ok(_) => saved += 1,
                Err(e) => log::warn!("Failed to save video {}: {e}", video.vod_id),
            }
        }

        log::info!("Processed upstream page {page}, {saved} videos saved so far");

        if payload.is_last_page(page) {
            break;
        }

        if page < options.max_pages && !options.page_delay.is_zero() {
            sleep(options.page_delay).await;
        }
    }

    Ok(saved)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use reqwest::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::repository::test::TestRepository;
    use crate::upstream::{UpstreamPage, parse_page};

    /// Upstream double answering from a fixed script of pages.
    pub(crate) struct ScriptedSource {
        pages: Vec<Option<Value>>,
        pub(crate) requested: RefCell<Vec<u32>>,
    }

    impl ScriptedSource {
        /// `None` entries answer with HTTP 502.
        pub(crate) fn new(pages: Vec<Option<Value>>) -> Self {
            Self {
                pages,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl VodSource for ScriptedSource {
        async fn fetch_page(&self, page: u32) -> Result<UpstreamPage, UpstreamError> {
            self.requested.borrow_mut().push(page);
            match self.pages.get(page as usize - 1) {
                Some(Some(body)) => parse_page(body.to_string().as_bytes()),
                Some(None) => Err(UpstreamError::Status(StatusCode::BAD_GATEWAY)),
                None => parse_page(br#"{"code": 1, "list": []}"#),
            }
        }
    }

    pub(crate) fn video_record(id: i32, name: &str) -> Value {
        json!({
            "vod_id": id,
            "vod_name": name,
            "type_id": 6,
            "type_name": "Action",
            "vod_time": "2024-03-02 10:11:12"
        })
    }

    pub(crate) fn listing(list: Vec<Value>, pagecount: i64) -> Value {
        json!({"code": 1, "pagecount": pagecount, "list": list})
    }

    fn options(max_pages: u32) -> IngestOptions {
        IngestOptions::new(max_pages, Duration::ZERO)
    }

    #[actix_web::test]
    async fn saves_videos_and_first_page_categories() {
        let mut first = listing(vec![video_record(1, "One"), video_record(2, "Two")], 2);
        first["class"] = json!([
            {"type_id": 1, "type_pid": 0, "type_name": "Movies"},
            {"type_id": 6, "type_pid": 1, "type_name": "Action"}
        ]);
        let mut second = listing(vec![video_record(3, "Three")], 2);
        second["class"] = json!([{"type_id": 9, "type_pid": 0, "type_name": "Ignored"}]);
        let source = ScriptedSource::new(vec![Some(first), Some(second)]);
        let repo = TestRepository::default();

        let saved = run_ingestion(&source, &repo, options(5)).await.unwrap();

        assert_eq!(saved, 3);
        assert_eq!(repo.videos().len(), 3);
        assert_eq!(repo.categories().len(), 2);
        assert_eq!(*source.requested.borrow(), vec![1, 2]);
    }

    #[actix_web::test]
    async fn stops_at_max_pages() {
        let source = ScriptedSource::new(vec![
            Some(listing(vec![video_record(1, "One")], 10)),
            Some(listing(vec![video_record(2, "Two")], 10)),
        ]);
        let repo = TestRepository::default();

        let saved = run_ingestion(&source, &repo, options(1)).await.unwrap();

        assert_eq!(saved, 1);
        assert_eq!(*source.requested.borrow(), vec![1]);
    }

    #[actix_web::test]
    async fn empty_or_unsuccessful_page_ends_run_successfully() {
        let source = ScriptedSource::new(vec![
            Some(listing(vec![video_record(1, "One")], 10)),
            Some(json!({"code": 0, "msg": "error", "list": [video_record(2, "Two")]})),
        ]);
        let repo = TestRepository::default();

        let saved = run_ingestion(&source, &repo, options(5)).await.unwrap();

        assert_eq!(saved, 1);
        assert_eq!(*source.requested.borrow(), vec![1, 2]);

        let empty = ScriptedSource::new(vec![Some(listing(vec![], 0))]);
        assert_eq!(run_ingestion(&empty, &repo, options(5)).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn failed_fetch_discards_the_whole_run() {
        let source = ScriptedSource::new(vec![
            Some(listing(vec![video_record(1, "One")], 3)),
            None,
        ]);
        let repo = TestRepository::default();

        let err = run_ingestion(&source, &repo, options(3)).await.unwrap_err();

        assert!(matches!(
            err,
            IngestError::Upstream(UpstreamError::Status(StatusCode::BAD_GATEWAY))
        ));
        assert!(repo.videos().is_empty());
    }

    #[actix_web::test]
    async fn bad_records_are_skipped() {
        let source = ScriptedSource::new(vec![Some(listing(
            vec![
                video_record(1, "One"),
                json!({"vod_id": 2, "type_id": 6}),
                video_record(3, "Three"),
                video_record(4, "Four"),
            ],
            1,
        ))]);
        let repo = TestRepository::default().with_failing_video(3);

        let saved = run_ingestion(&source, &repo, options(1)).await.unwrap();

        assert_eq!(saved, 2);
        let ids: Vec<i32> = repo.videos().iter().map(|v| v.vod_id.get()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[actix_web::test]
    async fn reingesting_replaces_rows() {
        let repo = TestRepository::default();
        for _ in 0..2 {
            let source = ScriptedSource::new(vec![Some(listing(
                vec![video_record(1, "One"), video_record(2, "Two")],
                1,
            ))]);
            run_ingestion(&source, &repo, options(1)).await.unwrap();
        }

        let videos = repo.videos();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].vod_name, "One");
    }
}
