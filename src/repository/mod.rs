use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, VideoId};
use crate::domain::video::{CategoryVideoCount, NewVideo, Video};
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod ingest;
pub mod video;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers and background tasks.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Page window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows skipped before this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// Query parameters used when listing videos.
#[derive(Debug, Clone, Default)]
pub struct VideoListQuery {
    /// Filter by category identifier.
    pub type_id: Option<CategoryId>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl VideoListQuery {
    pub fn category(mut self, type_id: CategoryId) -> Self {
        self.type_id = Some(type_id);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for video entities.
pub trait VideoReader {
    /// List videos newest first, returning the unpaginated total alongside.
    fn list_videos(&self, query: VideoListQuery) -> RepositoryResult<(usize, Vec<Video>)>;
    /// Retrieve a video by its identifier.
    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>>;
    /// Substring match on name and English name, newest first.
    fn search_videos(&self, needle: &str, limit: i64) -> RepositoryResult<Vec<Video>>;
    /// Count every stored video.
    fn count_videos(&self) -> RepositoryResult<usize>;
    /// Count videos written at or after `since`.
    fn count_videos_since(&self, since: NaiveDateTime) -> RepositoryResult<usize>;
    /// Largest categories by number of videos, grouped by denormalized name.
    fn top_categories(&self, limit: i64) -> RepositoryResult<Vec<CategoryVideoCount>>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category ordered by parent then identifier.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write access used by a single ingestion run.
///
/// Nothing written through the transaction is visible to readers until
/// [`IngestTransaction::commit`]; [`IngestTransaction::rollback`] (or dropping
/// an unfinished transaction) discards it all.
pub trait IngestTransaction {
    /// Insert the category or replace the row with the same `type_id`.
    fn upsert_category(&mut self, category: &NewCategory) -> RepositoryResult<usize>;
    /// Insert the video or replace the row with the same `vod_id`.
    fn upsert_video(&mut self, video: &NewVideo) -> RepositoryResult<usize>;
    fn commit(self) -> RepositoryResult<()>;
    fn rollback(self) -> RepositoryResult<()>;
}

/// Write operations for the catalog.
pub trait CatalogWriter {
    type Transaction: IngestTransaction;

    /// Open the transaction spanning one ingestion run.
    fn begin_ingest(&self) -> RepositoryResult<Self::Transaction>;
}
