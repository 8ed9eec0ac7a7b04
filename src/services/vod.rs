//! Read-only catalog queries behind `/api/vod/*`.
//!
//! Every function re-reads storage; repository failures are logged here and
//! reported as [`ServiceError::Internal`].

use chrono::{Duration, NaiveDateTime, SecondsFormat, Utc};

use crate::domain::category::build_category_tree;
use crate::domain::types::VideoId;
use crate::domain::video::Video;
use crate::dto::vod::{
    CatalogStatsDto, CategoryListDto, PaginationDto, SearchResultDto, VideoListDto,
};
use crate::forms::vod::{ListVideosPayload, SearchVideosPayload};
use crate::repository::{CategoryReader, VideoListQuery, VideoReader};

use super::{ServiceError, ServiceResult};

/// Window counted as "recent" by [`catalog_stats`].
pub const RECENT_WINDOW_DAYS: i64 = 7;
/// Number of categories listed by [`catalog_stats`].
pub const TOP_CATEGORY_COUNT: i64 = 10;

/// One page of videos, newest first, with the flat category list.
pub fn list_videos<R>(payload: ListVideosPayload, repo: &R) -> ServiceResult<VideoListDto>
where
    R: VideoReader + CategoryReader,
{
    let mut query = VideoListQuery::default().paginate(payload.page, payload.limit);
    if let Some(type_id) = payload.type_id {
        query = query.category(type_id);
    }

    let (total, list) = repo.list_videos(query).map_err(|e| {
        log::error!("Failed to list videos: {e}");
        ServiceError::Internal
    })?;

    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    Ok(VideoListDto {
        list,
        categories,
        pagination: PaginationDto::new(payload.page, payload.limit, total),
    })
}

/// Look up a single video by the raw trailing path segment.
pub fn get_video<R>(raw_id: &str, repo: &R) -> ServiceResult<Video>
where
    R: VideoReader,
{
    let id = raw_id
        .trim()
        .parse::<i32>()
        .ok()
        .and_then(|id| VideoId::new(id).ok())
        .ok_or(ServiceError::NotFound)?;

    match repo.get_video_by_id(id) {
        Ok(Some(video)) => Ok(video),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get video {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Substring search over name and English name.
///
/// Terms shorter than two characters short-circuit to an empty result.
/// `total` is the number of rows returned, capped by `limit`.
pub fn search_videos<R>(payload: SearchVideosPayload, repo: &R) -> ServiceResult<SearchResultDto>
where
    R: VideoReader,
{
    let Some(term) = payload.searchable_term() else {
        return Ok(SearchResultDto {
            list: Vec::new(),
            total: 0,
            query: payload.query,
        });
    };

    let list = repo.search_videos(term, payload.limit).map_err(|e| {
        log::error!("Failed to search videos for '{term}': {e}");
        ServiceError::Internal
    })?;

    Ok(SearchResultDto {
        total: list.len(),
        list,
        query: payload.query,
    })
}

/// All categories, flat and assembled into a tree.
pub fn list_categories<R>(repo: &R) -> ServiceResult<CategoryListDto>
where
    R: CategoryReader,
{
    let flat = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;
    let tree = build_category_tree(&flat);

    Ok(CategoryListDto { flat, tree })
}

/// Catalog size, recent additions and the largest categories as of `now`.
pub fn catalog_stats<R>(repo: &R, now: NaiveDateTime) -> ServiceResult<CatalogStatsDto>
where
    R: VideoReader,
{
    let since = now - Duration::days(RECENT_WINDOW_DAYS);

    let stats = repo.count_videos().and_then(|total| {
        let recent = repo.count_videos_since(since)?;
        let top_categories = repo.top_categories(TOP_CATEGORY_COUNT)?;
        Ok((total, recent, top_categories))
    });

    match stats {
        Ok((total, recent, top_categories)) => Ok(CatalogStatsDto {
            total,
            recent,
            top_categories,
            timestamp: now.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
        Err(e) => {
            log::error!("Failed to compute catalog stats: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// [`catalog_stats`] as of the current instant.
pub fn current_catalog_stats<R>(repo: &R) -> ServiceResult<CatalogStatsDto>
where
    R: VideoReader,
{
    catalog_stats(repo, Utc::now().naive_utc())
}
