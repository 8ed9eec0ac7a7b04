//! Response bodies of the read API and the service endpoints.

use serde::Serialize;

use crate::domain::category::{Category, CategoryNode};
use crate::domain::video::{CategoryVideoCount, Video};

/// Page navigation block of the list endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationDto {
    /// Derive the navigation flags for `page` of `total` rows split by `limit`.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(limit.max(1));
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoListDto {
    pub list: Vec<Video>,
    /// Every category, flat.
    #[serde(rename = "class")]
    pub categories: Vec<Category>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResultDto {
    pub list: Vec<Video>,
    /// Number of rows in `list`, not the number of matches in storage.
    pub total: usize,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListDto {
    pub flat: Vec<Category>,
    pub tree: Vec<CategoryNode>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatsDto {
    pub total: usize,
    pub recent: usize,
    pub top_categories: Vec<CategoryVideoCount>,
    pub timestamp: String,
}

/// Body of a successful manual collection.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CollectSummaryDto {
    pub success: bool,
    pub message: String,
    /// Videos saved by the run.
    pub count: usize,
}

impl CollectSummaryDto {
    pub fn new(count: usize) -> Self {
        Self {
            success: true,
            message: format!("Collected {count} videos"),
            count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoDto {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub timestamp: String,
    pub endpoints: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_flags() {
        let first = PaginationDto::new(1, 2, 3);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = PaginationDto::new(2, 2, 3);
        assert!(!last.has_next);
        assert!(last.has_prev);
    }

    #[test]
    fn collect_summary_reports_count() {
        let summary = CollectSummaryDto::new(3);
        assert!(summary.success);
        assert_eq!(summary.message, "Collected 3 videos");
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn pagination_of_empty_catalog() {
        let empty = PaginationDto::new(1, 20, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn total_pages_is_ceiling() {
        for total in 0..=250 {
            for limit in [1, 7, 20, 100] {
                let dto = PaginationDto::new(1, limit, total);
                assert_eq!(dto.total_pages, (total + limit - 1) / limit);
                assert_eq!(dto.has_next, dto.total_pages > 1);
            }
        }
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(PaginationDto::new(1, 2, 3)).unwrap();
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["hasNext"], true);
        assert_eq!(value["hasPrev"], false);
    }
}
