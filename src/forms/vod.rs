use crate::domain::types::CategoryId;
use crate::forms::{QueryParams, parse_number};

/// Page size used when `limit` is absent or unusable.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Largest page size the list endpoint hands out.
pub const MAX_PAGE_SIZE: usize = 100;
/// Result count used by search when `limit` is absent or unusable.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
/// Search terms shorter than this (in characters) are not sent to storage.
pub const MIN_SEARCH_CHARS: usize = 2;

/// Raw query of `GET /api/vod/list`.
#[derive(Debug, Default)]
pub struct ListVideosForm {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub type_id: Option<String>,
}

impl From<QueryParams> for ListVideosForm {
    fn from(mut params: QueryParams) -> Self {
        Self {
            page: params.take("page"),
            limit: params.take("limit"),
            type_id: params.take("type_id"),
        }
    }
}

/// Coerced list parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListVideosPayload {
    /// 1-based page; non-numeric or values below 1 become 1.
    pub page: usize,
    /// Page size; non-numeric or below 1 becomes 20, above 100 becomes 100.
    pub limit: usize,
    /// Category filter; non-numeric or non-positive values disable it.
    pub type_id: Option<CategoryId>,
}

impl From<ListVideosForm> for ListVideosPayload {
    fn from(form: ListVideosForm) -> Self {
        let page = parse_number::<i64>(form.page.as_deref())
            .filter(|page| *page >= 1)
            .map_or(1, |page| usize::try_from(page).unwrap_or(1));

        let limit = parse_number::<i64>(form.limit.as_deref())
            .filter(|limit| *limit >= 1)
            .map_or(DEFAULT_PAGE_SIZE, |limit| {
                usize::try_from(limit).map_or(MAX_PAGE_SIZE, |limit| limit.min(MAX_PAGE_SIZE))
            });

        let type_id = parse_number::<i32>(form.type_id.as_deref())
            .and_then(|type_id| CategoryId::new(type_id).ok());

        Self {
            page,
            limit,
            type_id,
        }
    }
}

/// Raw query of `GET /api/vod/search`.
#[derive(Debug, Default)]
pub struct SearchVideosForm {
    pub q: Option<String>,
    pub limit: Option<String>,
}

impl From<QueryParams> for SearchVideosForm {
    fn from(mut params: QueryParams) -> Self {
        Self {
            q: params.take("q"),
            limit: params.take("limit"),
        }
    }
}

/// Coerced search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchVideosPayload {
    /// The search term exactly as sent.
    pub query: Option<String>,
    /// Result cap; not clamped. Non-numeric input becomes 20.
    pub limit: i64,
}

impl SearchVideosPayload {
    /// The term to look up, or `None` when it is too short to search for.
    pub fn searchable_term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .filter(|term| term.chars().count() >= MIN_SEARCH_CHARS)
    }
}

impl From<SearchVideosForm> for SearchVideosPayload {
    fn from(form: SearchVideosForm) -> Self {
        Self {
            limit: parse_number(form.limit.as_deref()).unwrap_or(DEFAULT_SEARCH_LIMIT),
            query: form.q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_form(page: Option<&str>, limit: Option<&str>, type_id: Option<&str>) -> ListVideosForm {
        ListVideosForm {
            page: page.map(String::from),
            limit: limit.map(String::from),
            type_id: type_id.map(String::from),
        }
    }

    #[test]
    fn list_defaults() {
        let payload = ListVideosPayload::from(ListVideosForm::default());
        assert_eq!(payload.page, 1);
        assert_eq!(payload.limit, DEFAULT_PAGE_SIZE);
        assert!(payload.type_id.is_none());
    }

    #[test]
    fn list_coerces_garbage_to_defaults() {
        let payload = ListVideosPayload::from(list_form(Some("abc"), Some("x"), Some("movies")));
        assert_eq!(payload.page, 1);
        assert_eq!(payload.limit, 20);
        assert!(payload.type_id.is_none());

        let payload = ListVideosPayload::from(list_form(Some("0"), Some("-5"), Some("0")));
        assert_eq!(payload.page, 1);
        assert_eq!(payload.limit, 20);
        assert!(payload.type_id.is_none());
    }

    #[test]
    fn list_clamps_limit() {
        let payload = ListVideosPayload::from(list_form(Some("3"), Some("500"), Some("6")));
        assert_eq!(payload.page, 3);
        assert_eq!(payload.limit, MAX_PAGE_SIZE);
        assert_eq!(payload.type_id.map(CategoryId::get), Some(6));
    }

    #[test]
    fn list_form_reads_first_of_repeated_keys() {
        let form = ListVideosForm::from(QueryParams::parse("page=2&page=9&limit=5&limit=x"));
        let payload = ListVideosPayload::from(form);
        assert_eq!(payload.page, 2);
        assert_eq!(payload.limit, 5);
    }

    #[test]
    fn search_limit_is_not_clamped() {
        let payload = SearchVideosPayload::from(SearchVideosForm {
            q: Some("ab".into()),
            limit: Some("250".into()),
        });
        assert_eq!(payload.limit, 250);
        assert_eq!(payload.searchable_term(), Some("ab"));
    }

    #[test]
    fn short_terms_are_not_searchable() {
        let short = SearchVideosPayload::from(SearchVideosForm {
            q: Some("a".into()),
            limit: None,
        });
        assert_eq!(short.limit, DEFAULT_SEARCH_LIMIT);
        assert!(short.searchable_term().is_none());

        let missing = SearchVideosPayload::from(SearchVideosForm::default());
        assert!(missing.searchable_term().is_none());

        let wide = SearchVideosPayload::from(SearchVideosForm {
            q: Some("海贼".into()),
            limit: None,
        });
        assert_eq!(wide.searchable_term(), Some("海贼"));
    }
}
