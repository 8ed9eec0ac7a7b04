use crate::forms::{QueryParams, parse_number};

/// Raw query of `GET /admin/collect`.
#[derive(Debug, Default)]
pub struct CollectForm {
    pub api_key: Option<String>,
    pub pages: Option<String>,
}

impl From<QueryParams> for CollectForm {
    fn from(mut params: QueryParams) -> Self {
        Self {
            api_key: params.take("api_key"),
            pages: params.take("pages"),
        }
    }
}

/// Coerced manual collection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectPayload {
    pub api_key: Option<String>,
    /// Number of upstream pages to walk; non-numeric or below 1 becomes 1.
    pub pages: u32,
}

impl From<CollectForm> for CollectPayload {
    fn from(form: CollectForm) -> Self {
        Self {
            api_key: form.api_key,
            pages: parse_number::<u32>(form.pages.as_deref())
                .filter(|pages| *pages >= 1)
                .unwrap_or(1),
        }
    }
}
