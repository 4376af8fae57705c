//! List options and query string construction

/// Paging options shared by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum records per page; 0 leaves it to the server
    pub limit: usize,
    /// Starting position for offset pagination
    pub offset: usize,
    /// Continuation cursor for token pagination
    pub page_token: String,
}

impl ListOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }
}

/// Options accepted by the entities list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityListOptions {
    pub list_options: ListOptions,
    /// Restrict the listing to a saved search
    pub search_id: String,
    /// Ask the server to resolve embedded field placeholders
    pub resolve_placeholders: bool,
}

/// Append query parameters to a path, encoding values
pub fn add_query_params(path: &str, params: &[(&str, String)]) -> String {
    let query_parts: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();

    if query_parts.is_empty() {
        path.to_string()
    } else if path.contains('?') {
        format!("{}&{}", path, query_parts.join("&"))
    } else {
        format!("{}?{}", path, query_parts.join("&"))
    }
}

/// Add `limit`, `offset` and `pageToken` when they are set
pub fn add_list_options(path: &str, opts: &ListOptions) -> String {
    let mut params = Vec::new();
    if opts.limit != 0 {
        params.push(("limit", opts.limit.to_string()));
    }
    if opts.offset != 0 {
        params.push(("offset", opts.offset.to_string()));
    }
    if !opts.page_token.is_empty() {
        params.push(("pageToken", opts.page_token.clone()));
    }
    add_query_params(path, &params)
}

/// Add `searchId` and `resolvePlaceholders` when they are set
pub fn add_entity_list_options(path: &str, opts: &EntityListOptions) -> String {
    let mut params = Vec::new();
    if !opts.search_id.is_empty() {
        params.push(("searchId", opts.search_id.clone()));
    }
    if opts.resolve_placeholders {
        params.push(("resolvePlaceholders", "true".to_string()));
    }
    add_query_params(path, &params)
}
