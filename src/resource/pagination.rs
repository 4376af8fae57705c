//! Pagination drivers
//!
//! Both drivers call a single-page fetcher until the server signals
//! exhaustion and return every record in server order. Any fetch error aborts
//! the walk and is returned as-is; nothing fetched so far is returned.

use std::future::Future;

use super::options::ListOptions;
use crate::error::Result;

/// One page from an offset/limit endpoint
#[derive(Debug, Clone)]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    /// Total number of records the server reports for the listing
    pub count: usize,
}

/// One page from a page-token endpoint
#[derive(Debug, Clone)]
pub struct TokenPage<T> {
    pub items: Vec<T>,
    /// Continuation cursor; empty means there are no further pages
    pub next_token: String,
}

/// Walk an offset/limit listing.
///
/// Stops when a page is empty, shorter than the limit, or the running total
/// reaches the server's count. A zero limit leaves the page size to the
/// server, so only one page is fetched.
pub async fn list_helper<T, F, Fut>(mut fetch: F, opts: &ListOptions) -> Result<Vec<T>>
where
    F: FnMut(ListOptions) -> Fut,
    Fut: Future<Output = Result<OffsetPage<T>>>,
{
    let mut page_opts = ListOptions {
        limit: opts.limit,
        offset: opts.offset,
        page_token: String::new(),
    };
    let mut items = Vec::new();
    let mut retrieved = 0usize;
    let mut pages = 0usize;

    loop {
        let page = fetch(page_opts.clone()).await?;
        pages += 1;

        let fetched = page.items.len();
        retrieved += fetched;
        items.extend(page.items);

        tracing::debug!(
            "offset page {}: offset={} fetched={} total={}/{}",
            pages,
            page_opts.offset,
            fetched,
            retrieved,
            page.count
        );

        if fetched == 0
            || page_opts.limit == 0
            || fetched < page_opts.limit
            || retrieved >= page.count
        {
            break;
        }
        page_opts.offset += page_opts.limit;
    }

    Ok(items)
}

/// Walk a page-token listing until the server returns an empty token
pub async fn token_list_helper<T, F, Fut>(mut fetch: F, opts: &ListOptions) -> Result<Vec<T>>
where
    F: FnMut(ListOptions) -> Fut,
    Fut: Future<Output = Result<TokenPage<T>>>,
{
    let mut page_opts = ListOptions {
        limit: opts.limit,
        offset: 0,
        page_token: opts.page_token.clone(),
    };
    let mut items = Vec::new();
    let mut pages = 0usize;

    loop {
        let page = fetch(page_opts.clone()).await?;
        pages += 1;

        tracing::debug!(
            "token page {}: fetched={} next_token_present={}",
            pages,
            page.items.len(),
            !page.next_token.is_empty()
        );

        items.extend(page.items);

        if page.next_token.is_empty() {
            break;
        }
        page_opts.page_token = page.next_token;
    }

    Ok(items)
}
