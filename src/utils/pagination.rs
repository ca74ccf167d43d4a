//! Limit/offset pagination for collection endpoints.
//!
//! Pagination is opt-in: a request without a usable `limit` gets the whole
//! collection as a plain array.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl PaginationParams {
    /// Invalid values are ignored rather than rejected.
    pub fn page(&self) -> Option<Page> {
        let limit = self
            .limit
            .as_deref()
            .and_then(|limit| limit.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)?;
        let offset = self
            .offset
            .as_deref()
            .and_then(|offset| offset.trim().parse::<usize>().ok())
            .unwrap_or(0);

        Some(Page { limit, offset })
    }
}

impl Page {
    pub fn paginate<T>(
        &self,
        base_url: &str,
        count: usize,
        results: Vec<T>,
    ) -> Paginated<T> {
        Paginated {
            count,
            next: self
                .next_offset(count)
                .map(|offset| page_url(base_url, self.limit, offset)),
            previous: self
                .previous_offset()
                .map(|offset| page_url(base_url, self.limit, offset)),
            results,
        }
    }

    fn next_offset(&self, count: usize) -> Option<usize> {
        let next = self.offset.saturating_add(self.limit);
        (next < count).then_some(next)
    }

    fn previous_offset(&self) -> Option<usize> {
        (self.offset > 0).then(|| self.offset.saturating_sub(self.limit))
    }
}

/// Absolute when the request named a host, otherwise just the path.
pub fn collection_url(scheme: &str, host: Option<&str>, path: &str) -> String {
    match host {
        Some(host) => format!("{scheme}://{host}{path}"),
        None => path.to_owned(),
    }
}

fn page_url(base_url: &str, limit: usize, offset: usize) -> String {
    if offset == 0 {
        format!("{base_url}?limit={limit}")
    } else {
        format!("{base_url}?limit={limit}&offset={offset}")
    }
}
