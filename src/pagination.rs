// src/pagination.rs
use serde::{Deserialize, Serialize};

/// One page of results as returned by every paginated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page_index: u32,
    pub page_size: u32,
}

impl<T> PaginatedResult<T> {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size as u64) as u32
    }

    /// Last addressable page. Page 1 even when the result set is empty, so
    /// out-of-range requests always have somewhere to land.
    pub fn last_page(&self) -> u32 {
        self.total_pages().max(1)
    }

    pub fn has_more(&self) -> bool {
        self.page_index < self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
