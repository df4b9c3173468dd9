// src/listing.rs
use crate::errors::ApiError;
use crate::filters::DEFAULT_PAGE_SIZE;
use crate::models::Product;
use crate::pagination::PaginatedResult;

/// Whether a fetched page replaces the current sequence ("go to page") or is
/// appended to it ("load more").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

/// Handle for one outstanding fetch. Responses are only applied when their
/// ticket is still the most recently issued one, so overlapping fetches
/// cannot clobber newer state with older data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    mode: FetchMode,
    page_index: u32,
}

impl FetchTicket {
    pub fn page_index(&self) -> u32 {
        self.page_index
    }
}

/// Outcome of reconciling one response into the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Applied,
    /// Superseded by a newer fetch; nothing was touched.
    Stale,
    /// The requested page no longer exists (filters shrank the result set).
    /// The caller should re-issue once for `last_page`; a second correction
    /// is never requested.
    OutOfRange { last_page: u32 },
}

pub type ProductListing = Listing<Product>;

/// View state for a paginated, server-filtered listing.
///
/// Pure state machine: the catalog service drives it, tests exercise it
/// without any network. Errors never clear previously shown items.
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<T>,
    total_count: u64,
    page_index: u32,
    page_size: u32,
    loading: bool,
    error: Option<String>,
    latest_seq: u64,
    corrected: bool,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Listing<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page_index: 1,
            page_size: page_size.max(1),
            loading: false,
            error: None,
            latest_seq: 0,
            corrected: false,
        }
    }

    /// Starts a fresh fetch for a user interaction. Any response still in
    /// flight for an earlier ticket becomes stale.
    pub fn begin(&mut self, mode: FetchMode, page_index: u32) -> FetchTicket {
        self.latest_seq += 1;
        self.loading = true;
        self.error = None;
        self.corrected = false;
        FetchTicket {
            seq: self.latest_seq,
            mode,
            page_index: page_index.max(1),
        }
    }

    /// Starts the single corrective fetch after an out-of-range response.
    /// Keeps the correction marker set so a second correction cannot happen.
    pub fn begin_retry(&mut self, mode: FetchMode, page_index: u32) -> FetchTicket {
        self.latest_seq += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest_seq,
            mode,
            page_index: page_index.max(1),
        }
    }

    pub fn apply(&mut self, ticket: FetchTicket, page: PaginatedResult<T>) -> Reconciled {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                stale = ticket.seq,
                latest = self.latest_seq,
                "discarding superseded listing response"
            );
            return Reconciled::Stale;
        }

        let last_page = page.last_page();
        if ticket.page_index > last_page && !self.corrected {
            self.corrected = true;
            return Reconciled::OutOfRange { last_page };
        }

        match ticket.mode {
            FetchMode::Replace => self.items = page.data,
            FetchMode::Append => self.items.extend(page.data),
        }
        self.total_count = page.total_count;
        self.page_size = page.page_size.max(1);
        self.page_index = page.page_index.clamp(1, last_page);
        self.loading = false;
        self.error = None;
        self.corrected = false;
        Reconciled::Applied
    }

    /// Records a failed fetch. Prior items stay visible; only the error
    /// message and the loading flag change.
    pub fn fail(&mut self, ticket: FetchTicket, error: &ApiError) {
        if ticket.seq != self.latest_seq {
            return;
        }
        self.loading = false;
        self.error = Some(error.user_message());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size as u64) as u32
    }

    pub fn has_more(&self) -> bool {
        self.page_index < self.total_pages()
    }

    /// 1-based index of the first visible item, 0 when the listing is empty.
    pub fn start_index(&self) -> u64 {
        if self.total_count == 0 {
            return 0;
        }
        (self.page_index as u64 - 1) * self.page_size as u64 + 1
    }

    pub fn end_index(&self) -> u64 {
        (self.page_index as u64 * self.page_size as u64).min(self.total_count)
    }

    /// Sliding window of page numbers for the pager control, centered on the
    /// current page.
    pub fn page_numbers(&self, max_visible: u32) -> Vec<u32> {
        let total = self.total_pages();
        if total == 0 || max_visible == 0 {
            return Vec::new();
        }
        let mut start = self.page_index.saturating_sub(max_visible / 2).max(1);
        let end = (start + max_visible - 1).min(total);
        if end - start + 1 < max_visible {
            start = end.saturating_sub(max_visible - 1).max(1);
        }
        (start..=end).collect()
    }
}
