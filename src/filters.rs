// src/filters.rs
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::errors::ApiError;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 50;
pub const PRICE_RANGE_MIN: i64 = 0;
pub const PRICE_RANGE_MAX: i64 = 10_000;

/// Sentinel the category dropdown uses for "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Wire-level sort enumeration for the catalog endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortOption {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    #[default]
    Newest,
    DiscountDesc,
}

impl SortOption {
    /// Maps the listing screen's sort labels onto the wire enumeration.
    /// Anything unrecognized falls back to newest-first.
    pub fn from_ui_label(label: &str) -> Self {
        match label.trim() {
            "name" => SortOption::NameAsc,
            "name-desc" => SortOption::NameDesc,
            "price-low" => SortOption::PriceAsc,
            "price-high" => SortOption::PriceDesc,
            "discount" => SortOption::DiscountDesc,
            "newest" => SortOption::Newest,
            other => other.parse().unwrap_or_default(),
        }
    }
}

/// Canonical query parameters for paginated product search.
///
/// Fields left at their defaults (empty search, "all" category, full price
/// range) are omitted from the outgoing request entirely so the server never
/// over-filters on sentinel values. `pageIndex`, `pageSize` and `sort` are
/// always sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    page_index: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_price: Option<i64>,
    sort: SortOption,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    pub fn new() -> Self {
        Self {
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            category_id: None,
            brand_id: None,
            min_price: None,
            max_price: None,
            sort: SortOption::default(),
        }
    }

    pub fn page(mut self, page_index: u32) -> Self {
        self.page_index = page_index.max(1);
        self
    }

    pub fn per_page(mut self, page_size: u32) -> Self {
        self.page_size = match page_size {
            0 => DEFAULT_PAGE_SIZE,
            n if n > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
            n => n,
        };
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }

    /// Ingests the raw category dropdown value ("all", "" or a numeric id).
    pub fn category_selection(mut self, selection: &str) -> Self {
        let selection = selection.trim();
        self.category_id = if selection.is_empty() || selection.eq_ignore_ascii_case(ALL_CATEGORIES)
        {
            None
        } else {
            selection.parse().ok()
        };
        self
    }

    pub fn category_id(mut self, id: Option<i64>) -> Self {
        self.category_id = id;
        self
    }

    pub fn brand_id(mut self, id: Option<i64>) -> Self {
        self.brand_id = id;
        self
    }

    /// A bound equal to the slider's end of range means "unbounded" and is
    /// not sent.
    pub fn price_range(mut self, min: i64, max: i64) -> Self {
        let min = min.clamp(PRICE_RANGE_MIN, PRICE_RANGE_MAX);
        let max = max.clamp(PRICE_RANGE_MIN, PRICE_RANGE_MAX);
        self.min_price = (min > PRICE_RANGE_MIN).then_some(min);
        self.max_price = (max < PRICE_RANGE_MAX).then_some(max);
        self
    }

    pub fn sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn sort_label(self, label: &str) -> Self {
        let sort = SortOption::from_ui_label(label);
        self.sort(sort)
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(ApiError::ValidationFailed(format!(
                    "minimum price {} exceeds maximum price {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    pub fn to_query_string(&self) -> Result<String, ApiError> {
        serde_qs::to_string(self).map_err(|e| {
            ApiError::ValidationFailed(format!("could not encode query parameters: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_sends_only_paging_and_sort() {
        let qs = ProductQuery::new().to_query_string().unwrap();
        assert_eq!(qs, "pageIndex=1&pageSize=12&sort=Newest");
    }

    #[test]
    fn sentinel_filters_are_omitted() {
        let qs = ProductQuery::new()
            .search("")
            .category_selection("all")
            .price_range(0, 10_000)
            .to_query_string()
            .unwrap();
        assert_eq!(qs, "pageIndex=1&pageSize=12&sort=Newest");
    }

    #[test]
    fn narrowed_filters_are_sent() {
        let qs = ProductQuery::new()
            .search("  notebooks ")
            .category_selection("7")
            .price_range(50, 400)
            .sort(SortOption::PriceAsc)
            .to_query_string()
            .unwrap();
        assert!(qs.contains("search=notebooks"));
        assert!(qs.contains("categoryId=7"));
        assert!(qs.contains("minPrice=50"));
        assert!(qs.contains("maxPrice=400"));
        assert!(qs.contains("sort=PriceAsc"));
    }

    #[test]
    fn page_index_never_drops_below_one() {
        assert_eq!(ProductQuery::new().page(0).page_index(), 1);
        assert_eq!(ProductQuery::new().page(4).page_index(), 4);
    }

    #[test]
    fn page_size_is_clamped() {
        let qs = ProductQuery::new().per_page(500).to_query_string().unwrap();
        assert!(qs.contains("pageSize=50"));
        let qs = ProductQuery::new().per_page(0).to_query_string().unwrap();
        assert!(qs.contains("pageSize=12"));
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let query = ProductQuery::new().price_range(900, 100);
        assert!(query.ensure_valid().is_err());
        assert!(ProductQuery::new().price_range(100, 900).ensure_valid().is_ok());
    }

    #[test]
    fn sort_labels_map_onto_the_enumeration() {
        assert_eq!(SortOption::from_ui_label("price-low"), SortOption::PriceAsc);
        assert_eq!(SortOption::from_ui_label("price-high"), SortOption::PriceDesc);
        assert_eq!(SortOption::from_ui_label("name"), SortOption::NameAsc);
        assert_eq!(SortOption::from_ui_label("discount"), SortOption::DiscountDesc);
        assert_eq!(SortOption::from_ui_label("newest"), SortOption::Newest);
        // wire names parse too, anything else falls back
        assert_eq!(SortOption::from_ui_label("NameDesc"), SortOption::NameDesc);
        assert_eq!(SortOption::from_ui_label("popularity"), SortOption::Newest);
    }
}
