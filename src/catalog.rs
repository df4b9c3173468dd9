// src/catalog.rs
//
// Server-delegated product search and the public catalog surface. Filtering,
// sorting and pagination all happen on the server; this module only ships the
// query out and reconciles whatever comes back.

use crate::client;
use crate::errors::ApiError;
use crate::filters::ProductQuery;
use crate::listing::{FetchMode, ProductListing, Reconciled};
use crate::models::{Brand, Category, HomePage, Product};
use crate::pagination::PaginatedResult;
use crate::state::ClientContext;

/// Which flavor of the landing page to request. Students get a variant with
/// discount-focused featured content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeScope {
    Public,
    Student,
    Quick,
}

impl HomeScope {
    fn path(&self) -> &'static str {
        match self {
            HomeScope::Public => "home",
            HomeScope::Student => "home/student",
            HomeScope::Quick => "home/quick",
        }
    }
}

pub async fn list_products(
    ctx: &ClientContext,
    query: &ProductQuery,
) -> Result<PaginatedResult<Product>, ApiError> {
    query.ensure_valid()?;
    let path = format!("products?{}", query.to_query_string()?);
    client::get_json(ctx, &path).await
}

/// Fetches one page into the listing. Out-of-range pages (the filter set
/// shrank after the user advanced) are corrected with exactly one follow-up
/// request for the last valid page.
pub async fn fetch_page(
    ctx: &ClientContext,
    listing: &mut ProductListing,
    query: &ProductQuery,
    mode: FetchMode,
) -> Result<(), ApiError> {
    let ticket = listing.begin(mode, query.page_index());
    let page = match list_products(ctx, query).await {
        Ok(page) => page,
        Err(err) => {
            listing.fail(ticket, &err);
            return Err(err);
        }
    };

    match listing.apply(ticket, page) {
        Reconciled::OutOfRange { last_page } => {
            tracing::debug!(
                requested = query.page_index(),
                last_page,
                "requested page beyond result set; refetching last page"
            );
            let corrected = query.clone().page(last_page);
            let retry = listing.begin_retry(FetchMode::Replace, last_page);
            match list_products(ctx, &corrected).await {
                Ok(page) => {
                    listing.apply(retry, page);
                    Ok(())
                }
                Err(err) => {
                    listing.fail(retry, &err);
                    Err(err)
                }
            }
        }
        _ => Ok(()),
    }
}

/// "Load more": appends the next page to the current sequence. No-op when the
/// listing is already on its last page.
pub async fn load_next_page(
    ctx: &ClientContext,
    listing: &mut ProductListing,
    query: &ProductQuery,
) -> Result<(), ApiError> {
    if !listing.has_more() {
        return Ok(());
    }
    let next = query.clone().page(listing.page_index() + 1);
    fetch_page(ctx, listing, &next, FetchMode::Append).await
}

pub async fn product_details(ctx: &ClientContext, id: i64) -> Result<Product, ApiError> {
    client::get_json(ctx, &format!("products/{}", id)).await
}

pub async fn categories(ctx: &ClientContext) -> Result<Vec<Category>, ApiError> {
    client::get_json(ctx, "categories").await
}

pub async fn brands(ctx: &ClientContext) -> Result<Vec<Brand>, ApiError> {
    client::get_json(ctx, "brands").await
}

/// Quick name search used by the header search box.
pub async fn search_products(
    ctx: &ClientContext,
    term: &str,
    category_id: Option<i64>,
) -> Result<PaginatedResult<Product>, ApiError> {
    let mut path = format!(
        "products/search?searchTerm={}",
        urlencoding::encode(term.trim())
    );
    if let Some(id) = category_id {
        path.push_str(&format!("&categoryId={}", id));
    }
    client::get_json(ctx, &path).await
}

/// Landing-page data, cached for a few minutes per scope.
pub async fn home(ctx: &ClientContext, scope: HomeScope) -> Result<HomePage, ApiError> {
    if let Some(cached) = ctx.home_cache.get(&scope).await {
        tracing::debug!(?scope, "home cache hit");
        return Ok(cached);
    }
    tracing::debug!(?scope, "home cache miss; fetching");
    let page: HomePage = client::get_json(ctx, scope.path()).await?;
    ctx.home_cache.insert(scope, page.clone()).await;
    Ok(page)
}

/// Picks the home variant for the current session: students get the
/// student landing page, everyone else the public one.
pub async fn home_for_session(ctx: &ClientContext) -> Result<HomePage, ApiError> {
    use crate::auth_models::UserType;
    let scope = match ctx.session.user_type() {
        Some(UserType::School) | Some(UserType::University) => HomeScope::Student,
        _ => HomeScope::Public,
    };
    home(ctx, scope).await
}
