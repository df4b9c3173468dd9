//! Client core for the CampusMart student-discount marketplace.
//!
//! The crate owns the three pieces of the front-end with real behavior:
//! building catalog queries ([`filters`]), reconciling paginated server
//! responses into view state ([`listing`]) and projecting the transaction
//! lifecycle across vendor and customer screens ([`transactions`]).
//! Everything else is thin reqwest wrappers around the remote REST API,
//! driven through an explicitly constructed [`ClientContext`] — there are no
//! global singletons, and all entities are transient view-models rebuilt
//! from server responses.

pub mod account;
pub mod auth_models;
pub mod catalog;
mod client;
pub mod config;
pub mod errors;
pub mod feedback;
pub mod filters;
pub mod listing;
pub mod models;
pub mod pagination;
pub mod products;
pub mod session;
pub mod state;
pub mod transactions;
pub mod vendor;

pub use auth_models::{LoginPayload, UserResult, UserType};
pub use catalog::HomeScope;
pub use config::ApiConfig;
pub use errors::ApiError;
pub use filters::{ProductQuery, SortOption};
pub use listing::{FetchMode, Listing, ProductListing, Reconciled};
pub use models::{
    Product, Transaction, TransactionAction, TransactionStats, TransactionStatus, Viewer,
};
pub use pagination::PaginatedResult;
pub use session::Session;
pub use state::ClientContext;
pub use transactions::TransactionBoard;

/// Installs the default log subscriber. Embedding applications call this
/// once at startup; `RUST_LOG` overrides the filter.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campusmart_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
