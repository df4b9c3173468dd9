// src/transactions.rs
//
// Transaction lifecycle: service wrappers for the transition endpoints plus
// the board state backing the vendor and customer order screens. Transitions
// are server-authoritative; the board only requests them and adopts the
// returned record.

use std::collections::HashSet;

use serde::Serialize;
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::client;
use crate::errors::ApiError;
use crate::models::{Transaction, TransactionAction, TransactionStats, TransactionStatus};
use crate::state::ClientContext;

pub const DEFAULT_BOARD_PAGE_SIZE: u32 = 10;
pub const MIN_REJECTION_REASON_CHARS: usize = 5;

/// Order placement payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreate {
    pub product_id: i64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
}

// The transition endpoints expect PascalCase keys, unlike the rest of the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TransactionStatusUpdate {
    transaction_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<String>,
}

pub async fn create_transaction(
    ctx: &ClientContext,
    order: &TransactionCreate,
) -> Result<Transaction, ApiError> {
    tracing::debug!(product_id = order.product_id, "placing order");
    client::post_json(ctx, "transactions", order).await
}

pub async fn transaction_details(ctx: &ClientContext, id: Uuid) -> Result<Transaction, ApiError> {
    client::get_json(ctx, &format!("transactions/{}", id)).await
}

pub async fn vendor_transactions(ctx: &ClientContext) -> Result<Vec<Transaction>, ApiError> {
    client::get_json(ctx, "transactions/vendor").await
}

pub async fn customer_transactions(ctx: &ClientContext) -> Result<Vec<Transaction>, ApiError> {
    client::get_json(ctx, "transactions/customer").await
}

pub async fn vendor_stats(ctx: &ClientContext) -> Result<TransactionStats, ApiError> {
    client::get_json(ctx, "transactions/vendor/stats").await
}

/// Orders and earnings stats for the vendor dashboard, fetched together.
pub async fn vendor_dashboard(
    ctx: &ClientContext,
) -> Result<(Vec<Transaction>, TransactionStats), ApiError> {
    futures::try_join!(vendor_transactions(ctx), vendor_stats(ctx))
}

/// UX guard for the rejection modal. Trims and enforces the minimum length
/// before anything touches the network; the server re-validates anyway.
pub fn validate_rejection_reason(reason: &str) -> Result<String, ApiError> {
    let trimmed = reason.trim();
    if trimmed.chars().count() < MIN_REJECTION_REASON_CHARS {
        return Err(ApiError::ValidationFailed(format!(
            "Please provide a rejection reason (minimum {} characters).",
            MIN_REJECTION_REASON_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

pub async fn accept_transaction(
    ctx: &ClientContext,
    board: &mut TransactionBoard,
    id: Uuid,
) -> Result<Option<Transaction>, ApiError> {
    transition(ctx, board, id, TransactionAction::Accept, None).await
}

pub async fn reject_transaction(
    ctx: &ClientContext,
    board: &mut TransactionBoard,
    id: Uuid,
    reason: &str,
) -> Result<Option<Transaction>, ApiError> {
    let reason = validate_rejection_reason(reason)?;
    transition(ctx, board, id, TransactionAction::Reject, Some(reason)).await
}

pub async fn complete_transaction(
    ctx: &ClientContext,
    board: &mut TransactionBoard,
    id: Uuid,
) -> Result<Option<Transaction>, ApiError> {
    transition(ctx, board, id, TransactionAction::Complete, None).await
}

pub async fn cancel_transaction(
    ctx: &ClientContext,
    board: &mut TransactionBoard,
    id: Uuid,
) -> Result<Option<Transaction>, ApiError> {
    transition(ctx, board, id, TransactionAction::Cancel, None).await
}

/// Requests one transition. Returns `Ok(None)` when a request for the same
/// transaction is still in flight (double-click protection, per id). On
/// success the board's copy is replaced with the server's record; on failure
/// the list is left untouched.
async fn transition(
    ctx: &ClientContext,
    board: &mut TransactionBoard,
    id: Uuid,
    action: TransactionAction,
    rejection_reason: Option<String>,
) -> Result<Option<Transaction>, ApiError> {
    if !board.begin_action(id) {
        tracing::debug!(%id, %action, "transition already in flight; ignoring");
        return Ok(None);
    }

    let update = TransactionStatusUpdate {
        transaction_id: id,
        rejection_reason,
    };
    let path = format!("transactions/{}", action.endpoint());
    let result: Result<Transaction, ApiError> = client::post_json(ctx, &path, &update).await;
    board.finish_action(id);

    match result {
        Ok(updated) => {
            tracing::info!(%id, status = %updated.status, "transition confirmed");
            board.apply_update(updated.clone());
            Ok(Some(updated))
        }
        Err(err) => {
            tracing::error!(%id, %action, %err, "transition failed");
            Err(err)
        }
    }
}

/// View state for an order list screen. Filtering and paging here are purely
/// local: the transaction endpoints return the full list for the account and
/// both order screens narrow it client-side.
#[derive(Debug)]
pub struct TransactionBoard {
    transactions: Vec<Transaction>,
    status_filter: Option<TransactionStatus>,
    search: String,
    page_index: u32,
    page_size: u32,
    in_flight: HashSet<Uuid>,
}

impl Default for TransactionBoard {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_PAGE_SIZE)
    }
}

impl TransactionBoard {
    pub fn new(page_size: u32) -> Self {
        Self {
            transactions: Vec::new(),
            status_filter: None,
            search: String::new(),
            page_index: 1,
            page_size: page_size.max(1),
            in_flight: HashSet::new(),
        }
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.page_index = 1;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn set_status_filter(&mut self, status: Option<TransactionStatus>) {
        self.status_filter = status;
        self.page_index = 1;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.page_index = 1;
    }

    /// Replaces the matching record with the server's version.
    pub fn apply_update(&mut self, updated: Transaction) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Matches the search box against number, product, discount code and
    /// customer name, like the order screens do.
    pub fn filtered(&self) -> Vec<&Transaction> {
        let term = self.search.trim().to_lowercase();
        self.transactions
            .iter()
            .filter(|t| self.status_filter.map_or(true, |s| t.status == s))
            .filter(|t| term.is_empty() || matches_term(t, &term))
            .collect()
    }

    pub fn total_orders(&self) -> usize {
        self.transactions.len()
    }

    pub fn status_counts(&self) -> Vec<(TransactionStatus, usize)> {
        TransactionStatus::iter()
            .map(|status| {
                let count = self
                    .transactions
                    .iter()
                    .filter(|t| t.status == status)
                    .count();
                (status, count)
            })
            .collect()
    }

    pub fn total_pages(&self) -> u32 {
        (self.filtered().len() as u64).div_ceil(self.page_size as u64) as u32
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Current page window over the filtered list.
    pub fn visible(&self) -> Vec<&Transaction> {
        let start = (self.page_index as usize - 1) * self.page_size as usize;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.page_size as usize)
            .collect()
    }

    pub fn next_page(&mut self) {
        if self.page_index < self.total_pages() {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page_index > 1 {
            self.page_index -= 1;
        }
    }

    pub fn is_processing(&self, id: Uuid) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn begin_action(&mut self, id: Uuid) -> bool {
        self.in_flight.insert(id)
    }

    pub fn finish_action(&mut self, id: Uuid) {
        self.in_flight.remove(&id);
    }
}

fn matches_term(t: &Transaction, term: &str) -> bool {
    t.transaction_number.to_lowercase().contains(term)
        || t.product_name.to_lowercase().contains(term)
        || t.customer_name.to_lowercase().contains(term)
        || t
            .discount_code
            .as_ref()
            .is_some_and(|code| code.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use chrono::Utc;

    fn tx(number: &str, product: &str, status: TransactionStatus) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            transaction_number: number.to_string(),
            discount_code: None,
            product_id: 1,
            product_name: product.to_string(),
            product_picture_url: None,
            vendor_id: Uuid::new_v4(),
            vendor_name: "Uniforms Co".to_string(),
            customer_id: Uuid::new_v4(),
            customer_name: "Sara".to_string(),
            customer_email: "sara@uni.edu".to_string(),
            transaction_date: Utc::now(),
            price: 20.0,
            quantity: 1,
            total_amount: 20.0,
            commission_amount: 2.0,
            vendor_earnings: 18.0,
            status,
            rejection_reason: None,
            accepted_date: None,
            rejected_date: None,
            completed_date: None,
        }
    }

    fn test_ctx() -> ClientContext {
        ClientContext::new(ApiConfig::new("http://localhost:1/api/").unwrap()).unwrap()
    }

    #[test]
    fn rejection_reason_guard() {
        assert!(validate_rejection_reason("").is_err());
        assert!(validate_rejection_reason("   ").is_err());
        assert!(validate_rejection_reason("nope").is_err());
        assert_eq!(validate_rejection_reason("  too slow  ").unwrap(), "too slow");
    }

    #[tokio::test]
    async fn empty_rejection_reason_never_reaches_the_network() {
        let ctx = test_ctx();
        let mut board = TransactionBoard::default();
        let order = tx("TRX-1", "Lab coat", TransactionStatus::Pending);
        let id = order.id;
        board.set_transactions(vec![order]);

        let result = reject_transaction(&ctx, &mut board, id, " ").await;
        assert!(matches!(result, Err(ApiError::ValidationFailed(_))));
        // the guard was never taken and the record is untouched
        assert!(!board.is_processing(id));
        assert_eq!(board.transactions()[0].status, TransactionStatus::Pending);
    }

    #[test]
    fn second_click_is_ignored_while_in_flight() {
        let mut board = TransactionBoard::default();
        let id = Uuid::new_v4();
        assert!(board.begin_action(id));
        assert!(!board.begin_action(id));
        // the guard is per transaction id, not global
        assert!(board.begin_action(Uuid::new_v4()));
        board.finish_action(id);
        assert!(board.begin_action(id));
    }

    #[test]
    fn filter_by_status_and_search_term() {
        let mut board = TransactionBoard::default();
        board.set_transactions(vec![
            tx("TRX-1", "Lab coat", TransactionStatus::Pending),
            tx("TRX-2", "Calculator", TransactionStatus::Completed),
            tx("TRX-3", "Lab notebook", TransactionStatus::Pending),
        ]);

        board.set_status_filter(Some(TransactionStatus::Pending));
        assert_eq!(board.filtered().len(), 2);

        board.set_search("notebook");
        let filtered = board.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].transaction_number, "TRX-3");

        board.set_status_filter(None);
        board.set_search("trx-2");
        assert_eq!(board.filtered().len(), 1);
    }

    #[test]
    fn status_counts_cover_every_status() {
        let mut board = TransactionBoard::default();
        board.set_transactions(vec![
            tx("TRX-1", "Lab coat", TransactionStatus::Pending),
            tx("TRX-2", "Calculator", TransactionStatus::Pending),
            tx("TRX-3", "Notebook", TransactionStatus::Rejected),
        ]);
        let counts = board.status_counts();
        assert_eq!(counts.len(), 5);
        assert!(counts.contains(&(TransactionStatus::Pending, 2)));
        assert!(counts.contains(&(TransactionStatus::Rejected, 1)));
        assert!(counts.contains(&(TransactionStatus::Completed, 0)));
        assert_eq!(board.total_orders(), 3);
    }

    #[test]
    fn local_paging_windows_the_filtered_list() {
        let mut board = TransactionBoard::new(2);
        board.set_transactions(vec![
            tx("TRX-1", "A", TransactionStatus::Pending),
            tx("TRX-2", "B", TransactionStatus::Pending),
            tx("TRX-3", "C", TransactionStatus::Pending),
        ]);
        assert_eq!(board.total_pages(), 2);
        assert_eq!(board.visible().len(), 2);

        board.next_page();
        assert_eq!(board.page_index(), 2);
        assert_eq!(board.visible().len(), 1);

        board.next_page();
        assert_eq!(board.page_index(), 2);

        board.previous_page();
        assert_eq!(board.page_index(), 1);
    }

    #[test]
    fn apply_update_replaces_by_id() {
        let mut board = TransactionBoard::default();
        let order = tx("TRX-1", "Lab coat", TransactionStatus::Pending);
        let id = order.id;
        board.set_transactions(vec![order]);

        let mut updated = tx("TRX-1", "Lab coat", TransactionStatus::Rejected);
        updated.id = id;
        updated.rejection_reason = Some("too slow".to_string());
        assert!(board.apply_update(updated));
        assert_eq!(board.transactions()[0].status, TransactionStatus::Rejected);
        assert_eq!(
            board.transactions()[0].rejection_reason.as_deref(),
            Some("too slow")
        );

        let unknown = tx("TRX-9", "Other", TransactionStatus::Pending);
        assert!(!board.apply_update(unknown));
    }

    #[test]
    fn status_update_wire_format_is_pascal_case() {
        let update = TransactionStatusUpdate {
            transaction_id: Uuid::nil(),
            rejection_reason: Some("too slow".to_string()),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json["TransactionId"],
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(json["RejectionReason"], "too slow");

        let bare = TransactionStatusUpdate {
            transaction_id: Uuid::nil(),
            rejection_reason: None,
        };
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("RejectionReason").is_none());
    }
}
