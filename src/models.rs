// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

/// Catalog entry as the server projects it for listing and detail views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    pub quantity: u32,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    pub address: String,
    pub is_active: bool,
    pub vendor_id: Uuid,
    #[serde(default)]
    pub vendor_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub orders: Option<u32>,
}

impl Product {
    /// Price the student actually pays.
    pub fn effective_price(&self) -> f64 {
        match self.discount_price {
            Some(discount) if discount < self.price => discount,
            _ => self.price,
        }
    }

    /// Rounded percentage off the list price; 0 when there is no real discount.
    pub fn discount_percentage(&self) -> u32 {
        match self.discount_price {
            Some(discount) if discount < self.price && self.price > 0.0 => {
                (((self.price - discount) / self.price) * 100.0).round() as u32
            }
            _ => 0,
        }
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_quantity(self.quantity)
    }
}

/// Coarse stock buckets driving the availability badge and gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StockLevel {
    OutOfStock,
    VeryLow,
    Low,
    InStock,
    High,
}

impl StockLevel {
    pub fn from_quantity(quantity: u32) -> Self {
        match quantity {
            0 => StockLevel::OutOfStock,
            1..=5 => StockLevel::VeryLow,
            6..=10 => StockLevel::Low,
            11..=20 => StockLevel::InStock,
            _ => StockLevel::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "Out of Stock",
            StockLevel::VeryLow => "Very Low Stock",
            StockLevel::Low => "Low Stock",
            StockLevel::InStock => "In Stock",
            StockLevel::High => "High Stock",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "text-red-600 bg-red-50",
            StockLevel::VeryLow => "text-yellow-600 bg-yellow-50",
            StockLevel::Low => "text-orange-600 bg-orange-50",
            StockLevel::InStock | StockLevel::High => "text-green-600 bg-green-50",
        }
    }

    /// Fill percentage for the stock gauge.
    pub fn gauge_percent(&self) -> u8 {
        match self {
            StockLevel::OutOfStock => 0,
            StockLevel::VeryLow => 20,
            StockLevel::Low => 40,
            StockLevel::InStock => 60,
            StockLevel::High => 100,
        }
    }
}

/// Which side of a transaction the current screen is rendering for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Vendor,
    Customer,
}

/// Transition requests the client may ask the server to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransactionAction {
    Accept,
    Reject,
    Complete,
    Cancel,
}

impl TransactionAction {
    pub(crate) fn endpoint(&self) -> &'static str {
        match self {
            TransactionAction::Accept => "accept",
            TransactionAction::Reject => "reject",
            TransactionAction::Complete => "complete",
            TransactionAction::Cancel => "cancel",
        }
    }
}

/// Server-authoritative order status. The client never sets one of these on
/// its own; it only requests transitions and adopts whatever comes back.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TransactionStatus {
    Pending,
    Accepted,
    Completed,
    Rejected,
    Cancelled,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::Rejected | TransactionStatus::Cancelled
        )
    }

    /// Strict forward machine: Pending fans out, Accepted can only complete.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (*self, next),
            (Pending, Accepted) | (Pending, Rejected) | (Pending, Cancelled) | (Accepted, Completed)
        )
    }

    /// Actions the given viewer may request from this status. Terminal
    /// statuses offer nothing to anyone.
    pub fn allowed_actions(&self, viewer: Viewer) -> &'static [TransactionAction] {
        use TransactionAction::*;
        match (viewer, self) {
            (Viewer::Vendor, TransactionStatus::Pending) => &[Accept, Reject],
            (Viewer::Vendor, TransactionStatus::Accepted) => &[Complete],
            (Viewer::Customer, TransactionStatus::Pending) => &[Cancel],
            _ => &[],
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "text-yellow-600 bg-yellow-50",
            TransactionStatus::Accepted => "text-blue-600 bg-blue-50",
            TransactionStatus::Completed => "text-green-600 bg-green-50",
            TransactionStatus::Rejected => "text-red-600 bg-red-50",
            TransactionStatus::Cancelled => "text-gray-600 bg-gray-50",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "clock",
            TransactionStatus::Accepted => "check-circle",
            TransactionStatus::Completed => "badge-check",
            TransactionStatus::Rejected => "x-circle",
            TransactionStatus::Cancelled => "slash-circle",
        }
    }
}

/// A student's purchase order against a vendor's product.
///
/// `rejection_reason` is populated by the server iff the status is Rejected;
/// the transition timestamps record each state actually reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub transaction_number: String,
    #[serde(default)]
    pub discount_code: Option<String>,
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub product_picture_url: Option<String>,
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub transaction_date: DateTime<Utc>,
    pub price: f64,
    pub quantity: u32,
    pub total_amount: f64,
    pub commission_amount: f64,
    pub vendor_earnings: f64,
    pub status: TransactionStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub accepted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejected_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
}

/// Vendor earnings dashboard aggregates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total_earnings: f64,
    pub total_orders: u32,
    pub pending_orders: u32,
    pub accepted_orders: u32,
    pub completed_orders: u32,
    pub rejected_orders: u32,
    pub this_month_earnings: f64,
    pub last_month_earnings: f64,
    pub earnings_growth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorLogo {
    pub id: Uuid,
    pub business_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub target_url: Option<String>,
}

/// Landing-page payload (featured content plus the category tree).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub featured_products: Vec<Product>,
    pub categories: Vec<Category>,
    pub featured_vendors: Vec<VendorLogo>,
    pub advertisements: Vec<Advertisement>,
}

/// File attachment for multipart uploads (product image, certificates).
#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub filename: String,
}
