//! Ad booking domain
//!
//! Value types for booked ads and the pure reconciliation logic that
//! merges checkout sessions with the post-purchase override documents.

mod ad_id;
mod order_item;
mod overrides;
mod reconcile;
mod record;
mod session;

pub use ad_id::AdId;
pub use order_item::{AdType, BookingOrder, CompletedOrder, OrderItem};
pub use overrides::{AdEdit, CancelledAds, EditedAds, SentReport, SentReports};
pub use reconcile::{project_inventory, reconcile, IssueInventory};
pub use record::{AdRecord, OrderStats, ReconciledOrders};
pub use session::{PaymentStatus, SessionSummary};
