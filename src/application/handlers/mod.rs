//! Application command and query handlers
//!
//! One handler per operation, each holding its port dependencies
//! behind `Arc<dyn Trait>` so the HTTP layer stays thin and tests can
//! swap any external system.

mod cancel_ad;
mod create_checkout;
mod edit_ad;
mod export_backup;
mod get_inventory;
mod get_orders;
mod process_webhook;
mod send_report;
mod site_config;

pub use cancel_ad::CancelAdHandler;
pub use create_checkout::{
    CheckoutError, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult,
    MAX_AD_COPY_CHARS, MAX_METADATA_CHARS, ORDER_CACHE_TTL_SECS,
};
pub use edit_ad::{EditAdCommand, EditAdHandler};
pub use export_backup::{BackupDocument, ExportBackupHandler};
pub use get_inventory::GetInventoryHandler;
pub use get_orders::{GetOrdersHandler, OrdersError, SESSION_FETCH_LIMIT};
pub use process_webhook::{ProcessWebhookCommand, ProcessWebhookHandler};
pub use send_report::{ReportError, SendReportCommand, SendReportHandler};
pub use site_config::{GetSiteConfigHandler, UpdateSiteConfigHandler};
