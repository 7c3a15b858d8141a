//! Ports (trait interfaces to the outside world)
//!
//! Adapters implement these; application handlers depend only on the
//! traits so every external system can be swapped out in tests.

mod checkout_gateway;
mod kv_store;
mod mailer;

pub use checkout_gateway::{
    CheckoutGateway, CreateSessionRequest, CreatedSession, GatewayError, LineItem,
};
pub use kv_store::{KvError, KvStore};
pub use mailer::{MailError, Mailer, OutboundEmail};
