//! Stripe adapter

mod gateway;

pub use gateway::StripeGateway;
