//! Adboard - newsletter ad booking and reconciliation service
//!
//! Sells ad slots through Stripe hosted checkout, confirms bookings by
//! email, and reconstructs the order book on demand from Stripe's
//! session history merged with locally stored overrides.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
