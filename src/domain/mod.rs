//! Domain layer
//!
//! Pure business logic with no I/O: webhook signature verification, ad
//! reconciliation, and the site configuration document.

pub mod ad;
pub mod site_config;
pub mod webhook;
