//! Adapters (implementations of the ports against real systems)

pub mod http;
pub mod kv;
pub mod resend;
pub mod stripe;
