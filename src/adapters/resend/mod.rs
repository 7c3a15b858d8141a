//! Resend email adapter and HTML templates

mod mailer;
pub mod templates;

pub use mailer::ResendMailer;
