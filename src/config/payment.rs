//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
///
/// Price IDs and checkout redirect URLs are injected here rather than
/// hard-coded so the same binary can run against test and live catalogs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: String,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Stripe price ID for premium ad slots
    pub premium_price_id: String,

    /// Stripe price ID for unclassified ad slots
    pub unclassified_price_id: String,

    /// Where Stripe redirects after successful payment
    pub success_url: String,

    /// Where Stripe redirects when the customer backs out
    pub cancel_url: String,

    /// Stripe API base URL (overridable for tests)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.premium_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("PREMIUM_PRICE_ID"));
        }
        if self.unclassified_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("UNCLASSIFIED_PRICE_ID"));
        }

        if !self.success_url.starts_with("http") {
            return Err(ValidationError::InvalidCheckoutUrl("SUCCESS_URL"));
        }
        if !self.cancel_url.starts_with("http") {
            return Err(ValidationError::InvalidCheckoutUrl("CANCEL_URL"));
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}
