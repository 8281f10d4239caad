use stripe::{
    CheckoutSession, CheckoutSessionMode, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData, CreateCheckoutSessionLineItemsPriceDataProductData,
    Currency,
};

use crate::services::submission_service::{
    CheckoutProvider, CheckoutRequest, CheckoutSessionHandle, PaymentError,
};

/// Product label shown on the Stripe-hosted checkout page.
const DEPOSIT_PRODUCT_NAME: &str = "Custom Trip Deposit";

#[derive(Clone)]
pub struct StripeCheckout {
    client: stripe::Client,
}

impl StripeCheckout {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            client: stripe::Client::new(secret_key.into()),
        }
    }

    pub fn from_env() -> Option<Self> {
        std::env::var("STRIPE_SECRET_KEY").ok().map(Self::new)
    }
}

impl CheckoutProvider for StripeCheckout {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionHandle, PaymentError> {
        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Payment);
        params.success_url = Some(&request.success_url);
        params.cancel_url = Some(&request.cancel_url);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: Currency::USD,
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: DEPOSIT_PRODUCT_NAME.to_string(),
                    description: Some(request.description.clone()),
                    ..Default::default()
                }),
                unit_amount: Some(request.amount_cents),
                ..Default::default()
            }),
            quantity: Some(1),
            ..Default::default()
        }]);
        if !request.metadata.is_empty() {
            params.metadata = Some(request.metadata.clone());
        }

        match CheckoutSession::create(&self.client, params).await {
            Ok(session) => match session.url {
                Some(url) => Ok(CheckoutSessionHandle { url }),
                None => Err(PaymentError {
                    message: "checkout session created without a redirect URL".to_string(),
                }),
            },
            Err(err) => Err(PaymentError {
                message: err.to_string(),
            }),
        }
    }
}
