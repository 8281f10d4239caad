use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use mongodb::{Client, Collection};

use crate::db::mongo::DB_NAME;
use crate::models::submission::{BookingInquiry, ClientRecord, TripSubmission};

/// Fixed deposit collected when a traveler finalizes a custom trip.
pub const DEPOSIT_AMOUNT_CENTS: i64 = 50_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceError {
    pub message: String,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for PersistenceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentError {
    pub message: String,
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for PaymentError {}

#[derive(Debug)]
pub enum SubmissionError {
    /// The inquiry never persisted; the collaborator's message is relayed
    /// verbatim and no payment call was made.
    Persistence(PersistenceError),
    /// The inquiry persisted but the checkout session did not open. The ids
    /// let the client offer a payment retry without resubmitting.
    Payment {
        submission_id: String,
        client_id: String,
        error: PaymentError,
    },
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Persistence(err) => write!(f, "Persistence error: {}", err),
            SubmissionError::Payment { submission_id, error, .. } => {
                write!(f, "Submission {} saved but payment failed: {}", submission_id, error)
            }
        }
    }
}

impl Error for SubmissionError {}

/// Persistence collaborator seam for booking inquiries.
pub trait SubmissionStore {
    async fn insert_client(&self, client: &ClientRecord) -> Result<String, PersistenceError>;
    async fn insert_submission(&self, submission: &TripSubmission)
        -> Result<String, PersistenceError>;
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub amount_cents: i64,
    pub description: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: HashMap<String, String>,
}

impl CheckoutRequest {
    /// Deposit session for a persisted submission; the metadata carries the
    /// submission id so the payment can be reconciled later.
    pub fn deposit(destination: &str, submission_id: &str) -> Self {
        let base_url = app_base_url();
        Self {
            amount_cents: DEPOSIT_AMOUNT_CENTS,
            description: format!("Deposit for your custom trip to {}", destination),
            success_url: format!("{}/dashboard/client?success=true", base_url),
            cancel_url: format!("{}/build?canceled=true", base_url),
            metadata: HashMap::from([("submission_id".to_string(), submission_id.to_string())]),
        }
    }
}

pub fn app_base_url() -> String {
    std::env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionHandle {
    pub url: String,
}

/// Payments collaborator seam.
pub trait CheckoutProvider {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionHandle, PaymentError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub client_id: String,
    pub checkout_url: Option<String>,
}

/// Relay for finalized inquiries: persist first, then collect the deposit.
pub struct SubmissionService<S, P> {
    store: S,
    payments: Option<P>,
}

impl<S: SubmissionStore, P: CheckoutProvider> SubmissionService<S, P> {
    pub fn new(store: S, payments: Option<P>) -> Self {
        Self { store, payments }
    }

    /// Persists the client record, then the submission, then (when a
    /// deposit was requested) opens a checkout session referencing the
    /// stored submission. Persistence failure short-circuits before any
    /// payment call.
    pub async fn submit(
        &self,
        inquiry: &BookingInquiry,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let client = ClientRecord::from_inquiry(inquiry);
        let client_id = self
            .store
            .insert_client(&client)
            .await
            .map_err(SubmissionError::Persistence)?;

        let submission = TripSubmission::from_inquiry(inquiry, client_id.clone());
        let submission_id = self
            .store
            .insert_submission(&submission)
            .await
            .map_err(SubmissionError::Persistence)?;

        if !inquiry.deposit {
            return Ok(SubmissionReceipt {
                submission_id,
                client_id,
                checkout_url: None,
            });
        }

        let provider = match &self.payments {
            Some(provider) => provider,
            None => {
                return Err(SubmissionError::Payment {
                    submission_id,
                    client_id,
                    error: PaymentError {
                        message: "payments collaborator is not configured".to_string(),
                    },
                })
            }
        };

        let request = CheckoutRequest::deposit(&inquiry.destination, &submission_id);
        match provider.create_checkout_session(&request).await {
            Ok(session) => Ok(SubmissionReceipt {
                submission_id,
                client_id,
                checkout_url: Some(session.url),
            }),
            Err(error) => Err(SubmissionError::Payment {
                submission_id,
                client_id,
                error,
            }),
        }
    }
}

/// Mongo-backed store used by the live service.
pub struct MongoSubmissionStore {
    client: Arc<Client>,
}

impl MongoSubmissionStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl SubmissionStore for MongoSubmissionStore {
    async fn insert_client(&self, client: &ClientRecord) -> Result<String, PersistenceError> {
        let collection: Collection<ClientRecord> =
            self.client.database(DB_NAME).collection("Clients");
        match collection.insert_one(client).await {
            Ok(result) => Ok(result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_else(|| result.inserted_id.to_string())),
            Err(err) => Err(PersistenceError {
                message: err.to_string(),
            }),
        }
    }

    async fn insert_submission(
        &self,
        submission: &TripSubmission,
    ) -> Result<String, PersistenceError> {
        let collection: Collection<TripSubmission> =
            self.client.database(DB_NAME).collection("TripSubmissions");
        match collection.insert_one(submission).await {
            Ok(result) => Ok(result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_else(|| result.inserted_id.to_string())),
            Err(err) => Err(PersistenceError {
                message: err.to_string(),
            }),
        }
    }
}
