use bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// Booking-inquiry form body, camelCase on the wire the way the storefront
/// sends it.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingInquiry {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_preference: Option<String>,
    pub destination: String,
    #[serde(default)]
    pub travel_date: Option<String>,
    #[serde(default)]
    pub nights_count: Option<u32>,
    #[serde(default)]
    pub passenger_count: Option<u32>,
    #[serde(default)]
    pub passenger_ages: Option<String>,
    #[serde(default)]
    pub valid_passports: Option<bool>,
    #[serde(default)]
    pub room_count: Option<u32>,
    #[serde(default)]
    pub budget_per_person: Option<f64>,
    #[serde(default)]
    pub specific_hotel: Option<String>,
    #[serde(default)]
    pub all_inclusive: Option<bool>,
    #[serde(default)]
    pub include_flights: Option<bool>,
    #[serde(default)]
    pub flight_details: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    /// Open a Stripe deposit session once the records persist.
    #[serde(default)]
    pub deposit: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub contact_preference: Option<String>,
    pub created_at: Option<DateTime>,
}

impl ClientRecord {
    pub fn from_inquiry(inquiry: &BookingInquiry) -> Self {
        Self {
            id: None,
            full_name: inquiry.full_name.clone(),
            email: inquiry.email.clone(),
            phone: inquiry.phone.clone(),
            contact_preference: inquiry.contact_preference.clone(),
            created_at: Some(DateTime::now()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripSubmission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub client_id: String,
    pub destination: String,
    pub travel_date: Option<String>,
    pub nights_count: Option<u32>,
    pub passenger_count: Option<u32>,
    pub passenger_ages: Option<String>,
    pub valid_passports: Option<bool>,
    pub room_count: Option<u32>,
    pub budget_per_person: Option<f64>,
    pub specific_hotel: Option<String>,
    pub all_inclusive: Option<bool>,
    pub include_flights: Option<bool>,
    pub flight_details: Option<String>,
    pub activities: Vec<String>,
    pub status: SubmissionStatus,
    pub created_at: Option<DateTime>,
}

impl TripSubmission {
    pub fn from_inquiry(inquiry: &BookingInquiry, client_id: String) -> Self {
        Self {
            id: None,
            client_id,
            destination: inquiry.destination.clone(),
            travel_date: inquiry.travel_date.clone(),
            nights_count: inquiry.nights_count,
            passenger_count: inquiry.passenger_count,
            passenger_ages: inquiry.passenger_ages.clone(),
            valid_passports: inquiry.valid_passports,
            room_count: inquiry.room_count,
            budget_per_person: inquiry.budget_per_person,
            specific_hotel: inquiry.specific_hotel.clone(),
            all_inclusive: inquiry.all_inclusive,
            include_flights: inquiry.include_flights,
            flight_details: inquiry.flight_details.clone(),
            activities: inquiry.activities.clone(),
            status: SubmissionStatus::Pending,
            created_at: Some(DateTime::now()),
        }
    }
}
