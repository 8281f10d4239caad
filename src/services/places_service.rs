use std::error::Error;
use std::fmt;
use std::{env, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};

const PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const PHOTO_MAX_WIDTH: u32 = 400;

#[derive(Debug)]
pub enum PlacesError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for PlacesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacesError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            PlacesError::HttpError(err) => write!(f, "HTTP error: {}", err),
            PlacesError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for PlacesError {}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        PlacesError::HttpError(err)
    }
}

/// City suggestion surfaced while the traveler types a destination.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CityPrediction {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlaceDetails {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub photo_urls: Vec<String>,
}

/// Place-search collaborator seam. The wizard's debounced search and the
/// places routes only see this trait, so tests can substitute a recording
/// implementation.
pub trait PlaceSearch {
    async fn predict(&self, query: &str) -> Result<Vec<CityPrediction>, PlacesError>;
    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<AutocompletePrediction>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutocompletePrediction {
    place_id: String,
    description: String,
    structured_formatting: StructuredFormatting,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    main_text: String,
    secondary_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    formatted_address: Option<String>,
    #[serde(default)]
    photos: Vec<PlacePhoto>,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: String,
}

/// Google Places Web Service client (autocomplete + details).
#[derive(Clone)]
pub struct PlacesService {
    http: Client,
    api_key: String,
}

impl PlacesService {
    pub fn new() -> Result<Self, PlacesError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
            PlacesError::EnvironmentError("GOOGLE_MAPS_API_KEY environment variable not set".to_string())
        })?;

        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self { http, api_key })
    }

    fn photo_url(&self, reference: &str) -> String {
        format!(
            "{}/photo?maxwidth={}&photoreference={}&key={}",
            PLACES_BASE_URL, PHOTO_MAX_WIDTH, reference, self.api_key
        )
    }
}

impl PlaceSearch for PlacesService {
    async fn predict(&self, query: &str) -> Result<Vec<CityPrediction>, PlacesError> {
        let url = format!("{}/autocomplete/json", PLACES_BASE_URL);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("input", query),
                ("types", "(cities)"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlacesError::ResponseError(format!(
                "Autocomplete request failed with status {}",
                response.status()
            )));
        }

        let body: AutocompleteResponse = response.json().await?;
        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(body
                .predictions
                .into_iter()
                .map(|prediction| CityPrediction {
                    id: prediction.place_id,
                    name: prediction.structured_formatting.main_text,
                    country: prediction.structured_formatting.secondary_text,
                    description: prediction.description,
                })
                .collect()),
            other => Err(PlacesError::ResponseError(
                body.error_message
                    .unwrap_or_else(|| format!("Autocomplete returned status {}", other)),
            )),
        }
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = format!("{}/details/json", PLACES_BASE_URL);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", "name,formatted_address,photos"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlacesError::ResponseError(format!(
                "Details request failed with status {}",
                response.status()
            )));
        }

        let body: DetailsResponse = response.json().await?;
        if body.status != "OK" {
            return Err(PlacesError::ResponseError(
                body.error_message
                    .unwrap_or_else(|| format!("Details returned status {}", body.status)),
            ));
        }

        let result = body.result.ok_or_else(|| {
            PlacesError::ResponseError("Details reply missing result object".to_string())
        })?;

        Ok(PlaceDetails {
            id: place_id.to_string(),
            name: result.name,
            address: result.formatted_address,
            photo_urls: result
                .photos
                .iter()
                .map(|photo| self.photo_url(&photo.photo_reference))
                .collect(),
        })
    }
}
