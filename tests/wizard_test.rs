use std::sync::{Arc, Mutex};
use std::time::Duration;

use stamped_api::cart::{MemoryStorage, TripCart, MAX_TRIPS};
use stamped_api::models::trip::{BudgetTier, Destination, TripDraft, TripDuration};
use stamped_api::services::places_service::{
    CityPrediction, PlaceDetails, PlaceSearch, PlacesError,
};
use stamped_api::wizard::{DestinationSearch, TripWizard, ValidationError, WizardError, WizardStep};

fn paris() -> Destination {
    Destination {
        id: "paris".to_string(),
        name: "Paris".to_string(),
        image_url: "/about-hero.jpg".to_string(),
        country: Some("France".to_string()),
    }
}

fn cart() -> TripCart<MemoryStorage> {
    TripCart::new(MemoryStorage::new())
}

#[test]
fn test_destination_gate() {
    let cart = cart();
    let mut wizard = TripWizard::new();

    let result = wizard.advance(&cart);

    assert_eq!(
        result,
        Err(WizardError::Validation(ValidationError::MissingDestination))
    );
    assert_eq!(wizard.step(), WizardStep::Destination);
}

#[test]
fn test_budget_and_duration_gate() {
    let cart = cart();
    let mut wizard = TripWizard::new();
    wizard.select_destination(paris());
    wizard.advance(&cart).unwrap();

    assert_eq!(
        wizard.advance(&cart),
        Err(WizardError::Validation(ValidationError::MissingBudget))
    );

    wizard.set_budget(BudgetTier::Luxury);
    assert_eq!(
        wizard.advance(&cart),
        Err(WizardError::Validation(ValidationError::MissingDuration))
    );
    assert_eq!(wizard.step(), WizardStep::BudgetAndDuration);

    wizard.set_duration(TripDuration::Week);
    assert_eq!(wizard.advance(&cart), Ok(WizardStep::Experiences));
}

#[test]
fn test_contact_gate() {
    let cart = cart();
    let mut wizard = TripWizard::new();
    wizard.select_destination(paris());
    wizard.advance(&cart).unwrap();
    wizard.set_budget(BudgetTier::MidRange);
    wizard.set_duration(TripDuration::Weekend);
    wizard.advance(&cart).unwrap();
    wizard.advance(&cart).unwrap(); // experiences step is unconditional

    assert_eq!(
        wizard.advance(&cart),
        Err(WizardError::Validation(ValidationError::MissingName))
    );

    wizard.set_contact("Ada", "not-an-email", "");
    assert_eq!(
        wizard.advance(&cart),
        Err(WizardError::Validation(ValidationError::InvalidEmail))
    );
    assert_eq!(wizard.step(), WizardStep::Contact);
    assert_eq!(cart.count(), 0);

    wizard.set_contact("Ada", "ada@example.com", "");
    assert_eq!(wizard.advance(&cart), Ok(WizardStep::Confirmation));
    assert_eq!(cart.count(), 1);
}

#[test]
fn test_completed_pass_prices_and_resets() {
    let cart = cart();
    let mut wizard = TripWizard::new();
    wizard.select_destination(paris());
    wizard.advance(&cart).unwrap();
    wizard.set_budget(BudgetTier::Luxury);
    wizard.set_duration(TripDuration::Week);
    wizard.advance(&cart).unwrap();
    wizard.toggle_experience("Culture");
    wizard.toggle_experience("Food & Wine");
    assert_eq!(wizard.estimated_price(), Some(12_000));
    wizard.advance(&cart).unwrap();
    wizard.set_contact("Ada Lovelace", "ada@example.com", "Anniversary");
    wizard.advance(&cart).unwrap();

    let submitted = wizard.submitted().unwrap().clone();
    assert_eq!(submitted.total_price, Some(12_000));
    assert_eq!(submitted.destination.name, "Paris");
    assert_eq!(cart.trips()[0].id, submitted.id);

    // advancing past Confirmation starts a cleared pass
    assert_eq!(wizard.advance(&cart), Ok(WizardStep::Destination));
    assert!(wizard.destination().is_none());
    assert!(wizard.experiences().is_empty());
    assert!(wizard.submitted().is_none());
}

#[test]
fn test_back_preserves_entered_values() {
    let cart = cart();
    let mut wizard = TripWizard::new();
    wizard.select_destination(paris());
    wizard.advance(&cart).unwrap();
    wizard.set_budget(BudgetTier::UltraLuxury);
    wizard.set_duration(TripDuration::Month);
    wizard.advance(&cart).unwrap();
    wizard.toggle_experience("Romance");

    assert_eq!(wizard.back(), WizardStep::BudgetAndDuration);
    assert_eq!(wizard.back(), WizardStep::Destination);
    // backing up past the initial step is a no-op
    assert_eq!(wizard.back(), WizardStep::Destination);

    assert_eq!(wizard.destination().unwrap().name, "Paris");
    assert_eq!(wizard.budget(), Some(BudgetTier::UltraLuxury));
    assert_eq!(wizard.duration(), Some(TripDuration::Month));
    assert_eq!(wizard.experiences(), ["Romance".to_string()]);
}

#[test]
fn test_toggle_experience_deselects_and_rejects_unknown_tags() {
    let mut wizard = TripWizard::new();

    wizard.toggle_experience("Nature");
    wizard.toggle_experience("Nature");
    assert!(wizard.experiences().is_empty());

    wizard.toggle_experience("Base Jumping");
    assert!(wizard.experiences().is_empty());

    wizard.toggle_experience("Adventure");
    wizard.toggle_experience("Luxury");
    assert_eq!(wizard.experiences().len(), 2);
}

#[test]
fn test_full_cart_refuses_submission() {
    let cart = cart();
    for i in 0..MAX_TRIPS {
        cart.add_trip(TripDraft {
            destination: paris(),
            budget: BudgetTier::Budget,
            duration: TripDuration::Weekend,
            experiences: Vec::new(),
            name: format!("Traveler {}", i),
            email: "traveler@example.com".to_string(),
            notes: String::new(),
            total_price: Some(600),
        })
        .unwrap();
    }

    let mut wizard = TripWizard::new();
    wizard.select_destination(paris());
    wizard.advance(&cart).unwrap();
    wizard.set_budget(BudgetTier::Budget);
    wizard.set_duration(TripDuration::Weekend);
    wizard.advance(&cart).unwrap();
    wizard.advance(&cart).unwrap();
    wizard.set_contact("Ada", "ada@example.com", "");

    assert_eq!(wizard.advance(&cart), Err(WizardError::CartFull));
    assert_eq!(wizard.step(), WizardStep::Contact);
    assert_eq!(cart.count(), MAX_TRIPS);
}

// --- debounced destination search ---

#[derive(Clone, Default)]
struct RecordingPlaces {
    calls: Arc<Mutex<Vec<String>>>,
    delay: Duration,
}

impl RecordingPlaces {
    fn with_delay(delay: Duration) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            delay,
        }
    }
}

impl PlaceSearch for RecordingPlaces {
    async fn predict(&self, query: &str) -> Result<Vec<CityPrediction>, PlacesError> {
        self.calls.lock().unwrap().push(query.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(vec![CityPrediction {
            id: format!("{}-place", query),
            name: query.to_string(),
            country: Some("France".to_string()),
            description: format!("{}, France", query),
        }])
    }

    async fn details(&self, _place_id: &str) -> Result<PlaceDetails, PlacesError> {
        Err(PlacesError::ResponseError("not implemented".to_string()))
    }
}

struct FailingPlaces;

impl PlaceSearch for FailingPlaces {
    async fn predict(&self, _query: &str) -> Result<Vec<CityPrediction>, PlacesError> {
        Err(PlacesError::ResponseError("OVER_QUERY_LIMIT".to_string()))
    }

    async fn details(&self, _place_id: &str) -> Result<PlaceDetails, PlacesError> {
        Err(PlacesError::ResponseError("OVER_QUERY_LIMIT".to_string()))
    }
}

#[actix_rt::test]
async fn test_rapid_keystrokes_issue_single_lookup() {
    let places = RecordingPlaces::default();
    let calls = places.calls.clone();
    let search = DestinationSearch::with_debounce(places, Duration::from_millis(50));

    let first = search.on_input("Par");
    let second = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        search.on_input("Paris").await
    };

    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, None);
    let suggestions = second.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].name, "Paris");

    let issued = calls.lock().unwrap().clone();
    assert_eq!(issued, vec!["Paris".to_string()]);
}

#[actix_rt::test]
async fn test_stale_response_discarded() {
    // lookups take longer than the gap between keystrokes, so the first
    // response lands after the second query was issued
    let places = RecordingPlaces::with_delay(Duration::from_millis(100));
    let calls = places.calls.clone();
    let search = DestinationSearch::with_debounce(places, Duration::from_millis(50));

    let first = search.on_input("Par");
    let second = async {
        tokio::time::sleep(Duration::from_millis(60)).await;
        search.on_input("Paris").await
    };

    let (first, second) = tokio::join!(first, second);

    // both lookups fired, only the latest result is applied
    assert_eq!(calls.lock().unwrap().len(), 2);
    assert_eq!(first, None);
    assert_eq!(second.unwrap()[0].name, "Paris");
}

#[actix_rt::test]
async fn test_short_query_skips_lookup() {
    let places = RecordingPlaces::default();
    let calls = places.calls.clone();
    let search = DestinationSearch::with_debounce(places, Duration::from_millis(10));

    let result = search.on_input("P").await;

    assert_eq!(result, Some(Vec::new()));
    assert!(calls.lock().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_lookup_failure_degrades_to_empty() {
    let search = DestinationSearch::with_debounce(FailingPlaces, Duration::from_millis(10));

    let result = search.on_input("Paris").await;

    assert_eq!(result, Some(Vec::new()));
}
