mod search;

pub use search::{DestinationSearch, MIN_QUERY_LEN, SEARCH_DEBOUNCE};

use std::error::Error;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::cart::{CartStorage, TripCart};
use crate::models::trip::{BudgetTier, Destination, TripDraft, TripDuration, TripItem};
use crate::services::pricing_service::PricingService;

/// Experience tags offered on the experiences step.
pub const OFFERED_EXPERIENCES: [&str; 8] = [
    "Adventure",
    "Relaxation",
    "Culture",
    "Food & Wine",
    "Nature",
    "Luxury",
    "Family",
    "Romance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Destination,
    BudgetAndDuration,
    Experiences,
    Contact,
    Confirmation,
}

impl WizardStep {
    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Destination => None,
            WizardStep::BudgetAndDuration => Some(WizardStep::Destination),
            WizardStep::Experiences => Some(WizardStep::BudgetAndDuration),
            WizardStep::Contact => Some(WizardStep::Experiences),
            WizardStep::Confirmation => Some(WizardStep::Contact),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingDestination,
    MissingBudget,
    MissingDuration,
    MissingName,
    InvalidEmail,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationError::MissingDestination => "Select a destination to continue",
            ValidationError::MissingBudget => "Choose a budget to continue",
            ValidationError::MissingDuration => "Choose a trip length to continue",
            ValidationError::MissingName => "Enter your name to continue",
            ValidationError::InvalidEmail => "Enter a valid email address to continue",
        };
        write!(f, "{}", message)
    }
}

impl Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardError {
    Validation(ValidationError),
    CartFull,
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::Validation(err) => write!(f, "{}", err),
            WizardError::CartFull => write!(f, "Your trip cart is full. Remove a trip to add a new one."),
        }
    }
}

impl Error for WizardError {}

impl From<ValidationError> for WizardError {
    fn from(err: ValidationError) -> Self {
        WizardError::Validation(err)
    }
}

/// Linear five-step flow building one cart entry per completed pass.
///
/// Steps are strictly ordered; a forward transition only happens once the
/// current step's required fields validate, and reaching `Confirmation`
/// inserts the configured trip into the cart.
pub struct TripWizard {
    step: WizardStep,
    destination: Option<Destination>,
    budget: Option<BudgetTier>,
    duration: Option<TripDuration>,
    experiences: Vec<String>,
    name: String,
    email: String,
    notes: String,
    submitted: Option<TripItem>,
}

impl Default for TripWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl TripWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Destination,
            destination: None,
            budget: None,
            duration: None,
            experiences: Vec::new(),
            name: String::new(),
            email: String::new(),
            notes: String::new(),
            submitted: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn budget(&self) -> Option<BudgetTier> {
        self.budget
    }

    pub fn duration(&self) -> Option<TripDuration> {
        self.duration
    }

    pub fn experiences(&self) -> &[String] {
        &self.experiences
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Cart entry created by the last completed pass.
    pub fn submitted(&self) -> Option<&TripItem> {
        self.submitted.as_ref()
    }

    pub fn select_destination(&mut self, destination: Destination) {
        self.destination = Some(destination);
    }

    pub fn set_budget(&mut self, budget: BudgetTier) {
        self.budget = Some(budget);
    }

    pub fn set_duration(&mut self, duration: TripDuration) {
        self.duration = Some(duration);
    }

    /// Checkbox semantics: selecting an already-selected tag deselects it.
    /// Tags outside the offered list are ignored, so duplicates and free
    /// text cannot enter a draft.
    pub fn toggle_experience(&mut self, tag: &str) {
        if !OFFERED_EXPERIENCES.contains(&tag) {
            return;
        }
        if let Some(index) = self.experiences.iter().position(|chosen| chosen == tag) {
            self.experiences.remove(index);
        } else {
            self.experiences.push(tag.to_string());
        }
    }

    pub fn set_contact(&mut self, name: &str, email: &str, notes: &str) {
        self.name = name.to_string();
        self.email = email.to_string();
        self.notes = notes.to_string();
    }

    /// Live estimate once budget and duration are both chosen.
    pub fn estimated_price(&self) -> Option<u32> {
        Some(PricingService::estimate_trip_price(
            self.budget?,
            self.duration?,
            self.experiences.len(),
        ))
    }

    /// Advance one step. The `Contact → Confirmation` transition performs
    /// the cart insertion; a full cart refuses the transition and leaves the
    /// state at `Contact`. Advancing past `Confirmation` starts a fresh pass.
    pub fn advance<S: CartStorage>(
        &mut self,
        cart: &TripCart<S>,
    ) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Destination => {
                if self.destination.is_none() {
                    return Err(ValidationError::MissingDestination.into());
                }
                self.step = WizardStep::BudgetAndDuration;
            }
            WizardStep::BudgetAndDuration => {
                if self.budget.is_none() {
                    return Err(ValidationError::MissingBudget.into());
                }
                if self.duration.is_none() {
                    return Err(ValidationError::MissingDuration.into());
                }
                self.step = WizardStep::Experiences;
            }
            WizardStep::Experiences => {
                self.step = WizardStep::Contact;
            }
            WizardStep::Contact => {
                let draft = self.draft()?;
                let trip = cart.add_trip(draft).map_err(|_| WizardError::CartFull)?;
                self.submitted = Some(trip);
                self.step = WizardStep::Confirmation;
            }
            WizardStep::Confirmation => {
                self.reset();
            }
        }
        Ok(self.step)
    }

    /// Step back to the predecessor, keeping every entered value. No-op at
    /// the initial step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn reset(&mut self) {
        *self = TripWizard::new();
    }

    fn draft(&self) -> Result<TripDraft, ValidationError> {
        let destination = self
            .destination
            .clone()
            .ok_or(ValidationError::MissingDestination)?;
        let budget = self.budget.ok_or(ValidationError::MissingBudget)?;
        let duration = self.duration.ok_or(ValidationError::MissingDuration)?;

        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !is_plausible_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(TripDraft {
            destination,
            budget,
            duration,
            experiences: self.experiences.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            notes: self.notes.clone(),
            total_price: Some(PricingService::estimate_trip_price(
                budget,
                duration,
                self.experiences.len(),
            )),
        })
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Syntactic plausibility only; deliverability is the mail provider's
/// problem.
pub fn is_plausible_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}
