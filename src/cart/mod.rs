mod storage;

pub use storage::{CartStorage, FileStorage, MemoryStorage, STORAGE_KEY};

use std::error::Error;
use std::fmt;

use chrono::Utc;
use uuid::Uuid;

use crate::models::trip::{TripDraft, TripItem, TripPatch};

/// Hard cap on concurrently held draft trips.
pub const MAX_TRIPS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    Full,
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartError::Full => write!(f, "Trip cart is full ({} trips)", MAX_TRIPS),
        }
    }
}

impl Error for CartError {}

/// Durable collection of draft trips, capped at [`MAX_TRIPS`].
///
/// Every operation reads the backing storage fresh and every mutation
/// rewrites the full collection, so concurrent writers resolve to last
/// write wins and a change made elsewhere is visible on the next call.
pub struct TripCart<S: CartStorage> {
    storage: S,
}

impl<S: CartStorage> TripCart<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current trips in insertion order. An absent or corrupt payload is an
    /// empty cart, never an error.
    pub fn trips(&self) -> Vec<TripItem> {
        let Some(raw) = self.storage.load() else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(trips) => trips,
            Err(err) => {
                eprintln!("Failed to load trip cart: {}", err);
                Vec::new()
            }
        }
    }

    /// Assigns an id and timestamp, appends and persists. Fails without
    /// mutating state when the cart is at capacity.
    pub fn add_trip(&self, draft: TripDraft) -> Result<TripItem, CartError> {
        let mut trips = self.trips();
        if trips.len() >= MAX_TRIPS {
            return Err(CartError::Full);
        }

        let trip = TripItem {
            id: Uuid::new_v4().to_string(),
            destination: draft.destination,
            budget: draft.budget,
            duration: draft.duration,
            experiences: draft.experiences,
            name: draft.name,
            email: draft.email,
            notes: draft.notes,
            created_at: Utc::now(),
            total_price: draft.total_price,
        };

        trips.push(trip.clone());
        self.save(&trips);
        Ok(trip)
    }

    /// Removing an unknown id is a silent no-op.
    pub fn remove_trip(&self, trip_id: &str) {
        let trips: Vec<TripItem> = self
            .trips()
            .into_iter()
            .filter(|trip| trip.id != trip_id)
            .collect();
        self.save(&trips);
    }

    /// Merges the patch into the matching entry; no-op for an unknown id.
    pub fn update_trip(&self, trip_id: &str, patch: TripPatch) {
        let mut trips = self.trips();
        if let Some(trip) = trips.iter_mut().find(|trip| trip.id == trip_id) {
            if let Some(destination) = patch.destination {
                trip.destination = destination;
            }
            if let Some(budget) = patch.budget {
                trip.budget = budget;
            }
            if let Some(duration) = patch.duration {
                trip.duration = duration;
            }
            if let Some(experiences) = patch.experiences {
                trip.experiences = experiences;
            }
            if let Some(name) = patch.name {
                trip.name = name;
            }
            if let Some(email) = patch.email {
                trip.email = email;
            }
            if let Some(notes) = patch.notes {
                trip.notes = notes;
            }
            if let Some(total_price) = patch.total_price {
                trip.total_price = Some(total_price);
            }
        }
        self.save(&trips);
    }

    pub fn clear(&self) {
        self.save(&[]);
    }

    pub fn count(&self) -> usize {
        self.trips().len()
    }

    pub fn is_full(&self) -> bool {
        self.count() >= MAX_TRIPS
    }

    /// Sum of per-trip estimates, counting a missing price as 0.
    pub fn total_price(&self) -> u64 {
        self.trips()
            .iter()
            .map(|trip| trip.total_price.unwrap_or(0) as u64)
            .sum()
    }

    fn save(&self, trips: &[TripItem]) {
        match serde_json::to_string(trips) {
            Ok(payload) => self.storage.store(&payload),
            Err(err) => eprintln!("Failed to save trip cart: {}", err),
        }
    }
}
