use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::services::places_service::{CityPrediction, PlaceSearch};

/// Pause after the last keystroke before a lookup fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this never reach the collaborator.
pub const MIN_QUERY_LEN: usize = 2;

/// Debounced destination lookup with request-correlation tokens.
///
/// Each keystroke takes a token from an increasing sequence; a response is
/// applied only while its token is still the latest issued, so a stale
/// reply arriving after a newer query is discarded rather than shown.
/// In-flight requests are not aborted at the transport level.
pub struct DestinationSearch<P: PlaceSearch> {
    places: P,
    debounce: Duration,
    seq: AtomicU64,
}

impl<P: PlaceSearch> DestinationSearch<P> {
    pub fn new(places: P) -> Self {
        Self::with_debounce(places, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(places: P, debounce: Duration) -> Self {
        Self {
            places,
            debounce,
            seq: AtomicU64::new(0),
        }
    }

    /// Feed one keystroke's worth of query text.
    ///
    /// Returns `None` when a newer query superseded this one (during the
    /// debounce window or while the lookup was in flight) and
    /// `Some(suggestions)` otherwise. Short queries resolve to no
    /// suggestions without a lookup, and a failed lookup degrades to an
    /// empty list.
    pub async fn on_input(&self, query: &str) -> Option<Vec<CityPrediction>> {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.debounce).await;
        if self.seq.load(Ordering::SeqCst) != token {
            return None;
        }

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Some(Vec::new());
        }

        let predictions = match self.places.predict(query).await {
            Ok(predictions) => predictions,
            Err(err) => {
                eprintln!("Destination search failed: {}", err);
                Vec::new()
            }
        };

        if self.seq.load(Ordering::SeqCst) != token {
            return None;
        }
        Some(predictions)
    }
}
