//! In-memory dashboard state and the fetch driver feeding it.
//!
//! Fetches run as independent tasks and report back with a
//! [`FetchCompleted`] message tagged with the request id captured when the
//! card was created. The [`Dashboard`] applies those messages one at a time,
//! in whatever order they arrive; a message for a card that no longer exists
//! is dropped.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    cities::{CityListStore, same_city},
    error::FetchError,
    model::{CardState, CityWeatherView},
    provider::WeatherSource,
    storage::KeyValueStore,
};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct CityCard {
    pub request_id: RequestId,
    pub city: String,
    pub state: CardState,
}

#[derive(Debug)]
pub struct FetchCompleted {
    pub request_id: RequestId,
    pub result: Result<CityWeatherView, FetchError>,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    cards: Vec<CityCard>,
    next_id: RequestId,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[CityCard] {
        &self.cards
    }

    pub fn card(&self, request_id: RequestId) -> Option<&CityCard> {
        self.cards.iter().find(|c| c.request_id == request_id)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cards.iter().any(|c| same_city(&c.city, city))
    }

    pub fn pending(&self) -> usize {
        self.cards.iter().filter(|c| c.state.is_loading()).count()
    }

    /// Add a loading card for `city`. Returns `None` if the city is already shown.
    pub fn request(&mut self, city: &str) -> Option<RequestId> {
        if self.contains(city) {
            tracing::info!(city, "City already added to dashboard");
            return None;
        }

        self.next_id += 1;
        let request_id = self.next_id;

        self.cards.push(CityCard {
            request_id,
            city: city.to_string(),
            state: CardState::Loading,
        });

        Some(request_id)
    }

    /// Apply a completed fetch. On success returns the resolved city name,
    /// which the caller should persist.
    pub fn apply(&mut self, msg: FetchCompleted) -> Option<String> {
        let Some(idx) = self.cards.iter().position(|c| c.request_id == msg.request_id) else {
            tracing::debug!(request_id = msg.request_id, "Discarding result for removed card");
            return None;
        };

        match msg.result {
            Ok(view) => {
                let resolved_elsewhere = self
                    .cards
                    .iter()
                    .any(|c| c.request_id != msg.request_id && same_city(&c.city, &view.city));

                if resolved_elsewhere {
                    tracing::info!(city = %view.city, "Resolved city already on dashboard");
                    self.cards.remove(idx);
                    return None;
                }

                let city = view.city.clone();
                self.cards[idx] = CityCard {
                    request_id: msg.request_id,
                    city: city.clone(),
                    state: CardState::Ready(view),
                };
                Some(city)
            }
            Err(err) => {
                tracing::warn!(city = %self.cards[idx].city, error = %err, "Weather fetch failed");
                let city = self.cards[idx].city.clone();
                self.cards[idx] = CityCard {
                    request_id: msg.request_id,
                    city,
                    state: CardState::Failed(err.to_string()),
                };
                None
            }
        }
    }

    /// Drop a card. Returns the city name so the caller can unpersist it.
    pub fn remove(&mut self, request_id: RequestId) -> Option<String> {
        let idx = self.cards.iter().position(|c| c.request_id == request_id)?;
        Some(self.cards.remove(idx).city)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Run one current-conditions fetch in its own task.
pub fn spawn_fetch(
    source: Arc<dyn WeatherSource>,
    request_id: RequestId,
    city: String,
    tx: mpsc::UnboundedSender<FetchCompleted>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = source.fetch_current(&city).await;
        if tx.send(FetchCompleted { request_id, result }).is_err() {
            tracing::debug!(request_id, "Dashboard gone before fetch completed");
        }
    })
}

/// Request `city`, wait for its fetch and persist the resolved name on success.
pub async fn add_city<S: KeyValueStore>(
    dashboard: &mut Dashboard,
    cities: &mut CityListStore<S>,
    source: &dyn WeatherSource,
    city: &str,
) -> Option<RequestId> {
    let request_id = dashboard.request(city)?;
    let result = source.fetch_current(city).await;

    if let Some(resolved) = dashboard.apply(FetchCompleted { request_id, result }) {
        cities.add(&resolved);
    }

    dashboard.card(request_id).map(|c| c.request_id)
}

/// Populate the dashboard from the saved list, fetching every city concurrently.
pub async fn load_saved<S: KeyValueStore>(
    dashboard: &mut Dashboard,
    cities: &mut CityListStore<S>,
    source: Arc<dyn WeatherSource>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    for city in cities.list() {
        if let Some(request_id) = dashboard.request(&city) {
            spawn_fetch(source.clone(), request_id, city, tx.clone());
        }
    }
    drop(tx);

    while let Some(msg) = rx.recv().await {
        if let Some(resolved) = dashboard.apply(msg) {
            cities.add(&resolved);
        }
    }
}
