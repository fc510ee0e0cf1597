//! The saved-city list.
//!
//! Stored as a JSON array of strings under [`CITIES_KEY`]. Every operation
//! reads the whole list and writes the whole list back. Storage failures are
//! logged and swallowed: reads degrade to an empty list, writes to a no-op.

use crate::storage::KeyValueStore;

pub const CITIES_KEY: &str = "weather-dashboard-cities";

/// Exact, case-sensitive comparison used for every duplicate check.
pub fn same_city(a: &str, b: &str) -> bool {
    a == b
}

#[derive(Debug)]
pub struct CityListStore<S> {
    store: S,
}

impl<S: KeyValueStore> CityListStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> Vec<String> {
        let raw = match self.store.get(CITIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Error retrieving cities from storage");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(cities) => cities,
            Err(e) => {
                tracing::error!(error = %e, "Error retrieving cities from storage");
                Vec::new()
            }
        }
    }

    pub fn add(&mut self, city: &str) {
        let mut cities = self.list();
        if cities.iter().any(|c| same_city(c, city)) {
            return;
        }

        cities.push(city.to_string());
        self.save(&cities);
    }

    pub fn remove(&mut self, city: &str) {
        let cities: Vec<String> = self
            .list()
            .into_iter()
            .filter(|c| !same_city(c, city))
            .collect();

        self.save(&cities);
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.store.delete(CITIES_KEY) {
            tracing::error!(error = %e, "Error clearing cities from storage");
        }
    }

    fn save(&mut self, cities: &[String]) {
        let json = match serde_json::to_string(cities) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Error saving cities to storage");
                return;
            }
        };

        if let Err(e) = self.store.set(CITIES_KEY, &json) {
            tracing::error!(error = %e, "Error saving cities to storage");
        }
    }
}
