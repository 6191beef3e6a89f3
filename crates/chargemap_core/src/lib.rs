mod geo;
mod histogram;
mod metrics;
mod models;

pub use crate::geo::distance_km;
pub use crate::histogram::{SEGMENT_COUNT, power_distribution, power_scale_max};
pub use crate::metrics::enrich;
pub use crate::models::*;

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("latitude {latitude} is outside the valid range [-90, 90]")]
    LatitudeOutOfRange { latitude: f64 },
    #[error("longitude {longitude} is outside the valid range [-180, 180]")]
    LongitudeOutOfRange { longitude: f64 },
    #[error("power threshold {threshold} must be a non-negative number")]
    InvalidThreshold { threshold: f64 },
}

/// Reference point used until the map reports its first center: Moscow.
pub const DEFAULT_REFERENCE_POINT: Coordinates = Coordinates {
    latitude: 55.751244,
    longitude: 37.618423,
};

/// Aggregation and geo-ranking engine over a charging-station dataset.
///
/// Owns the raw station collection, the map reference point, the minimum
/// power threshold and the current selection. Every derived view (enriched
/// collection, distance map, ranked list, power distribution) is a pure
/// function of those inputs, computed lazily on first read and cached with
/// the revision of the inputs it depends on. A mutation bumps the revision
/// of the input it touched; stale views are rebuilt on the next read.
#[derive(Debug, Clone)]
pub struct StationEngine {
    stations: Vec<ChargingStation>,
    reference: Coordinates,
    threshold: f64,
    selected_id: Option<u64>,

    stations_rev: u64,
    reference_rev: u64,
    threshold_rev: u64,

    enriched: Option<(u64, Vec<EnrichedStation>)>,
    distances: Option<((u64, u64), HashMap<u64, f64>)>,
    ranked: Option<((u64, u64, u64), Vec<EnrichedStation>)>,
    distribution: Option<(u64, [u32; SEGMENT_COUNT])>,
}

impl StationEngine {
    pub fn new(stations: Vec<ChargingStation>) -> Self {
        StationEngine {
            stations,
            reference: DEFAULT_REFERENCE_POINT,
            threshold: 0.0,
            selected_id: None,
            stations_rev: 0,
            reference_rev: 0,
            threshold_rev: 0,
            enriched: None,
            distances: None,
            ranked: None,
            distribution: None,
        }
    }

    /// Swap the whole station dataset, e.g. after a data refresh.
    pub fn replace_stations(&mut self, stations: Vec<ChargingStation>) {
        tracing::info!("Replacing station dataset with {} stations", stations.len());
        self.stations = stations;
        self.stations_rev += 1;
    }

    /// Move the reference point distances are measured from. Rejects
    /// out-of-range coordinates; a write with the current value is a no-op
    /// and keeps the cached distance map valid.
    pub fn set_reference_point(&mut self, latitude: f64, longitude: f64) -> Result<(), EngineError> {
        let point = Coordinates {
            latitude,
            longitude,
        };
        point.validate()?;
        if point != self.reference {
            tracing::info!("Moving reference point to ({latitude}, {longitude})");
            self.reference = point;
            self.reference_rev += 1;
        }
        Ok(())
    }

    /// Set the minimum derived power a station needs to appear in the
    /// ranked view. Zero admits every station.
    pub fn set_power_threshold(&mut self, threshold: f64) -> Result<(), EngineError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(EngineError::InvalidThreshold { threshold });
        }
        if threshold != self.threshold {
            tracing::info!("Setting power threshold to {threshold} kW");
            self.threshold = threshold;
            self.threshold_rev += 1;
        }
        Ok(())
    }

    /// Mark a station as selected. No existence check: the id may belong to
    /// data that has not arrived yet, and resolution handles unknown ids.
    pub fn select_station(&mut self, id: u64) {
        tracing::info!("Selecting station {id}");
        self.selected_id = Some(id);
    }

    pub fn clear_selection(&mut self) {
        tracing::info!("Clearing station selection");
        self.selected_id = None;
    }

    pub fn stations(&self) -> &[ChargingStation] {
        &self.stations
    }

    pub fn reference_point(&self) -> Coordinates {
        self.reference
    }

    pub fn power_threshold(&self) -> f64 {
        self.threshold
    }

    pub fn selected_station_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// The full collection with normalization applied and metrics computed,
    /// in dataset order.
    pub fn enriched_stations(&mut self) -> &[EnrichedStation] {
        self.ensure_enriched()
    }

    /// Distances in kilometers from the current reference point, keyed by
    /// station id. Rebuilt only when the dataset or the reference point
    /// changes, so unrelated reads reuse the same map.
    pub fn station_distances(&mut self) -> &HashMap<u64, f64> {
        self.ensure_distances()
    }

    /// Stations at or above the power threshold, ordered by ascending
    /// distance from the reference point. Equal distances keep dataset
    /// order (stable sort); the tie order carries no meaning.
    pub fn ranked_stations(&mut self) -> &[EnrichedStation] {
        self.ensure_ranked()
    }

    /// Counts of stations per power segment, for the distribution chart.
    pub fn power_distribution(&mut self) -> [u32; SEGMENT_COUNT] {
        if !matches!(&self.distribution, Some((rev, _)) if *rev == self.stations_rev) {
            let rev = self.stations_rev;
            let buckets = histogram::power_distribution(self.ensure_enriched());
            self.distribution = Some((rev, buckets));
        }
        self.distribution
            .as_ref()
            .expect("distribution cache filled above")
            .1
    }

    /// Upper end of the power scale for the current dataset.
    pub fn power_scale_max(&mut self) -> f64 {
        histogram::power_scale_max(self.ensure_enriched())
    }

    /// The currently selected station, or `None` when nothing is selected
    /// or the selected id is not in the collection (e.g. after a refresh).
    pub fn selected_station(&mut self) -> Option<&EnrichedStation> {
        let id = self.selected_id?;
        self.ensure_enriched().iter().find(|s| s.id == id)
    }

    fn ensure_enriched(&mut self) -> &[EnrichedStation] {
        if !matches!(&self.enriched, Some((rev, _)) if *rev == self.stations_rev) {
            tracing::debug!("Recomputing metrics for {} stations", self.stations.len());
            let enriched = self.stations.iter().map(metrics::enrich).collect();
            self.enriched = Some((self.stations_rev, enriched));
        }
        &self.enriched.as_ref().expect("enriched cache filled above").1
    }

    fn ensure_distances(&mut self) -> &HashMap<u64, f64> {
        let key = (self.stations_rev, self.reference_rev);
        if !matches!(&self.distances, Some((cached, _)) if *cached == key) {
            tracing::debug!(
                "Recomputing distances to {} stations from ({}, {})",
                self.stations.len(),
                self.reference.latitude,
                self.reference.longitude
            );
            let reference = self.reference;
            let map = self
                .stations
                .iter()
                .map(|s| (s.id, geo::haversine_km(&reference, &s.coordinates)))
                .collect();
            self.distances = Some((key, map));
        }
        &self.distances.as_ref().expect("distance cache filled above").1
    }

    fn ensure_ranked(&mut self) -> &[EnrichedStation] {
        let key = (self.stations_rev, self.reference_rev, self.threshold_rev);
        if !matches!(&self.ranked, Some((cached, _)) if *cached == key) {
            self.ensure_enriched();
            self.ensure_distances();
            let enriched = &self.enriched.as_ref().expect("enriched cache filled above").1;
            let distances = &self.distances.as_ref().expect("distance cache filled above").1;

            let mut ranked: Vec<EnrichedStation> = enriched
                .iter()
                .filter(|s| s.kilowatts_calculated >= self.threshold)
                .cloned()
                .collect();
            ranked.sort_by(|a, b| {
                let distance_a = distances.get(&a.id).copied().unwrap_or(0.0);
                let distance_b = distances.get(&b.id).copied().unwrap_or(0.0);
                distance_a.total_cmp(&distance_b)
            });
            self.ranked = Some((key, ranked));
        }
        &self.ranked.as_ref().expect("ranked cache filled above").1
    }
}
