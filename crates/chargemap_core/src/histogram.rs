use crate::models::EnrichedStation;

pub const SEGMENT_COUNT: usize = 5;

/// Headroom added above the highest observed power, in kW.
const POWER_MARGIN: f64 = 20.0;
/// The scale maximum is rounded up to a multiple of this, in kW.
const ROUND_STEP: f64 = 10.0;
/// Scale maximum used before any station data is loaded, in kW.
const DEFAULT_SCALE_MAX: f64 = 300.0;

/// Upper end of the power scale: the highest derived power plus a margin,
/// rounded up to the nearest 10 kW. Falls back to 300 kW for an empty
/// collection so UI sliders keep a sensible range before data arrives.
pub fn power_scale_max(stations: &[EnrichedStation]) -> f64 {
    if stations.is_empty() {
        return DEFAULT_SCALE_MAX;
    }
    let max_observed = stations
        .iter()
        .map(|s| s.kilowatts_calculated)
        .fold(0.0, f64::max);
    ((max_observed + POWER_MARGIN) / ROUND_STEP).ceil() * ROUND_STEP
}

/// Bucket the derived power of every station into 5 equal-width segments
/// of the dynamic power scale.
pub fn power_distribution(stations: &[EnrichedStation]) -> [u32; SEGMENT_COUNT] {
    let segment_size = power_scale_max(stations) / SEGMENT_COUNT as f64;
    let mut buckets = [0u32; SEGMENT_COUNT];

    for station in stations {
        // Clamp so a value equal to the scale maximum lands in the last bucket.
        let index = ((station.kilowatts_calculated / segment_size).floor() as usize)
            .min(SEGMENT_COUNT - 1);
        buckets[index] += 1;
    }
    buckets
}
