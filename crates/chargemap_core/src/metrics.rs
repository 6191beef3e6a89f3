use crate::models::{ChargingStation, EnrichedReview, EnrichedStation, StationReview};

const NO_DESCRIPTION: &str = "No description";
const NO_MESSAGE: &str = "No comment";

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_to_cent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn normalize_review(review: &StationReview) -> EnrichedReview {
    EnrichedReview {
        user_id: review.user_id,
        user_name: review.user_name.clone(),
        car_model: review.car_model.clone(),
        kilowatts: review.kilowatts.unwrap_or(0.0),
        message: review
            .message
            .clone()
            .unwrap_or_else(|| NO_MESSAGE.to_string()),
        created_at: review.created_at,
        rating: review.rating.unwrap_or(0.0),
        user_metadata: review.user_metadata.clone(),
    }
}

/// Mean review rating; 0 for an empty review list.
fn average_rating(reviews: &[EnrichedReview]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    reviews.iter().map(|r| r.rating).sum::<f64>() / reviews.len() as f64
}

/// Median of the observed kilowatt values; 0 for an empty review list.
///
/// Even counts average the two middle elements.
fn median_power(reviews: &[EnrichedReview]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let mut kilowatts: Vec<f64> = reviews.iter().map(|r| r.kilowatts).collect();
    kilowatts.sort_by(f64::total_cmp);

    let mid = kilowatts.len() / 2;
    if kilowatts.len() % 2 == 0 {
        (kilowatts[mid - 1] + kilowatts[mid]) / 2.0
    } else {
        kilowatts[mid]
    }
}

/// Normalize a raw station record and compute its derived metrics.
///
/// Total function: every missing field gets a default before the metrics
/// are computed, so malformed input can never make it fail.
pub fn enrich(station: &ChargingStation) -> EnrichedStation {
    let reviews: Vec<EnrichedReview> = station.reviews.iter().map(normalize_review).collect();
    let rating = round_to_tenth(average_rating(&reviews));
    let kilowatts_calculated = round_to_tenth(median_power(&reviews));

    EnrichedStation {
        id: station.id,
        name: station.name.clone(),
        description: station
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        coordinates: station.coordinates,
        address: station.address.clone(),
        provider: station.provider.clone(),
        success_rate: station.success_rate,
        kilowatt_price: station.kilowatt_price.map(round_to_cent),
        kilowatts_declared: station.kilowatts_declared.unwrap_or(0.0),
        reviews,
        rating,
        kilowatts_calculated,
    }
}
