//! Local pickup eligibility.
//!
//! Customers within a short drive of the shop can choose local pickup
//! instead of shipping. Eligibility is decided from a small table of
//! nearby ZIP code centroids; any other ZIP is treated as out of range.

use serde::Serialize;

/// Shop location (ZIP 28212 centroid).
pub const STORE_LAT: f64 = 35.2271;
pub const STORE_LON: f64 = -80.8431;

/// Maximum straight-line distance for pickup, in miles.
pub const MAX_DISTANCE_MILES: f64 = 10.0;

const EARTH_RADIUS_MILES: f64 = 3959.0;

const ZIP_COORDINATES: &[(&str, f64, f64)] = &[
    ("28212", 35.2271, -80.8431),
    ("28213", 35.2940, -80.8648),
    ("28214", 35.2826, -80.9590),
    ("28215", 35.2485, -80.7374),
    ("28216", 35.2635, -80.8951),
    ("28217", 35.1849, -80.9173),
    ("28226", 35.1349, -80.8473),
    ("28269", 35.2968, -80.7349),
    ("28262", 35.3029, -80.7646),
    ("28205", 35.2207, -80.8046),
    ("28206", 35.2435, -80.8273),
    ("28208", 35.2268, -80.8784),
    ("28210", 35.1491, -80.8593),
    ("28211", 35.1849, -80.8173),
    ("28270", 35.3474, -80.7349),
];

/// Result of a pickup eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickupEligibility {
    pub eligible: bool,
    /// Distance from the shop in miles, rounded to one decimal place;
    /// `None` for ZIP codes outside the lookup table.
    pub distance: Option<f64>,
}

/// Great-circle distance between two coordinates, in miles.
#[must_use]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Check whether a ZIP code is close enough for local pickup.
#[must_use]
pub fn check_pickup(zip: &str) -> PickupEligibility {
    let zip = zip.trim();
    let Some(&(_, lat, lon)) = ZIP_COORDINATES.iter().find(|(code, _, _)| *code == zip) else {
        return PickupEligibility {
            eligible: false,
            distance: None,
        };
    };

    let distance = haversine_miles(STORE_LAT, STORE_LON, lat, lon);
    PickupEligibility {
        eligible: distance <= MAX_DISTANCE_MILES,
        distance: Some((distance * 10.0).round() / 10.0),
    }
}
