use serde::Serialize;

use crate::{geo::distance::haversine_km, node::Located};

/// Leg statistics for an open route, in kilometers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub legs: usize,
    pub total_km: f64,
    pub longest_km: f64,
    pub average_km: f64,
}

impl RouteMetrics {
    pub fn from_route<T: Located>(stops: &[T]) -> Self {
        let n = stops.len();
        if n < 2 {
            log::info!("metrics: n={n} total_km=0 longest_km=0 avg_km=0");
            return Self::default();
        }

        let distances: Vec<f64> = stops
            .windows(2)
            .map(|w| haversine_km(&w[0], &w[1]))
            .collect();
        let legs = distances.len();
        let total_km: f64 = distances.iter().sum();
        let longest_km = distances.iter().copied().fold(0.0_f64, f64::max);
        let average_km = total_km / legs as f64;

        log::info!(
            "metrics: n={n} total_km={total_km:.3} longest_km={longest_km:.3} avg_km={average_km:.3}"
        );

        Self {
            legs,
            total_km,
            longest_km,
            average_km,
        }
    }
}

/// A stop with its 1-based position on the route (marker `k` is `route[k - 1]`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoutedStop<T> {
    pub sequence: usize,
    #[serde(flatten)]
    pub stop: T,
}

pub fn number_route<T>(stops: Vec<T>) -> Vec<RoutedStop<T>> {
    stops
        .into_iter()
        .enumerate()
        .map(|(idx, stop)| RoutedStop {
            sequence: idx + 1,
            stop,
        })
        .collect()
}
