//! Delivery records as served by the delivery API, and the split between the
//! ones that can go on a map and the ones that can't.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node::{GeoPoint, Located};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Failed,
    Cancelled,
}

/// A delivery record. Only the fields routing looks at are typed; everything
/// else the API sends is kept in `extra` and written back as received.
/// Optional fields that were absent on input stay absent on output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverer_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Delivery {
    /// Both coordinates, if present and finite. Zero counts as a coordinate.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(GeoPoint::new(lat, lng))
            }
            _ => None,
        }
    }
}

/// A delivery whose coordinates have been resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteStop {
    #[serde(flatten)]
    pub delivery: Delivery,
    #[serde(skip)]
    pub point: GeoPoint,
    /// Position of the delivery in the list handed to [`partition_by_coordinates`].
    #[serde(skip)]
    pub input_index: usize,
}

impl Located for RouteStop {
    fn latitude(&self) -> f64 {
        self.point.lat
    }

    fn longitude(&self) -> f64 {
        self.point.lng
    }
}

/// Splits deliveries into routable stops and those missing a coordinate.
/// Input order is kept on both sides.
pub fn partition_by_coordinates(deliveries: Vec<Delivery>) -> (Vec<RouteStop>, Vec<Delivery>) {
    let mut located = Vec::with_capacity(deliveries.len());
    let mut unlocated = Vec::new();

    for (input_index, delivery) in deliveries.into_iter().enumerate() {
        match delivery.coordinates() {
            Some(point) => located.push(RouteStop {
                delivery,
                point,
                input_index,
            }),
            None => unlocated.push(delivery),
        }
    }

    log::debug!(
        "partition: located={} unlocated={}",
        located.len(),
        unlocated.len()
    );
    (located, unlocated)
}
