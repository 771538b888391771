//! Route sequencing for delivery maps.
//!
//! Orders a deliverer's stops with a greedy nearest-neighbor tour over
//! haversine distance, anchored at the first stop. Also carries the pieces
//! around it: coordinate partitioning of delivery records, optional 2-opt
//! refinement, route metrics and per-deliverer batch sequencing.

mod algo;
mod delivery;
mod error;
mod geo;
mod io;
pub mod logging;
mod node;
mod tour;

pub use algo::batch::{DelivererRoute, plan_route, sequence_by_deliverer};
pub use algo::refine::refine_two_opt;
pub use algo::sequence::{sequence_indices, sequence_route, try_sequence_route};
pub use delivery::{Delivery, DeliveryStatus, RouteStop, partition_by_coordinates};
pub use error::{Error, Result};
pub use geo::distance::{EARTH_RADIUS_KM, haversine_km, route_length_km};
pub use io::input::{RouteInput, TextStop};
pub use io::options::{IoFormat, LogFormat, LogLevel, RouteOptions};
pub use io::output::{open_output, write_json_routes, write_text_route};
pub use node::{GeoPoint, Located};
pub use tour::{RouteMetrics, RoutedStop, number_route};
