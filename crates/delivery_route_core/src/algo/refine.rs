use std::time::Instant;

use crate::{
    geo::distance::haversine_km,
    node::{GeoPoint, Located},
};

const MIN_ROUTE_SIZE_FOR_2OPT: usize = 4;
const TWO_OPT_IMPROVEMENT_EPSILON_KM: f64 = 1e-9;

/// Open-path 2-opt over an already sequenced route.
///
/// The first stop stays in front and no return leg is assumed. Runs until a
/// pass makes no swap or `passes` passes have been made. The route never gets
/// longer.
pub fn refine_two_opt<T: Located>(mut stops: Vec<T>, passes: usize) -> Vec<T> {
    let n = stops.len();
    if n < MIN_ROUTE_SIZE_FOR_2OPT || passes == 0 {
        log::debug!("refine.2opt: skip n={n} passes={passes} reason=insufficient_input");
        return stops;
    }

    let now = Instant::now();
    let mut points: Vec<GeoPoint> = stops.iter().map(Located::point).collect();
    let mut passes_executed = 0usize;
    let mut total_swaps = 0usize;

    for pass_idx in 0..passes {
        passes_executed = pass_idx + 1;
        let mut pass_swaps = 0usize;

        for i in 0..(n - 2) {
            for k in (i + 2)..n {
                let a = points[i];
                let b = points[i + 1];
                let c = points[k];

                // The trailing edge only exists when k isn't the route's end.
                let (cur_dist, new_dist) = match points.get(k + 1) {
                    Some(d) => (
                        haversine_km(&a, &b) + haversine_km(&c, d),
                        haversine_km(&a, &c) + haversine_km(&b, d),
                    ),
                    None => (haversine_km(&a, &b), haversine_km(&a, &c)),
                };

                if new_dist < cur_dist - TWO_OPT_IMPROVEMENT_EPSILON_KM {
                    points[(i + 1)..=k].reverse();
                    stops[(i + 1)..=k].reverse();
                    pass_swaps += 1;
                }
            }
        }

        total_swaps += pass_swaps;
        log::debug!("refine.2opt: pass={} swaps={}", pass_idx + 1, pass_swaps);

        if pass_swaps == 0 {
            break;
        }
    }

    log::info!(
        "refine.2opt: complete n={} passes={} swaps={} secs={:.3}",
        n,
        passes_executed,
        total_swaps,
        now.elapsed().as_secs_f32()
    );
    stops
}
