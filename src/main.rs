use std::time::Instant;

use log::info;

use delivery_route_core::{
    Result, RouteInput, RouteMetrics, RouteOptions, logging, number_route, open_output,
    plan_route, sequence_by_deliverer, write_json_routes, write_text_route,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = RouteOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = RouteInput::read(&options)?;

    info!("input: {input}");
    info!("options: {options}");

    let mut out = open_output(&options)?;
    let (routed, total_km) = match input {
        RouteInput::Stops(stops) => {
            let route = plan_route(stops, &options)?;
            let metrics = RouteMetrics::from_route(&route);
            let route = number_route(route);
            write_text_route(&mut out, &route)?;
            (route.len(), metrics.total_km)
        }
        RouteInput::Deliveries(deliveries) => {
            let routes = sequence_by_deliverer(deliveries, &options)?;
            write_json_routes(&mut out, &routes)?;
            let routed: usize = routes.iter().map(|r| r.stops.len()).sum();
            let total_km: f64 = routes.iter().map(|r| r.metrics.total_km).sum();
            (routed, total_km)
        }
    };

    info!(
        "output: n={} total_km={:.3} time={:.2}s",
        routed,
        total_km,
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
