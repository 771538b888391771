use std::{collections::BTreeMap, time::Instant};

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    Delivery, Error, Located, Result, RouteMetrics, RouteStop,
    algo::refine::refine_two_opt,
    algo::sequence::{sequence_route, try_sequence_route},
    io::options::RouteOptions,
    partition_by_coordinates,
    tour::{RoutedStop, number_route},
};

/// One deliverer's sequenced route plus the deliveries that couldn't be placed.
#[derive(Clone, Debug, Serialize)]
pub struct DelivererRoute {
    pub deliverer_id: Option<u64>,
    pub metrics: RouteMetrics,
    pub stops: Vec<RoutedStop<RouteStop>>,
    pub unlocated: Vec<Delivery>,
}

/// Sequences a single route according to `options`: size bound, optional
/// validation, greedy ordering, optional 2-opt.
pub fn plan_route<T: Located>(stops: Vec<T>, options: &RouteOptions) -> Result<Vec<T>> {
    options.check_route_size(stops.len())?;

    let route = if options.strict {
        try_sequence_route(stops)?
    } else {
        sequence_route(stops)
    };

    Ok(match options.refine_passes() {
        Some(passes) => refine_two_opt(route, passes),
        None => route,
    })
}

/// Groups deliveries by deliverer and sequences every group on the rayon pool.
///
/// Groups come back ordered by deliverer id, unassigned deliveries first.
/// Within a group the first delivery (in input order) anchors the route.
/// In strict mode a single bad coordinate rejects the whole batch, reported
/// at its position in `deliveries`.
pub fn sequence_by_deliverer(
    deliveries: Vec<Delivery>,
    options: &RouteOptions,
) -> Result<Vec<DelivererRoute>> {
    let now = Instant::now();
    let total = deliveries.len();
    let (located, unlocated) = partition_by_coordinates(deliveries);
    if options.strict {
        validate_located(&located)?;
    }

    let mut groups: BTreeMap<Option<u64>, (Vec<RouteStop>, Vec<Delivery>)> = BTreeMap::new();
    for stop in located {
        groups
            .entry(stop.delivery.deliverer_id)
            .or_default()
            .0
            .push(stop);
    }
    for delivery in unlocated {
        groups
            .entry(delivery.deliverer_id)
            .or_default()
            .1
            .push(delivery);
    }

    log::info!("batch: start deliveries={total} groups={}", groups.len());

    let groups: Vec<_> = groups.into_iter().collect();
    let routes = groups
        .into_par_iter()
        .map(|(deliverer_id, (stops, unlocated))| {
            build_route(deliverer_id, stops, unlocated, options)
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "batch: complete groups={} secs={:.3}",
        routes.len(),
        now.elapsed().as_secs_f32()
    );
    Ok(routes)
}

fn build_route(
    deliverer_id: Option<u64>,
    stops: Vec<RouteStop>,
    unlocated: Vec<Delivery>,
    options: &RouteOptions,
) -> Result<DelivererRoute> {
    let route = plan_route(stops, options)?;

    log::debug!(
        "batch.group: deliverer={} stops={} unlocated={}",
        deliverer_label(deliverer_id),
        route.len(),
        unlocated.len()
    );
    let metrics = RouteMetrics::from_route(&route);

    Ok(DelivererRoute {
        deliverer_id,
        metrics,
        stops: number_route(route),
        unlocated,
    })
}

fn validate_located(stops: &[RouteStop]) -> Result<()> {
    for stop in stops {
        if let Some(reason) = stop.point.invalid_reason() {
            log::warn!(
                "batch: rejecting input index={} delivery={} reason={reason}",
                stop.input_index,
                stop.delivery.id
            );
            return Err(Error::invalid_stop(
                stop.input_index,
                format!(
                    "{reason} (delivery {}, deliverer {})",
                    stop.delivery.id,
                    deliverer_label(stop.delivery.deliverer_id)
                ),
            ));
        }
    }
    Ok(())
}

fn deliverer_label(deliverer_id: Option<u64>) -> String {
    deliverer_id.map_or_else(|| "unassigned".to_string(), |id| id.to_string())
}
