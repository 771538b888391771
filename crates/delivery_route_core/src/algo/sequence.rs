//! Greedy nearest-neighbor route sequencing.
//!
//! The route always starts at the first input stop and then keeps hopping to
//! the closest stop not yet visited. Ties go to whichever candidate comes
//! first in input order.

use std::time::Instant;

use crate::{Error, Result, geo::distance::haversine_km, node::Located};

/// Visiting order for `stops` as indices into the slice.
///
/// `order[0]` is always `0` for non-empty input.
pub fn sequence_indices<T: Located>(stops: &[T]) -> Vec<usize> {
    let n = stops.len();
    if n < 2 {
        return (0..n).collect();
    }

    let now = Instant::now();
    // Unvisited indices, kept in input order so ties resolve to the earliest.
    let mut pool: Vec<usize> = (1..n).collect();
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    order.push(current);

    while !pool.is_empty() {
        let mut nearest_pos = 0;
        let mut nearest_km = f64::INFINITY;

        for (pos, &candidate) in pool.iter().enumerate() {
            let d = haversine_km(&stops[current], &stops[candidate]);
            if d < nearest_km {
                nearest_km = d;
                nearest_pos = pos;
            }
        }

        current = pool.remove(nearest_pos);
        log::trace!("sequencer.step: next={current} leg_km={nearest_km:.3}");
        order.push(current);
    }

    log::debug!(
        "sequencer: complete n={n} secs={:.4}",
        now.elapsed().as_secs_f32()
    );
    order
}

/// Reorders `stops` into a greedy nearest-neighbor route.
///
/// The result holds exactly the input values, moved, with the first input
/// stop still in front. Every stop must carry usable coordinates; see
/// [`try_sequence_route`] for a checked variant.
pub fn sequence_route<T: Located>(stops: Vec<T>) -> Vec<T> {
    if stops.len() < 2 {
        return stops;
    }
    let order = sequence_indices(&stops);
    apply_order(stops, &order)
}

/// Like [`sequence_route`], but rejects the whole call if any stop has a
/// missing, non-finite or out-of-range coordinate.
pub fn try_sequence_route<T: Located>(stops: Vec<T>) -> Result<Vec<T>> {
    validate_stops(&stops)?;
    Ok(sequence_route(stops))
}

pub(crate) fn validate_stops<T: Located>(stops: &[T]) -> Result<()> {
    for (index, stop) in stops.iter().enumerate() {
        if let Some(reason) = stop.point().invalid_reason() {
            log::warn!("sequencer: rejecting input index={index} reason={reason}");
            return Err(Error::invalid_stop(index, reason));
        }
    }
    Ok(())
}

fn apply_order<T>(stops: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = stops.into_iter().map(Some).collect();
    order.iter().filter_map(|&idx| slots[idx].take()).collect()
}
