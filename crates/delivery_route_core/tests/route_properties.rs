use std::collections::HashSet;

use delivery_route_core::{
    GeoPoint, Located, RouteMetrics, haversine_km, refine_two_opt, route_length_km,
    sequence_indices, sequence_route,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[derive(Clone, Debug, PartialEq)]
struct Parcel {
    order: usize,
    lat: f64,
    lng: f64,
}

impl Located for Parcel {
    fn latitude(&self) -> f64 {
        self.lat
    }
    fn longitude(&self) -> f64 {
        self.lng
    }
}

fn random_parcels(seed: u64, n: usize) -> Vec<Parcel> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|order| Parcel {
            order,
            lat: rng.gen_range(-23.8..-23.3),
            lng: rng.gen_range(-46.9..-46.3),
        })
        .collect()
}

fn assert_permutation(input: &[Parcel], output: &[Parcel]) {
    assert_eq!(output.len(), input.len());
    let seen: HashSet<usize> = output.iter().map(|p| p.order).collect();
    assert_eq!(seen.len(), input.len(), "duplicate stop in output");
    for parcel in output {
        assert_eq!(&input[parcel.order], parcel, "payload changed");
    }
}

#[test]
fn hundred_random_stops_form_a_valid_anchored_route() {
    let input = random_parcels(7, 100);
    let route = sequence_route(input.clone());

    assert_permutation(&input, &route);
    assert_eq!(route[0], input[0]);

    let greedy_km = route_length_km(&route);
    let naive_km = route_length_km(&input);
    assert!(greedy_km.is_finite());
    assert!(
        greedy_km <= naive_km,
        "greedy {greedy_km:.1} km vs input order {naive_km:.1} km"
    );
}

#[test]
fn several_seeds_keep_the_permutation_property() {
    for seed in 0..10 {
        let input = random_parcels(seed, 1 + seed as usize * 7);
        let route = sequence_route(input.clone());
        assert_permutation(&input, &route);
        assert_eq!(route[0], input[0]);
    }
}

#[test]
fn repeated_calls_agree() {
    let input = random_parcels(42, 64);
    assert_eq!(sequence_route(input.clone()), sequence_route(input.clone()));
    assert_eq!(sequence_indices(&input), sequence_indices(&input));
}

#[test]
fn index_order_matches_value_order() {
    let input = random_parcels(3, 40);
    let order = sequence_indices(&input);
    let route = sequence_route(input.clone());
    let from_indices: Vec<Parcel> = order.iter().map(|&i| input[i].clone()).collect();
    assert_eq!(from_indices, route);
}

#[test]
fn borrowed_stops_can_be_sequenced() {
    let input = random_parcels(11, 20);
    let borrowed: Vec<&Parcel> = input.iter().collect();
    let route = sequence_route(borrowed);
    assert_eq!(route[0].order, 0);
    assert_eq!(route.len(), input.len());
}

#[test]
fn each_step_takes_the_nearest_remaining_stop() {
    let input = random_parcels(5, 30);
    let route = sequence_route(input);
    for (i, window) in route.windows(2).enumerate() {
        let chosen = haversine_km(&window[0], &window[1]);
        for later in &route[(i + 2)..] {
            assert!(chosen <= haversine_km(&window[0], later));
        }
    }
}

#[test]
fn known_meridian_scenario() {
    let route = sequence_route(vec![
        GeoPoint::new(2.0, 0.0),
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(1.0, 0.0),
    ]);
    assert_eq!(
        route,
        vec![
            GeoPoint::new(2.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 0.0),
        ]
    );
    let metrics = RouteMetrics::from_route(&route);
    assert!((metrics.total_km - 222.39).abs() < 0.01);
}

#[test]
fn two_opt_never_lengthens_a_random_route() {
    let input = random_parcels(19, 100);
    let greedy = sequence_route(input.clone());
    let refined = refine_two_opt(greedy.clone(), 50);

    assert_permutation(&input, &refined);
    assert_eq!(refined[0], input[0]);
    assert!(route_length_km(&refined) <= route_length_km(&greedy) + 1e-9);
}
