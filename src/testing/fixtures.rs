//! Seeded synthetic node samples.

use crate::core::{Membership, NodeSampleRecord, OwnedNodeSample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `n` (at least 2) right-censored observations with integer times in
/// `1..=12`, so ties are common, and event codes in `1..=event_type_size`.
///
/// Both daughters are non-empty and the node has at least two distinct
/// event times.
pub fn synthetic_survival(seed: u64, n: usize, event_type_size: usize) -> OwnedNodeSample {
    let n = n.max(2);
    let types = event_type_size.max(1) as u32;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut membership = Vec::with_capacity(n);
    let mut time = Vec::with_capacity(n);
    let mut event = Vec::with_capacity(n);
    for i in 0..n {
        let (side, t, code) = match i {
            0 => (Membership::Left, 1.0, 1),
            1 => (Membership::Right, 2.0, 1),
            _ => {
                let side = if rng.random::<bool>() {
                    Membership::Left
                } else {
                    Membership::Right
                };
                let t = rng.random_range(1..=12) as f64;
                let code = if rng.random::<f64>() < 0.75 {
                    rng.random_range(1..=types)
                } else {
                    0
                };
                (side, t, code)
            }
        };
        membership.push(side);
        time.push(t);
        event.push(code);
    }

    let record = NodeSampleRecord {
        membership,
        time: Some(time),
        event: Some(event),
        event_type_size: Some(types as usize),
        ..Default::default()
    };
    OwnedNodeSample::try_from(record).expect("synthetic survival sample is well formed")
}

/// `side_size` LEFT and `side_size` RIGHT observations (interleaved) with a
/// `dim_x + dim_y + 1` row feature block laid out for the canonical
/// correlation statistic.
///
/// Within a daughter each `Y` row is `coupling * X[j % dim_x] + (1 - coupling) * noise`.
pub fn cca_sample(
    seed: u64,
    side_size: usize,
    dim_x: usize,
    dim_y: usize,
    left_coupling: f64,
    right_coupling: f64,
) -> OwnedNodeSample {
    let n = 2 * side_size;
    let mut rng = StdRng::seed_from_u64(seed);
    let membership: Vec<Membership> = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                Membership::Left
            } else {
                Membership::Right
            }
        })
        .collect();

    let x: Vec<Vec<f64>> = (0..dim_x)
        .map(|_| (0..n).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect();
    let mut features = x.clone();
    for j in 0..dim_y {
        let row = (0..n)
            .map(|i| {
                let coupling = if membership[i].is_left() {
                    left_coupling
                } else {
                    right_coupling
                };
                let noise: f64 = rng.random_range(-1.0..1.0);
                let signal = if dim_x == 0 { 0.0 } else { x[j % dim_x][i] };
                coupling * signal + (1.0 - coupling) * noise
            })
            .collect();
        features.push(row);
    }
    features.push(vec![dim_x as f64; n]);

    let record = NodeSampleRecord {
        membership,
        features: Some(features),
        ..Default::default()
    };
    OwnedNodeSample::try_from(record).expect("synthetic feature sample is well formed")
}
