//! Network and phase builders for integration tests

use nalgebra::DVector;
use pnm_rs::conductance::ConduitKeys;
use pnm_rs::network::{Network, Phase};

/// Pores in a row, `0 - 1 - ... - (np-1)`, with uniform geometry
///
/// Every pore and throat has area `area`; every conduit segment has length
/// `segment_length`.
pub fn linear_chain(np: usize, area: f64, segment_length: f64) -> Network {
    let conns = (0..np - 1).map(|p| [p, p + 1]).collect();
    let mut network = Network::new(np, conns).unwrap();
    network.set("pore.area", area).unwrap();
    network.set("throat.area", area).unwrap();
    for key in ConduitKeys::default().length_keys() {
        network.set(&key, segment_length).unwrap();
    }
    network
}

/// `n × n × n` simple cubic lattice with spacing `spacing`
///
/// Pore areas vary smoothly with the pore index so conduits are not all
/// identical; each half pore and the throat take a third of the spacing.
pub fn cubic_lattice(n: usize, spacing: f64) -> Network {
    let index = |x: usize, y: usize, z: usize| x + n * (y + n * z);
    let mut conns = Vec::new();
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                if x + 1 < n {
                    conns.push([index(x, y, z), index(x + 1, y, z)]);
                }
                if y + 1 < n {
                    conns.push([index(x, y, z), index(x, y + 1, z)]);
                }
                if z + 1 < n {
                    conns.push([index(x, y, z), index(x, y, z + 1)]);
                }
            }
        }
    }

    let np = n * n * n;
    let nt = conns.len();
    let mut network = Network::new(np, conns).unwrap();
    let base = spacing * spacing * 0.25;
    network
        .set("pore.area", DVector::from_fn(np, |p, _| base * (1.0 + 0.1 * (p % 7) as f64)))
        .unwrap();
    network
        .set("throat.area", DVector::from_fn(nt, |t, _| 0.5 * base * (1.0 + 0.05 * (t % 5) as f64)))
        .unwrap();
    for key in ConduitKeys::default().length_keys() {
        network.set(&key, spacing / 3.0).unwrap();
    }
    network
}

/// Water at 298 K with a linear pressure drop from the first pore to the last
pub fn water(network: &Network) -> Phase {
    let np = network.np();
    let mut phase = Phase::new("water", network);
    phase.set("pore.temperature", 298.0).unwrap();
    phase.set("pore.viscosity", 8.9e-4).unwrap();
    phase.set("pore.diffusivity", 2.0e-9).unwrap();
    phase
        .set(
            "pore.pressure",
            DVector::from_fn(np, |p, _| 101_325.0 * (1.0 - p as f64 / (np - 1).max(1) as f64)),
        )
        .unwrap();
    phase
}
