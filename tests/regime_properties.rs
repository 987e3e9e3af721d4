//! Integration tests: regime formulas through the public API
//!
//! These tests check the documented properties of each regime on small
//! networks built from the public `network` types.

use approx::assert_relative_eq;
use nalgebra::DVector;
use pnm_rs::conductance::{
    compute, compute_conductance, compute_directional_weights, ConduitKeys, ConduitRegime,
    ConvectiveRegime, DiscretizationScheme, PropertyKeys, TransportRegime,
};
use pnm_rs::error::ConductanceError;
use pnm_rs::network::{Network, Phase};

mod common;
use common::{assert_vectors_close, cubic_lattice, linear_chain, water};

fn all(network: &Network) -> Vec<usize> {
    network.all_throats()
}

// =================================================================================================
// Conduit regimes
// =================================================================================================

#[test]
fn test_single_conduit_uniform_diffusion() {
    let network = linear_chain(2, 1.0, 1.0);
    let mut phase = Phase::new("air", &network);
    phase.set("pore.diffusivity", 1.0).unwrap();
    phase.set("throat.diffusivity", 1.0).unwrap();

    let regime = TransportRegime::from_tag("diffusion", &PropertyKeys::default(), None).unwrap();
    let result = compute(&network, &phase, &ConduitKeys::default(), &regime, &[0]).unwrap();

    let g = result.as_conduit().unwrap();
    assert_eq!(g.len(), 1);
    assert_relative_eq!(g[0], 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_diffusion_matches_series_formula_on_lattice() {
    let network = cubic_lattice(3, 1e-5);
    let phase = water(&network);
    let keys = PropertyKeys::default();

    let g = compute_conductance(
        &network,
        &phase,
        &keys.conduit,
        &ConduitRegime::diffusion(&keys),
        &all(&network),
    )
    .unwrap();

    let pore_area = network.require("pore.area").unwrap();
    let throat_area = network.require("throat.area").unwrap();
    let l = 1e-5 / 3.0;
    let d = 2.0e-9;
    let expected = DVector::from_fn(network.nt(), |t, _| {
        let [p1, p2] = network.throat_conns(t);
        let g1 = d * pore_area[p1] / l;
        let gt = d * throat_area[t] / l;
        let g2 = d * pore_area[p2] / l;
        1.0 / (1.0 / g1 + 1.0 / gt + 1.0 / g2)
    });
    assert_vectors_close(&g, &expected, 1e-12, "diffusive conductance");
}

#[test]
fn test_zero_length_segments_drop_out() {
    let mut network = linear_chain(3, 1.0, 1.0);
    network
        .set("throat.conduit_lengths.pore1", DVector::from_vec(vec![0.0, 1.0]))
        .unwrap();
    network
        .set("throat.conduit_lengths.pore2", DVector::from_vec(vec![1.0, 0.0]))
        .unwrap();
    let mut phase = Phase::new("air", &network);
    phase.set("throat.diffusivity", 1.0).unwrap();

    let regime = ConduitRegime::diffusion(&PropertyKeys::default());
    let g = compute_conductance(&network, &phase, &ConduitKeys::default(), &regime, &all(&network)).unwrap();
    assert_relative_eq!(g[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(g[1], 0.5, epsilon = 1e-12);
}

#[test]
fn test_ionic_is_independent_of_diffusivity() {
    let network = cubic_lattice(3, 1e-5);
    let mut phase = water(&network);
    let regime = ConduitRegime::Ionic;

    let before = compute_conductance(&network, &phase, &ConduitKeys::default(), &regime, &all(&network)).unwrap();
    phase.set("pore.diffusivity", 5.0).unwrap();
    phase.set("throat.diffusivity", 0.1).unwrap();
    let after = compute_conductance(&network, &phase, &ConduitKeys::default(), &regime, &all(&network)).unwrap();

    assert_eq!(before, after);
    assert!(before.iter().all(|g| g.is_finite() && *g > 0.0));
}

#[test]
fn test_interpolated_throat_diffusivity_is_pore_mean() {
    let network = linear_chain(3, 1.0, 1.0);
    let mut pore_only = Phase::new("air", &network);
    pore_only
        .set("pore.diffusivity", DVector::from_vec(vec![1.0, 3.0, 5.0]))
        .unwrap();
    let mut explicit = pore_only.clone();
    explicit
        .set("throat.diffusivity", DVector::from_vec(vec![2.0, 4.0]))
        .unwrap();

    let regime = ConduitRegime::diffusion(&PropertyKeys::default());
    let a = compute_conductance(&network, &pore_only, &ConduitKeys::default(), &regime, &[0, 1]).unwrap();
    let b = compute_conductance(&network, &explicit, &ConduitKeys::default(), &regime, &[0, 1]).unwrap();
    assert_vectors_close(&a, &b, 1e-14, "interpolated vs explicit");
}

#[test]
fn test_missing_property_aborts_whole_call() {
    let network = linear_chain(3, 1.0, 1.0);
    let phase = Phase::new("air", &network);

    let err = compute_conductance(
        &network,
        &phase,
        &ConduitKeys::default(),
        &ConduitRegime::diffusion(&PropertyKeys::default()),
        &[0, 1],
    )
    .unwrap_err();
    assert!(matches!(err, ConductanceError::PropertyNotFound { .. }));
}

#[test]
fn test_custom_property_names() {
    let network = linear_chain(2, 1.0, 1.0);
    let mut phase = Phase::new("solid", &network);
    phase.set("pore.thermal_conductivity", 3.0).unwrap();

    let keys = PropertyKeys::default()
        .with_diffusivity("pore.thermal_conductivity", "throat.thermal_conductivity");
    let g = compute_conductance(&network, &phase, &keys.conduit, &ConduitRegime::diffusion(&keys), &[0]).unwrap();
    assert_relative_eq!(g[0], 1.0, epsilon = 1e-12);
}

#[test]
fn test_power_law_leaves_phase_unchanged() {
    let network = linear_chain(4, 1e-10, 1e-5);
    let mut phase = Phase::new("polymer", &network);
    phase.set("pore.consistency", 0.5).unwrap();
    phase.set("pore.flow_index", 0.7).unwrap();
    let keys_before = phase.store().keys().iter().map(|k| k.to_string()).collect::<Vec<_>>();

    let regime = ConduitRegime::flow_power_law(&PropertyKeys::default());
    let g = compute_conductance(&network, &phase, &ConduitKeys::default(), &regime, &all(&network)).unwrap();

    assert!(g.iter().all(|v| v.is_finite() && *v > 0.0));
    let keys_after = phase.store().keys().iter().map(|k| k.to_string()).collect::<Vec<_>>();
    assert_eq!(keys_before, keys_after);
}

// =================================================================================================
// Convective regimes
// =================================================================================================

fn convective_phase(network: &Network) -> Phase {
    let mut phase = water(network);
    phase.set("throat.hydraulic_conductance", 1e-12).unwrap();
    phase.set("throat.diffusive_conductance", 1e-13).unwrap();
    phase.set("throat.valence", 0.0).unwrap();
    phase.set("pore.potential", DVector::from_fn(network.np(), |p, _| 0.01 * p as f64)).unwrap();
    phase
}

#[test]
fn test_upwind_without_flux_is_diffusive_conductance() {
    let network = linear_chain(4, 1.0, 1.0);
    let mut phase = convective_phase(&network);
    phase.set("pore.pressure", 0.0).unwrap();

    let regime = ConvectiveRegime::dispersion(&PropertyKeys::default(), DiscretizationScheme::Upwind);
    let w = compute_directional_weights(&network, &phase, &ConduitKeys::default(), &regime, &all(&network)).unwrap();
    assert_eq!(w.shape(), (3, 2));
    assert!(w.iter().all(|&v| v == 1e-13));
}

#[test]
fn test_exponential_finite_near_zero_flux() {
    let network = linear_chain(4, 1.0, 1.0);
    let mut phase = convective_phase(&network);
    phase
        .set("pore.pressure", DVector::from_vec(vec![1e-20, 0.0, 0.0, -1e-20]))
        .unwrap();

    let regime = ConvectiveRegime::dispersion(&PropertyKeys::default(), DiscretizationScheme::Exponential);
    let w = compute_directional_weights(&network, &phase, &ConduitKeys::default(), &regime, &all(&network)).unwrap();
    assert!(w.iter().all(|v| v.is_finite()));
}

#[test]
fn test_ad_dif_mig_without_valence_reduces_to_dispersion() {
    let network = cubic_lattice(3, 1e-5);
    let phase = convective_phase(&network);
    let keys = PropertyKeys::default();

    for scheme in DiscretizationScheme::ALL {
        let dispersion = compute_directional_weights(
            &network,
            &phase,
            &keys.conduit,
            &ConvectiveRegime::dispersion(&keys, scheme),
            &all(&network),
        )
        .unwrap();
        let migration = compute_directional_weights(
            &network,
            &phase,
            &keys.conduit,
            &ConvectiveRegime::ad_dif_mig(&keys, scheme),
            &all(&network),
        )
        .unwrap();
        assert_eq!(dispersion, migration, "scheme {scheme}");
    }
}

#[test]
fn test_directional_weights_swap_with_flow_direction() {
    let network = linear_chain(2, 1.0, 1.0);
    let mut forward = convective_phase(&network);
    forward.set("pore.pressure", DVector::from_vec(vec![1.0, 0.0])).unwrap();
    let mut backward = forward.clone();
    backward.set("pore.pressure", DVector::from_vec(vec![0.0, 1.0])).unwrap();

    let regime = ConvectiveRegime::dispersion(&PropertyKeys::default(), DiscretizationScheme::PowerLaw);
    let a = compute_directional_weights(&network, &forward, &ConduitKeys::default(), &regime, &[0]).unwrap();
    let b = compute_directional_weights(&network, &backward, &ConduitKeys::default(), &regime, &[0]).unwrap();
    assert_relative_eq!(a[(0, 0)], b[(0, 1)]);
    assert_relative_eq!(a[(0, 1)], b[(0, 0)]);
}

// =================================================================================================
// Tag boundary
// =================================================================================================

#[test]
fn test_unknown_regime_tag() {
    let err = TransportRegime::from_tag("bogus", &PropertyKeys::default(), Some("upwind")).unwrap_err();
    assert_eq!(err, ConductanceError::UnsupportedRegime("bogus".to_string()));
}

#[test]
fn test_unknown_scheme_tag() {
    for tag in ["dispersion", "ad_dif_mig"] {
        let err = TransportRegime::from_tag(tag, &PropertyKeys::default(), Some("central")).unwrap_err();
        assert_eq!(err, ConductanceError::UnsupportedScheme("central".to_string()));
    }
}

#[test]
fn test_convective_tag_requires_scheme() {
    let err = TransportRegime::from_tag("dispersion", &PropertyKeys::default(), None).unwrap_err();
    assert_eq!(err, ConductanceError::MissingParameter("s_scheme"));
}

#[test]
fn test_out_of_range_throat() {
    let network = linear_chain(3, 1.0, 1.0);
    let phase = water(&network);
    let regime = TransportRegime::from_tag("ionic", &PropertyKeys::default(), None).unwrap();
    let err = compute(&network, &phase, &ConduitKeys::default(), &regime, &[0, 5]).unwrap_err();
    assert_eq!(err, ConductanceError::ThroatOutOfRange { throat: 5, nt: 2 });
}

#[test]
fn test_pressure_key_with_throat_prefix() {
    let network = linear_chain(3, 1.0, 1.0);
    let mut phase = convective_phase(&network);
    phase.set("throat.pressure", 1.0).unwrap();

    let keys = PropertyKeys::default().with_pore_pressure("throat.pressure");
    let regime = TransportRegime::from_tag("dispersion", &keys, Some("upwind")).unwrap();
    let err = compute(&network, &phase, &ConduitKeys::default(), &regime, &[0, 1]).unwrap_err();
    assert_eq!(err, ConductanceError::InvalidPropertyName("throat.pressure".to_string()));
}
