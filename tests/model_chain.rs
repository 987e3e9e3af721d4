//! Integration tests: pore-scale models chained on a phase
//!
//! Hydraulic conductance → diffusive conductance → advection-diffusion
//! weights, each model reading what the previous one stored.

use approx::assert_relative_eq;
use nalgebra::DVector;
use pnm_rs::conductance::{
    compute_conductance, ConduitKeys, ConduitRegime, GenericConductance, PoreScaleModel,
    PropertyKeys, TransportRegime, THROAT_VISCOSITY_EFF,
};
use pnm_rs::error::ConductanceError;
use pnm_rs::execution::{parallel_threshold, set_parallel_threshold};
use pnm_rs::network::{Network, Phase};

mod common;
use common::{assert_vectors_close, cubic_lattice, linear_chain, water};

fn hydraulic_keys() -> PropertyKeys {
    PropertyKeys::default().with_diffusivity("pore.viscosity", "throat.viscosity")
}

fn conductance_models(scheme: &str) -> Vec<GenericConductance> {
    let keys = PropertyKeys::default();
    vec![
        GenericConductance::new(
            "throat.hydraulic_conductance",
            ConduitRegime::flow(&hydraulic_keys()).into(),
        ),
        GenericConductance::new(
            "throat.diffusive_conductance",
            TransportRegime::from_tag("diffusion", &keys, None).unwrap(),
        ),
        GenericConductance::new(
            "throat.ad_dif_conductance",
            TransportRegime::from_tag("dispersion", &keys, Some(scheme)).unwrap(),
        ),
    ]
}

fn run(network: &Network, phase: &mut Phase, models: &[GenericConductance]) {
    for model in models {
        phase.apply_model(network, model).unwrap();
    }
}

#[test]
fn test_chain_stores_every_output() {
    let network = cubic_lattice(3, 1e-5);
    let mut phase = water(&network);
    run(&network, &mut phase, &conductance_models("upwind"));

    let gh = phase.get("throat.hydraulic_conductance").unwrap();
    let gd = phase.get("throat.diffusive_conductance").unwrap();
    assert_eq!(gh.len(), network.nt());
    assert!(gh.iter().chain(gd.iter()).all(|g| g.is_finite() && *g > 0.0));

    let weights = phase
        .get_data("throat.ad_dif_conductance")
        .and_then(|data| data.try_as_matrix())
        .unwrap();
    assert_eq!(weights.shape(), (network.nt(), 2));
}

#[test]
fn test_upwind_weights_bracket_diffusive_conductance() {
    let network = linear_chain(5, 1e-10, 1e-5);
    let mut phase = water(&network);
    run(&network, &mut phase, &conductance_models("upwind"));

    let gd = phase.get("throat.diffusive_conductance").unwrap();
    let weights = phase
        .get_data("throat.ad_dif_conductance")
        .and_then(|data| data.try_as_matrix())
        .cloned()
        .unwrap();

    // Pressure decreases along the chain: flow goes from pore 1 to pore 2,
    // so only the reverse column carries the advective term
    for t in 0..network.nt() {
        assert_relative_eq!(weights[(t, 0)], gd[t], max_relative = 1e-12);
        assert!(weights[(t, 1)] > gd[t]);
    }
}

#[test]
fn test_model_matches_direct_computation() {
    let network = cubic_lattice(3, 1e-5);
    let mut phase = water(&network);
    let keys = PropertyKeys::default();

    let direct = compute_conductance(
        &network,
        &phase,
        &ConduitKeys::default(),
        &ConduitRegime::diffusion(&keys),
        &network.all_throats(),
    )
    .unwrap();

    let model = GenericConductance::new(
        "throat.diffusive_conductance",
        ConduitRegime::diffusion(&keys).into(),
    );
    phase.apply_model(&network, &model).unwrap();
    assert_eq!(phase.get("throat.diffusive_conductance").unwrap(), direct);
}

#[test]
fn test_subset_model_fills_untargeted_with_nan() {
    let network = linear_chain(5, 1.0, 1.0);
    let mut phase = water(&network);
    let model = GenericConductance::new(
        "throat.diffusive_conductance",
        ConduitRegime::diffusion(&PropertyKeys::default()).into(),
    )
    .with_throats(vec![1, 3]);
    phase.apply_model(&network, &model).unwrap();

    let g = phase.get("throat.diffusive_conductance").unwrap();
    assert!(g[0].is_nan() && g[2].is_nan());
    assert!(g[1].is_finite() && g[3].is_finite());
}

#[test]
fn test_subset_model_updates_existing_array() {
    let network = linear_chain(4, 1.0, 1.0);
    let mut phase = water(&network);
    phase
        .set("throat.diffusive_conductance", DVector::from_element(3, -1.0))
        .unwrap();

    let model = GenericConductance::new(
        "throat.diffusive_conductance",
        ConduitRegime::diffusion(&PropertyKeys::default()).into(),
    )
    .with_throats(vec![2]);
    phase.apply_model(&network, &model).unwrap();

    let g = phase.get("throat.diffusive_conductance").unwrap();
    assert_eq!(g[0], -1.0);
    assert_eq!(g[1], -1.0);
    assert_relative_eq!(g[2], 2.0e-9 / 3.0, max_relative = 1e-12);
}

#[test]
fn test_power_law_model_reports_viscosity() {
    let network = linear_chain(4, 1e-10, 1e-5);
    let mut phase = water(&network);
    phase.set("pore.consistency", 8.9e-4).unwrap();
    phase.set("pore.flow_index", 1.0).unwrap();

    let model = GenericConductance::new(
        "throat.hydraulic_conductance",
        ConduitRegime::flow_power_law(&PropertyKeys::default()).into(),
    );
    assert_eq!(model.name(), "flow_power_law");
    phase.apply_model(&network, &model).unwrap();

    // n = 1: Newtonian, apparent viscosity equals consistency and the
    // conductance equals Hagen-Poiseuille with the same viscosity
    let mu = phase.get(THROAT_VISCOSITY_EFF).unwrap();
    assert!(mu.iter().all(|&v| (v - 8.9e-4).abs() < 1e-15));

    let newtonian = compute_conductance(
        &network,
        &phase,
        &ConduitKeys::default(),
        &ConduitRegime::flow(&hydraulic_keys()),
        &network.all_throats(),
    )
    .unwrap();
    assert_vectors_close(
        &phase.get("throat.hydraulic_conductance").unwrap(),
        &newtonian,
        1e-12,
        "power law n = 1",
    );
}

#[test]
fn test_dispersion_before_hydraulic_fails() {
    let network = linear_chain(3, 1.0, 1.0);
    let mut phase = water(&network);
    let models = conductance_models("hybrid");

    let err = phase.apply_model(&network, &models[2]).unwrap_err();
    assert_eq!(err, ConductanceError::property_not_found("throat.hydraulic_conductance"));
}

#[test]
fn test_results_independent_of_parallel_threshold() {
    let network = cubic_lattice(6, 1e-5);
    let models = conductance_models("exponential");

    let mut sequential = water(&network);
    run(&network, &mut sequential, &models);

    let previous = parallel_threshold();
    set_parallel_threshold(1);
    let mut parallel = water(&network);
    run(&network, &mut parallel, &models);
    set_parallel_threshold(previous);

    for name in ["throat.hydraulic_conductance", "throat.diffusive_conductance"] {
        assert_eq!(sequential.get(name), parallel.get(name), "{name}");
    }
    assert_eq!(
        sequential.get_data("throat.ad_dif_conductance"),
        parallel.get_data("throat.ad_dif_conductance")
    );
}
