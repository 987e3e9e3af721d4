//! Advection-Diffusion Weights Along a Pore Chain
//!
//! Builds a 1-D chain of pores, imposes a linear pressure drop, then chains
//! three conductance models:
//!
//! hydraulic (flow) → diffusive (diffusion) → advection-diffusion (dispersion)
//!
//! and prints the directional weights of every discretization scheme.

use nalgebra::DVector;
use pnm_rs::{
    conductance::{
        ConduitKeys, ConduitRegime, DiscretizationScheme, GenericConductance, ModelOutput,
        PoreScaleModel, PropertyKeys, TransportRegime,
    },
    error::ConductanceResult,
    network::{Network, Phase},
};
use std::error::Error;

/// Linear pressure profile between two fixed end pressures
struct LinearPressure {
    inlet: f64,
    outlet: f64,
}

impl PoreScaleModel for LinearPressure {
    fn name(&self) -> &str {
        "linear_pressure"
    }

    fn propname(&self) -> &str {
        "pore.pressure"
    }

    fn regenerate(&self, network: &Network, _phase: &Phase) -> ConductanceResult<ModelOutput> {
        let last = (network.np() - 1).max(1) as f64;
        let pressure = DVector::from_fn(network.np(), |p, _| {
            self.inlet + (self.outlet - self.inlet) * p as f64 / last
        });
        Ok(ModelOutput::new(None).with(self.propname(), pressure))
    }
}

fn chain(n_pores: usize, spacing: f64, radius: f64) -> ConductanceResult<Network> {
    let conns = (0..n_pores - 1).map(|p| [p, p + 1]).collect();
    let mut network = Network::new(n_pores, conns)?;

    let pore_area = std::f64::consts::PI * radius * radius;
    network.set("pore.area", pore_area)?;
    network.set("throat.area", 0.5 * pore_area)?;

    // Half pore, throat, half pore
    let [l1, lt, l2] = ConduitKeys::default().length_keys();
    network.set(&l1, 0.25 * spacing)?;
    network.set(&lt, 0.5 * spacing)?;
    network.set(&l2, 0.25 * spacing)?;
    Ok(network)
}

fn main() -> Result<(), Box<dyn Error>> {
    let network = chain(6, 1.0e-4, 2.0e-5)?;

    let mut water = Phase::new("water", &network);
    water.set("pore.viscosity", 1.0e-3)?;
    water.set("pore.diffusivity", 1.0e-9)?;
    water.apply_model(&network, &LinearPressure { inlet: 2.0, outlet: 0.0 })?;

    let keys = PropertyKeys::default();
    let hydraulic_keys = keys.clone().with_diffusivity("pore.viscosity", "throat.viscosity");
    water.apply_model(
        &network,
        &GenericConductance::new(
            "throat.hydraulic_conductance",
            ConduitRegime::flow(&hydraulic_keys).into(),
        ),
    )?;
    water.apply_model(
        &network,
        &GenericConductance::new(
            "throat.diffusive_conductance",
            TransportRegime::from_tag("diffusion", &keys, None)?,
        ),
    )?;

    let gh = water.require("throat.hydraulic_conductance")?;
    let gd = water.require("throat.diffusive_conductance")?;
    println!("Throat   g_hydraulic      g_diffusive");
    for t in 0..network.nt() {
        println!("{t:>6}   {:>12.4e}   {:>12.4e}", gh[t], gd[t]);
    }

    for scheme in DiscretizationScheme::ALL {
        let propname = format!("throat.ad_dif_conductance_{scheme}");
        let model = GenericConductance::new(
            propname.as_str(),
            TransportRegime::from_tag("dispersion", &keys, Some(scheme.as_str()))?,
        );
        water.apply_model(&network, &model)?;

        let weights = water
            .get_data(&propname)
            .and_then(|data| data.try_as_matrix())
            .ok_or("dispersion weights were not stored")?;
        println!("\n{scheme}: forward / backward");
        for t in 0..network.nt() {
            println!("{t:>6}   {:>12.4e}   {:>12.4e}", weights[(t, 0)], weights[(t, 1)]);
        }
    }

    Ok(())
}
