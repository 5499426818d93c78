//! Integration tests for hn-equipment with temperature-dependent fluids.

use std::sync::Arc;

use hn_core::NodeId;
use hn_core::units::{k, m, w};
use hn_equipment::{
    Equipment, Filter, FlowElement, GlobalSettings, HeatExchanger, HydraulicNode, Mixer, Orifice,
    Pipe, Pump, Tank, Valve, standards,
};
use hn_fluids::{FluidType, properties};
use proptest::prelude::*;

fn resistive_devices() -> Vec<Equipment> {
    vec![
        Equipment::Pipe(Pipe::new(m(50.0), m(0.08), m(4.5e-5)).unwrap()),
        Equipment::Valve(Valve::new(0.05, 40.0).unwrap()),
        Equipment::Orifice(Orifice::new(m(0.1), m(0.07)).unwrap()),
        Equipment::Filter(Filter::new(1e6, 1.5).unwrap()),
        Equipment::HeatExchanger(HeatExchanger::new(w(10_000.0), 0.01).unwrap()),
    ]
}

#[test]
fn pipe_drop_for_standard_schedule_40() {
    let id = standards::inner_diameter("4", "40").unwrap();
    let pipe = Pipe::new(m(100.0), id, m(4.5e-5)).unwrap();
    let water = properties(FluidType::Water, 293.15).unwrap();

    let dp = pipe
        .pressure_drop(0.014, water.density, water.viscosity)
        .unwrap();
    println!("4\" sch 40, 100 m, 14 L/s: Δp = {dp:.0} Pa");
    assert!(dp > 20_000.0 && dp < 40_000.0);
}

#[test]
fn cold_oil_pipe_is_laminar_and_lossier() {
    let pipe = Pipe::new(m(20.0), m(0.05), m(4.5e-5)).unwrap();
    let cold = properties(FluidType::IsoVg46, 283.15).unwrap();
    let warm = properties(FluidType::IsoVg46, 333.15).unwrap();
    let q = 0.002;

    assert!(pipe.reynolds(q, cold.density, cold.viscosity) < 2300.0);
    let dp_cold = pipe.pressure_drop(q, cold.density, cold.viscosity).unwrap();
    let dp_warm = pipe.pressure_drop(q, warm.density, warm.viscosity).unwrap();
    assert!(dp_cold > dp_warm, "cold {dp_cold} vs warm {dp_warm}");
}

#[test]
fn mixer_node_blends_two_tanks() {
    let settings = Arc::new(GlobalSettings::default());
    let mut node = HydraulicNode::new(
        NodeId::from_index(0),
        "mix",
        "Mixer",
        Equipment::Mixer(Mixer::default()),
        settings,
    )
    .unwrap();

    let hot = Tank::new(m(0.0), m(1.0), k(353.15), FluidType::Water).unwrap();
    let cold = Tank::new(m(0.0), m(1.0), k(283.15), FluidType::Water).unwrap();

    let inlets = node.inlets_mut();
    inlets[0] = hot.boundary_port(101_325.0).unwrap();
    inlets[0].flow_rate = 0.02;
    inlets[1] = cold.boundary_port(101_325.0).unwrap();
    inlets[1].flow_rate = 0.02;

    node.calculate().unwrap();

    let (a, b) = (&node.inlets()[0], &node.inlets()[1]);
    let expected =
        (a.mass_flow() * a.temperature + b.mass_flow() * b.temperature) / (a.mass_flow() + b.mass_flow());
    let out = &node.outlets()[0];
    assert!((out.temperature - expected).abs() < 0.1);
    assert!((out.flow_rate - 0.04).abs() < 1e-15);
    assert_eq!(out.pressure, node.inlets()[0].pressure);
}

#[test]
fn pump_against_static_head() {
    let pump = Pump::new(80.0, 0.0, -2000.0).unwrap();
    // Head balances a 60 m lift at Q = 0.1 m³/s
    let rise = -pump.pressure_drop(0.1, 1000.0, 1e-3).unwrap();
    assert!((rise - 1000.0 * 9.81 * 60.0).abs() < 1e-6);
}

proptest! {
    #[test]
    fn resistive_losses_are_odd_and_dissipative(q in 1e-5_f64..0.2_f64) {
        let water = properties(FluidType::Water, 293.15).unwrap();
        for device in resistive_devices() {
            let fwd = device.pressure_drop(q, water.density, water.viscosity).unwrap();
            let rev = device.pressure_drop(-q, water.density, water.viscosity).unwrap();
            prop_assert!(fwd > 0.0, "{:?} fwd {}", device.kind(), fwd);
            prop_assert!((fwd + rev).abs() <= 1e-9 * fwd.abs().max(1.0));
        }
    }

    #[test]
    fn losses_grow_with_flow(q in 1e-4_f64..0.1_f64, factor in 1.1_f64..3.0_f64) {
        let water = properties(FluidType::Water, 293.15).unwrap();
        for device in resistive_devices() {
            let low = device.pressure_drop(q, water.density, water.viscosity).unwrap();
            let high = device.pressure_drop(q * factor, water.density, water.viscosity).unwrap();
            prop_assert!(high > low, "{:?}", device.kind());
        }
    }

    #[test]
    fn narrower_bore_always_lossier(bore_mm in 20.0_f64..90.0_f64, shrink in 1.0_f64..10.0_f64) {
        let wide = Orifice::new(m(0.1), m(bore_mm / 1000.0)).unwrap();
        let narrow = Orifice::new(m(0.1), m((bore_mm - shrink) / 1000.0)).unwrap();
        let a = wide.pressure_drop(0.01, 1000.0, 1e-3).unwrap();
        let b = narrow.pressure_drop(0.01, 1000.0, 1e-3).unwrap();
        prop_assert!(b > a);
    }
}
