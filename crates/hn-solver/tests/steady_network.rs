//! Integration tests for the steady-state solver on simple chains.

use hn_core::units::{k, m, w};
use hn_equipment::{
    Equipment, FlowElement, HeatExchanger, Pipe, Pump, Tank, Valve, standards,
};
use hn_fluids::{FluidType, density};
use hn_network::{HydraulicNetwork, NetworkBuilder};
use hn_solver::{NetworkSolver, SolverError, SolverState, solve};
use proptest::prelude::*;

fn tank_at(level: f64, t: f64, fluid: FluidType) -> Equipment {
    Equipment::Tank(Tank::new(m(0.0), m(level), k(t), fluid).unwrap())
}

fn water_tank(level: f64) -> Equipment {
    tank_at(level, 293.15, FluidType::Water)
}

fn pipe(length: f64, diameter: f64) -> Pipe {
    Pipe::new(m(length), m(diameter), m(4.5e-5)).unwrap()
}

/// Tank(upper) → Pipe(100 m, 0.1 m) → Tank(lower)
fn drain(upper: f64, lower: f64) -> HydraulicNetwork {
    let mut b = NetworkBuilder::new();
    let t1 = b.add_node("t1", "Upper", water_tank(upper)).unwrap();
    let t2 = b.add_node("t2", "Lower", water_tank(lower)).unwrap();
    b.add_edge("line", t1, t2, pipe(100.0, 0.1));
    b.build().unwrap()
}

/// Tank → pipe → device → pipe → Tank
fn chain(upper: f64, device: Equipment, lower: f64, d: f64) -> HydraulicNetwork {
    let mut b = NetworkBuilder::new();
    let t1 = b.add_node("t1", "Upper", water_tank(upper)).unwrap();
    let dev = b.add_node("dev", "Device", device).unwrap();
    let t2 = b.add_node("t2", "Lower", water_tank(lower)).unwrap();
    b.add_edge("e1", t1, dev, pipe(10.0, d));
    b.add_edge("e2", dev, t2, pipe(10.0, d));
    b.build().unwrap()
}

fn assert_pressure_continuity(net: &HydraulicNetwork) {
    for edge in net.edges() {
        let src = net.node(edge.source).unwrap();
        let tgt = net.node(edge.target).unwrap();
        assert_eq!(
            edge.inlet.pressure,
            src.outlets()[edge.source_port].pressure,
            "edge {} inlet",
            edge.key
        );
        assert_eq!(
            edge.outlet.pressure,
            tgt.inlets()[edge.target_port].pressure,
            "edge {} outlet",
            edge.key
        );

        let dp = edge
            .pipe
            .pressure_drop(edge.flow(), edge.inlet.density, edge.inlet.viscosity)
            .unwrap();
        let loss = edge.inlet.pressure - edge.outlet.pressure;
        assert!((loss - dp).abs() < 1.0, "edge {}: {loss} vs {dp}", edge.key);
    }
}

#[test]
fn gravity_drain_between_tanks() {
    let mut net = drain(5.0, 2.0);
    let solution = solve(&mut net).unwrap();

    let q = solution.edge_flows[0].value;
    println!(
        "Q = {q:.5} m³/s after {} iterations (residual {:.2e})",
        solution.iterations, solution.residual_norm
    );
    assert!(q > 0.01 && q < 0.05, "Q = {q}");
    assert!((q - 0.0139).abs() < 5e-4, "Q = {q}");

    // The pipe consumes exactly the static-head difference
    let edge = &net.edges()[0];
    let dp = edge.pipe.pressure_drop(q, 1000.0, edge.inlet.viscosity).unwrap();
    assert!((dp - 1000.0 * 9.81 * 3.0).abs() < 1.0, "dp = {dp}");
    assert!(solution.residual_norm < 1e-6);

    assert_pressure_continuity(&net);
}

#[test]
fn gravity_drain_reverses() {
    let mut net = drain(2.0, 5.0);
    let solution = solve(&mut net).unwrap();
    let q = solution.edge_flows[0].value;
    assert!(q < 0.0, "Q = {q}");
    assert!((q + 0.0139).abs() < 5e-4, "Q = {q}");

    let edge = &net.edges()[0];
    assert!(edge.inlet.flow_rate < 0.0);
    assert!(edge.outlet.pressure > edge.inlet.pressure);
}

#[test]
fn equal_levels_do_not_flow() {
    let mut net = drain(3.0, 3.0);
    let solution = solve(&mut net).unwrap();
    assert!(solution.edge_flows[0].value.abs() < 1e-5);
}

/// VG46 at 40 °C, 3.5 m of head, draining into a water sump at 0.5 m.
fn oil_drain(diameter: f64) -> HydraulicNetwork {
    let oil = Tank::new(m(2.0), m(1.5), k(313.15), FluidType::IsoVg46).unwrap();
    let mut b = NetworkBuilder::new();
    let t1 = b.add_node("t1", "Oil", Equipment::Tank(oil)).unwrap();
    let t2 = b.add_node("t2", "Sump", water_tank(0.5)).unwrap();
    b.add_edge("e", t1, t2, pipe(20.0, diameter));
    b.build().unwrap()
}

#[test]
fn tank_ports_hold_static_head() {
    // Re ≈ 570, well inside the laminar branch
    let mut net = oil_drain(0.03);
    let t1 = net.node_id("t1").unwrap();
    let solution = solve(&mut net).unwrap();
    assert!(solution.edge_flows[0].value > 0.0);

    let rho = density(FluidType::IsoVg46, 313.15).unwrap();
    let expected = 101_325.0 + rho * 9.81 * (2.0 + 1.5);
    let tank = net.node(t1).unwrap();
    for port in tank.inlets().iter().chain(tank.outlets()) {
        assert!((port.pressure - expected).abs() < 1e-9);
        assert_eq!(port.fluid, FluidType::IsoVg46);
        assert_eq!(port.temperature, 313.15);
    }
    // The oil tank feeds the line, so the pipe carries oil
    let edge = &net.edges()[0];
    assert_eq!(edge.inlet.fluid, FluidType::IsoVg46);
    let re = edge
        .pipe
        .reynolds(edge.flow(), edge.inlet.density, edge.inlet.viscosity);
    assert!(re < 2300.0, "Re = {re}");
}

#[test]
fn friction_gap_fails_without_write_back() {
    // Laminar friction puts this line above Re 2300 and turbulent friction
    // puts it below, so there is no fixed point
    let mut net = oil_drain(0.05);
    let edges_before: Vec<_> = net.edges().iter().map(|e| (e.inlet, e.outlet)).collect();
    let nodes_before: Vec<_> = net
        .nodes()
        .iter()
        .map(|n| (n.inlets().to_vec(), n.outlets().to_vec()))
        .collect();

    let mut solver = NetworkSolver::new(&mut net);
    let err = solver.solve().unwrap_err();
    println!("gap case: {err}");
    match err {
        SolverError::ConvergenceFailed { residual_norm, .. } => {
            assert!(residual_norm > 0.0, "residual {residual_norm}")
        }
        other => panic!("expected a convergence failure, got {other}"),
    }
    assert_eq!(solver.state(), SolverState::Failed);

    let edges_after: Vec<_> = net.edges().iter().map(|e| (e.inlet, e.outlet)).collect();
    let nodes_after: Vec<_> = net
        .nodes()
        .iter()
        .map(|n| (n.inlets().to_vec(), n.outlets().to_vec()))
        .collect();
    assert_eq!(edges_before, edges_after);
    assert_eq!(nodes_before, nodes_after);
}

#[test]
fn pump_lifts_against_static_head() {
    let pump = Equipment::Pump(Pump::new(80.0, 0.0, -2000.0).unwrap());
    let mut b = NetworkBuilder::new();
    let sump = b.add_node("sump", "Sump", water_tank(1.0)).unwrap();
    let p = b.add_node("p1", "Pump", pump).unwrap();
    let head = b.add_node("head", "Header tank", water_tank(20.0)).unwrap();
    b.add_edge("suction", sump, p, pipe(25.0, 0.1));
    b.add_edge("discharge", p, head, pipe(25.0, 0.1));
    let mut net = b.build().unwrap();

    let solution = solve(&mut net).unwrap();
    let q = solution.edge_flows[0].value;
    println!("pump flow {q:.4} m³/s");
    assert!(q > 0.05 && q < 0.11, "Q = {q}");
    assert!((q - solution.edge_flows[1].value).abs() < 1e-6);

    let node = net.node(p).unwrap();
    let rise = node.outlets()[0].pressure - node.inlets()[0].pressure;
    let expected = 1000.0 * 9.81 * (80.0 - 2000.0 * q * q);
    assert!((rise - expected).abs() < 1.0, "rise {rise} vs {expected}");
    assert!(rise > 1000.0 * 9.81 * 19.0);
    assert_pressure_continuity(&net);
}

#[test]
fn closed_valve_still_solves() {
    let valve = Equipment::Valve(Valve::new(0.01, 0.0).unwrap());
    let mut net = chain(10.0, valve, 1.0, 0.1);
    let solution = solve(&mut net).unwrap();
    let q = solution.edge_flows[0].value;
    assert!(q > 0.0 && q < 1e-3, "Q = {q}");
}

#[test]
fn valve_reverse_flow_loses_pressure_downstream() {
    let valve = Equipment::Valve(Valve::new(0.01, 50.0).unwrap());
    let mut net = chain(2.0, valve, 5.0, 0.1);
    solve(&mut net).unwrap();

    let node = net.node_by_key("dev").unwrap();
    assert!(node.inlets()[0].flow_rate < 0.0);
    // Fluid enters through the outlet, so that side sits higher
    assert!(node.outlets()[0].pressure > node.inlets()[0].pressure);
    assert_pressure_continuity(&net);
}

#[test]
fn heat_exchanger_warms_downstream() {
    let hx = Equipment::HeatExchanger(HeatExchanger::new(w(50_000.0), 1.0e4).unwrap());
    let mut net = chain(5.0, hx, 2.0, 0.05);
    solve(&mut net).unwrap();

    let node = net.node_by_key("dev").unwrap();
    let inlet = node.inlets()[0];
    let outlet = node.outlets()[0];
    assert!(inlet.flow_rate > 0.0);
    let expected = 50_000.0 / (inlet.mass_flow() * 4180.0);
    let rise = outlet.temperature - inlet.temperature;
    println!("HX ΔT = {rise:.3} K at {:.5} m³/s", inlet.flow_rate);
    assert!((rise - expected).abs() < 1e-6, "{rise} vs {expected}");

    let downstream = net.edge_by_key("e2").unwrap();
    let upstream = net.edge_by_key("e1").unwrap();
    assert_eq!(downstream.inlet.temperature, outlet.temperature);
    assert!(downstream.inlet.viscosity < upstream.inlet.viscosity);
    assert!(downstream.inlet.density < upstream.inlet.density);
}

#[test]
fn heat_exchanger_reverse_flow_warms_upstream_side() {
    let hx = Equipment::HeatExchanger(HeatExchanger::new(w(50_000.0), 1.0e4).unwrap());
    let mut net = chain(2.0, hx, 5.0, 0.05);
    solve(&mut net).unwrap();

    let node = net.node_by_key("dev").unwrap();
    let (inlet, outlet) = (node.inlets()[0], node.outlets()[0]);
    assert!(outlet.flow_rate < 0.0);
    // Fluid arrives from the lower tank through the outlet
    assert!((outlet.temperature - 293.15).abs() < 1e-9);
    assert!(inlet.temperature > outlet.temperature + 0.5);

    let e1 = net.edge_by_key("e1").unwrap();
    assert_eq!(e1.outlet.temperature, inlet.temperature);
    // The upper tank still imposes its own state
    let t1 = net.node_by_key("t1").unwrap();
    assert_eq!(t1.outlets()[0].temperature, 293.15);
}

#[test]
fn cold_oil_flows_less() {
    let flow_at = |t: f64| {
        let mut b = NetworkBuilder::new();
        let t1 = b
            .add_node("t1", "Upper", tank_at(5.0, t, FluidType::IsoVg46))
            .unwrap();
        let t2 = b
            .add_node("t2", "Lower", tank_at(2.0, t, FluidType::IsoVg46))
            .unwrap();
        b.add_edge("e", t1, t2, pipe(10.0, 0.02));
        let mut net = b.build().unwrap();
        let solution = solve(&mut net).unwrap();
        let edge = &net.edges()[0];
        let re = edge
            .pipe
            .reynolds(edge.flow(), edge.inlet.density, edge.inlet.viscosity);
        assert!(re < 2300.0, "Re = {re}");
        solution.edge_flows[0].value
    };

    let cold = flow_at(283.15);
    let warm = flow_at(313.15);
    println!("VG46: {cold:.3e} m³/s at 10 °C, {warm:.3e} m³/s at 40 °C");
    assert!(cold > 0.0);
    assert!(warm > 2.0 * cold);
}

#[test]
fn standard_schedule_pipe() {
    let id = standards::inner_diameter("4", "40").unwrap();
    let mut b = NetworkBuilder::new();
    let t1 = b.add_node("t1", "Upper", water_tank(5.0)).unwrap();
    let t2 = b.add_node("t2", "Lower", water_tank(2.0)).unwrap();
    b.add_edge("line", t1, t2, Pipe::new(m(100.0), id, m(4.5e-5)).unwrap());
    let mut net = b.build().unwrap();
    let solution = solve(&mut net).unwrap();
    // 102.3 mm bore carries a little more than the nominal 100 mm
    assert!(solution.edge_flows[0].value > 0.0139);
}

#[test]
fn missing_tank_fails_fast() {
    let mut b = NetworkBuilder::new();
    let a = b.add_node("a", "A", Equipment::Generic).unwrap();
    let c = b
        .add_node("c", "C", Equipment::Pump(Pump::new(80.0, 0.0, -2000.0).unwrap()))
        .unwrap();
    b.add_edge("e", a, c, pipe(10.0, 0.1));
    let mut net = b.build().unwrap();

    let mut solver = NetworkSolver::new(&mut net);
    let err = solver.solve().unwrap_err();
    assert!(matches!(err, SolverError::Topology { .. }), "{err}");
    // Nothing was written back
    assert_eq!(net.edges()[0].flow(), 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn drain_balances_static_head(upper in 0.5_f64..20.0, lift in prop_oneof![-10.0_f64..-0.5, 0.5_f64..10.0]) {
        let lower = (upper + lift).max(0.0);
        prop_assume!((upper - lower).abs() >= 0.5);

        let mut net = drain(upper, lower);
        let solution = solve(&mut net).unwrap();
        let q = solution.edge_flows[0].value;
        prop_assert_eq!(q > 0.0, upper > lower);

        let edge = &net.edges()[0];
        let dp = edge.pipe.pressure_drop(q, 1000.0, edge.inlet.viscosity).unwrap();
        let head = 1000.0 * 9.81 * (upper - lower);
        prop_assert!((dp - head).abs() < 1.0, "dp {} vs head {}", dp, head);
    }
}
