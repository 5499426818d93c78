//! Snapshot serialization and queries.

use hn_app::{
    Session, TelemetrySnapshot, compile_project, edge_value, list_edge_keys, list_node_keys,
    node_value,
};
use hn_fluids::FluidType;
use hn_project::schema::{EdgeDef, NodeDef, NodeKind, PipeDef, Project};

fn heated_line() -> Project {
    let mut project = Project::new("Heated line");
    project.nodes = vec![
        NodeDef::new(
            "t1",
            "Supply",
            NodeKind::Tank {
                elevation_m: 0.0,
                level_m: 5.0,
                temperature_k: None,
                fluid: None,
            },
        ),
        NodeDef::new(
            "hx",
            "Heater",
            NodeKind::HeatExchanger {
                duty_w: 50_000.0,
                k_factor: 1.0e4,
            },
        ),
        NodeDef::new(
            "t2",
            "Return",
            NodeKind::Tank {
                elevation_m: 0.0,
                level_m: 2.0,
                temperature_k: None,
                fluid: None,
            },
        ),
    ];
    project.edges = vec![
        EdgeDef::new("e1", "t1", "hx").with_pipe(PipeDef::with_diameter(10.0, 0.05)),
        EdgeDef::new("e2", "hx", "t2").with_pipe(PipeDef::with_diameter(10.0, 0.05)),
    ];
    project
}

fn solved() -> TelemetrySnapshot {
    let mut session = Session::new();
    session.replace_network(compile_project(&heated_line()).unwrap());
    session.solve().unwrap()
}

#[test]
fn snapshot_lists_everything() {
    let snapshot = solved();
    assert_eq!(list_node_keys(&snapshot), vec!["t1", "hx", "t2"]);
    assert_eq!(list_edge_keys(&snapshot), vec!["e1", "e2"]);

    let hx = snapshot.node("hx").unwrap();
    assert_eq!(hx.kind, "heat_exchanger");
    assert_eq!(hx.name, "Heater");
    assert_eq!(hx.inlets[0].fluid, FluidType::Water);

    let e2 = snapshot.edge("e2").unwrap();
    assert_eq!((e2.from.as_str(), e2.to.as_str()), ("hx", "t2"));
    assert!(e2.reynolds > 2300.0);
    assert!(snapshot.residual_norm < 1e-6);
}

#[test]
fn heater_outlet_reads_hotter() {
    let snapshot = solved();
    let t_in = node_value(&snapshot, "hx", "temperature").unwrap();
    let t_out = node_value(&snapshot, "hx", "outlet.temperature").unwrap();
    println!("heater: {:.2} °C → {:.2} °C", t_in - 273.15, t_out - 273.15);
    assert!((t_in - 293.15).abs() < 1e-9);
    assert!(t_out > t_in + 1.0);

    let mdot = edge_value(&snapshot, "e1", "mass_flow").unwrap();
    assert!(((t_out - t_in) - 50_000.0 / (mdot * 4180.0)).abs() < 1e-3);
    assert!(edge_value(&snapshot, "e2", "temperature").unwrap() > t_in);
}

#[test]
fn unknown_variables_rejected() {
    let snapshot = solved();
    assert!(node_value(&snapshot, "hx", "enthalpy").is_err());
    assert!(node_value(&snapshot, "nope", "pressure").is_err());
    assert!(edge_value(&snapshot, "e1", "entropy").is_err());
}

#[test]
fn snapshot_json_roundtrip() {
    let snapshot = solved();
    let json = snapshot.to_json().unwrap();
    assert!(json.contains("\"pressure_pa\""));
    assert!(json.contains("\"fluid\": \"water\""));
    let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(list_node_keys(&back), list_node_keys(&snapshot));
    assert_eq!(back.iterations, snapshot.iterations);
    for (a, b) in back.edges.iter().zip(&snapshot.edges) {
        assert_eq!(a.key, b.key);
        assert!((a.flow_m3_s - b.flow_m3_s).abs() <= 1e-15 * b.flow_m3_s.abs());
        assert!((a.inlet.pressure_pa - b.inlet.pressure_pa).abs() < 1e-9);
    }
}
