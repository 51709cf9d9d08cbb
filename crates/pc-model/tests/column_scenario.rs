//! Integration test: one correction on a 1-D liquid/vapor column.
//!
//! Column of 10 cells on [0, 1]: liquid in cells 0-4, vapor in cells 5-9.
//! Checks the Lee relaxation signs, the superheated-liquid scenario, model
//! selection failures and repeatability of `correct()`.

use pc_config::{ConfigError, PhaseChangeProperties};
use pc_mesh::{PolyMesh, ScalarField, SerialReduction};
use pc_model::{FlowFields, PhaseChangeError, PhaseChangeModel, PhaseChangeRegistry};

const T_SAT: f64 = 373.15;
const P_SAT: f64 = 101_325.0;

const ALL_COEFFS: &str = concat!(
    "{ LeeCoeffs: { Cc: 10.0, Cv: 10.0 }, ",
    "ChoiZhangCoeffs: { Cc: 10.0, Cv: 10.0 }, ",
    "XuCoeffs: { Cc: 10.0, Cv: 10.0 }, ",
    "TanasawaCoeffs: { gamma: 0.8, R: 461.5 }, ",
    "explicitSharpCoeffs: { Cc: 10.0, Cv: 10.0 } }",
);

fn props(model: &str, coeffs: &str, hardt_wondra: bool) -> PhaseChangeProperties {
    let yaml = format!(
        r#"
saturation:
  model: constant
  t_sat: {T_SAT}
  p_sat: {P_SAT}
  h_evap: 2.26e6
phase_change:
  model: {model}
  condensation: true
  evaporation: true
  hardt_wondra: {hardt_wondra}
  coeffs: {coeffs}
mixture:
  rho1: 1.0
  rho2: 1.0
  k1: 0.6
  k2: 0.025
  cp1: 4200.0
  cp2: 2000.0
"#
    );
    pc_config::from_yaml_str(&yaml).unwrap()
}

fn lee(hardt_wondra: bool) -> PhaseChangeProperties {
    props("Lee", "{ LeeCoeffs: { Cc: 10.0, Cv: 10.0 } }", hardt_wondra)
}

struct Column {
    mesh: PolyMesh,
    alpha: ScalarField,
    p: ScalarField,
    t: ScalarField,
}

impl Column {
    fn new(t: f64) -> Self {
        Self::with_temperature(|_| t)
    }

    fn with_temperature(t: impl Fn(f64) -> f64) -> Self {
        Self {
            mesh: PolyMesh::line(10, 1.0).unwrap(),
            alpha: ScalarField::new(
                "alpha.liquid",
                (0..10).map(|c| if c < 5 { 1.0 } else { 0.0 }).collect(),
            ),
            p: ScalarField::uniform("p", 10, P_SAT),
            t: ScalarField::new("T", (0..10).map(|c| t((c as f64 + 0.5) / 10.0)).collect()),
        }
    }

    /// Superheated liquid on the left, subcooled vapor on the right, with
    /// more evaporation than condensation.
    fn crossing() -> Self {
        Self::with_temperature(|x| T_SAT + 4.0 - 6.0 * x)
    }

    fn correct(&self, model: &mut PhaseChangeModel) -> Result<(), PhaseChangeError> {
        let fields = FlowFields::new(&self.alpha, &self.p, &self.t);
        model.correct(&self.mesh, &SerialReduction, &fields)
    }
}

#[test]
fn superheated_liquid_scenario() {
    let col = Column::new(T_SAT + 5.0);
    let mut model = PhaseChangeModel::new(&lee(false), 10).unwrap();
    col.correct(&mut model).unwrap();

    let evap = &model.fluxes().evaporation.alpha;
    let expected = -10.0 * 1.0 * 5.0 / T_SAT;
    for c in 0..5 {
        assert!(
            (evap[c] - expected).abs() < 1e-12,
            "cell {c}: {} vs {expected}",
            evap[c]
        );
    }
    for c in 5..10 {
        assert_eq!(evap[c], 0.0, "cell {c}");
    }
}

#[test]
fn lee_subcooled_condenses_only() {
    let col = Column::new(T_SAT - 4.0);
    let mut model = PhaseChangeModel::new(&lee(false), 10).unwrap();
    col.correct(&mut model).unwrap();

    let fluxes = model.fluxes();
    for c in 0..10 {
        assert_eq!(fluxes.evaporation.no_alpha[c], 0.0);
        assert_eq!(fluxes.evaporation.alpha[c], 0.0);
        assert!(fluxes.condensation.no_alpha[c] > 0.0, "cell {c}");
    }
    // condensation needs vapor: the (1 - alpha) weighting vanishes in liquid
    assert_eq!(fluxes.condensation.alpha[0], 0.0);
    assert!(fluxes.condensation.alpha[9] > 0.0);
    assert!(model.je().iter().all(|&v| v == 0.0));
}

#[test]
fn lee_superheated_evaporates_only() {
    let col = Column::new(T_SAT + 4.0);
    let mut model = PhaseChangeModel::new(&lee(false), 10).unwrap();
    col.correct(&mut model).unwrap();

    let fluxes = model.fluxes();
    for c in 0..10 {
        assert_eq!(fluxes.condensation.no_alpha[c], 0.0);
        assert_eq!(fluxes.condensation.alpha[c], 0.0);
        assert!(fluxes.evaporation.no_alpha[c] < 0.0, "cell {c}");
    }
    assert!(model.jc().iter().all(|&v| v == 0.0));
    // interfacial flux only where |grad alpha| is resolved
    assert!(model.je()[4] > 0.0);
    assert_eq!(model.je()[0], 0.0);
}

#[test]
fn correct_is_repeatable() {
    let col = Column::crossing();
    for name in PhaseChangeRegistry::with_builtin().names() {
        for hardt_wondra in [false, true] {
            let case = props(name, ALL_COEFFS, hardt_wondra);
            let mut model = PhaseChangeModel::new(&case, 10).unwrap();

            col.correct(&mut model).unwrap();
            let first = model.sources().clone();
            let first_fluxes = model.fluxes().clone();
            let first_je = model.je().clone();

            col.correct(&mut model).unwrap();
            assert_eq!(model.sources(), &first, "{name}, hardt_wondra = {hardt_wondra}");
            assert_eq!(model.fluxes(), &first_fluxes, "{name}");
            assert_eq!(model.je(), &first_je, "{name}");
        }
    }
}

#[test]
fn end_step_adapts_only_the_adaptive_closures() {
    let col = Column::crossing();
    for name in PhaseChangeRegistry::with_builtin().names() {
        let mut model = PhaseChangeModel::new(&props(name, ALL_COEFFS, false), 10).unwrap();
        col.correct(&mut model).unwrap();
        let before = model.fluxes().clone();

        model.end_step();
        col.correct(&mut model).unwrap();
        let after = model.fluxes();

        // vapor-side condensation grows to balance the larger evaporation
        if matches!(name, "ChoiZhang" | "Xu") {
            assert!(after.condensation.alpha[9] > before.condensation.alpha[9], "{name}");
        } else {
            assert_eq!(after, &before, "{name}");
        }
        if name == "ChoiZhang" {
            assert_eq!(after.evaporation, before.evaporation);
        }
        if name == "Xu" {
            assert!(after.evaporation.alpha[0].abs() < before.evaporation.alpha[0].abs());
        }
    }
}

#[test]
fn unknown_model_is_a_selection_error() {
    let err = PhaseChangeModel::new(&props("Schrage", "{}", false), 10).unwrap_err();
    match err {
        PhaseChangeError::UnknownModel { kind, name, valid } => {
            assert_eq!(kind, "phase change");
            assert_eq!(name, "Schrage");
            assert_eq!(valid, ["ChoiZhang", "Lee", "Tanasawa", "Xu", "explicitSharp"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut bad = lee(false);
    bad.saturation.model = "Antoine".to_string();
    let err = PhaseChangeModel::new(&bad, 10).unwrap_err();
    assert!(matches!(err, PhaseChangeError::UnknownModel { kind: "saturation", .. }));
}

#[test]
fn missing_coefficients() {
    let err = PhaseChangeModel::new(&props("Lee", "{}", false), 10).unwrap_err();
    assert!(matches!(
        err,
        PhaseChangeError::Config(ConfigError::MissingSection { .. })
    ));

    let err = PhaseChangeModel::new(&props("Lee", "{ LeeCoeffs: { Cc: 1.0 } }", false), 10)
        .unwrap_err();
    match err {
        PhaseChangeError::Config(ConfigError::MissingKey { section, key }) => {
            assert_eq!(section, "LeeCoeffs");
            assert_eq!(key, "Cv");
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut model = PhaseChangeModel::new(&lee(false), 10).unwrap();
    assert!(!model.read(&props("Lee", "{}", false)).unwrap());
    assert!(model.read(&lee(false)).unwrap());
}
