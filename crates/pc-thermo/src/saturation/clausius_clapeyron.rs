use super::{SaturationModel, SaturationState};
use crate::error::{ThermoError, ThermoResult};
use pc_config::SaturationDef;
use pc_mesh::ScalarField;

/// Simplified Clausius-Clapeyron relation around a reference state:
///
/// `TSat(p) = TSatG / (1 - (R TSatG / hEvap) ln(p / pSat))`
///
/// With `pressure_dependent` off the field stays at `TSatG`.
#[derive(Debug, Clone)]
pub struct ClausiusClapeyron {
    state: SaturationState,
    r: f64,
    pressure_dependent: bool,
    t_sat: ScalarField,
}

impl ClausiusClapeyron {
    pub const NAME: &'static str = "ClausiusClapeyron";

    pub fn new(def: &SaturationDef, n_cells: usize) -> ThermoResult<Self> {
        let (state, r) = Self::read_state(def)?;
        Ok(Self {
            t_sat: ScalarField::uniform("TSat", n_cells, state.t_sat_g.value),
            state,
            r,
            pressure_dependent: def.pressure_dependent,
        })
    }

    pub fn pressure_dependent(&self) -> bool {
        self.pressure_dependent
    }

    /// Saturation temperature at a single pressure.
    pub fn t_sat_at(&self, p: f64) -> ThermoResult<f64> {
        let t_g = self.state.t_sat_g.value;
        if !(p.is_finite() && p > 0.0) {
            return Err(ThermoError::NonPhysical {
                what: "pressure",
                value: p,
            });
        }
        let slope = self.r * t_g / self.state.h_evap.value;
        let denom = 1.0 - slope * (p / self.state.p_sat.value).ln();
        if denom <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "Clausius-Clapeyron denominator",
                value: denom,
            });
        }
        Ok(t_g / denom)
    }

    fn read_state(def: &SaturationDef) -> ThermoResult<(SaturationState, f64)> {
        let state = SaturationState::from_def(def, true)?;
        let r = state.r.map(|r| r.value).unwrap_or_default();
        Ok((state, r))
    }
}

impl SaturationModel for ClausiusClapeyron {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn state(&self) -> &SaturationState {
        &self.state
    }

    fn t_sat(&self) -> &ScalarField {
        &self.t_sat
    }

    fn calc_t_sat(&mut self, p: &ScalarField) -> ThermoResult<()> {
        p.check_len(self.t_sat.len())?;
        if !self.pressure_dependent {
            self.t_sat.fill(self.state.t_sat_g.value);
            return Ok(());
        }
        // all or nothing: a bad cell leaves the previous field intact
        let values = p
            .iter()
            .map(|&pc| self.t_sat_at(pc))
            .collect::<ThermoResult<Vec<f64>>>()?;
        self.t_sat = ScalarField::new(self.t_sat.name(), values);
        Ok(())
    }

    fn read(&mut self, def: &SaturationDef) -> ThermoResult<()> {
        let (state, r) = Self::read_state(def)?;
        self.state = state;
        self.r = r;
        self.pressure_dependent = def.pressure_dependent;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(pressure_dependent: bool) -> SaturationDef {
        SaturationDef {
            model: ClausiusClapeyron::NAME.into(),
            t_sat: Some(373.15),
            p_sat: Some(101_325.0),
            h_evap: Some(2.26e6),
            r: Some(461.5),
            pressure_dependent,
        }
    }

    #[test]
    fn reference_pressure_gives_reference_temperature() {
        let mut model = ClausiusClapeyron::new(&def(true), 2).unwrap();
        model
            .calc_t_sat(&ScalarField::uniform("p", 2, 101_325.0))
            .unwrap();
        assert_eq!(model.t_sat()[0], 373.15);
        assert_eq!(model.t_sat()[1], 373.15);
    }

    #[test]
    fn higher_pressure_raises_saturation_temperature() {
        let mut model = ClausiusClapeyron::new(&def(true), 3).unwrap();
        let p = ScalarField::new("p", vec![0.5e5, 101_325.0, 2e5]);
        model.calc_t_sat(&p).unwrap();
        let t = model.t_sat();
        assert!(t[0] < t[1] && t[1] < t[2]);
        // water boils near 393 K at 2 bar
        assert!((t[2] - 393.0).abs() < 3.0);
    }

    #[test]
    fn pressure_independent_falls_back_to_reference() {
        let mut model = ClausiusClapeyron::new(&def(false), 2).unwrap();
        model
            .calc_t_sat(&ScalarField::new("p", vec![1e4, 1e6]))
            .unwrap();
        assert!(model.t_sat().iter().all(|&t| t == 373.15));
    }

    #[test]
    fn rejects_non_positive_pressure() {
        let mut model = ClausiusClapeyron::new(&def(true), 1).unwrap();
        let err = model
            .calc_t_sat(&ScalarField::uniform("p", 1, 0.0))
            .unwrap_err();
        assert!(matches!(err, ThermoError::NonPhysical { what: "pressure", .. }));
    }

    #[test]
    fn requires_gas_constant() {
        let mut d = def(true);
        d.r = None;
        assert!(matches!(
            ClausiusClapeyron::new(&d, 1),
            Err(ThermoError::Config(_))
        ));
    }

    #[test]
    fn failed_update_keeps_previous_field() {
        let mut model = ClausiusClapeyron::new(&def(true), 3).unwrap();
        let good = ScalarField::new("p", vec![0.5e5, 1e5, 2e5]);
        model.calc_t_sat(&good).unwrap();
        let before = model.t_sat().clone();

        let bad = ScalarField::new("p", vec![3e5, 4e5, -1.0]);
        assert!(model.calc_t_sat(&bad).is_err());
        assert_eq!(model.t_sat(), &before);
    }
}
