use super::{SaturationModel, SaturationState};
use crate::error::ThermoResult;
use pc_config::SaturationDef;
use pc_mesh::ScalarField;

/// Uniform saturation temperature, independent of pressure.
#[derive(Debug, Clone)]
pub struct ConstantSaturation {
    state: SaturationState,
    t_sat: ScalarField,
}

impl ConstantSaturation {
    pub const NAME: &'static str = "constant";

    pub fn new(def: &SaturationDef, n_cells: usize) -> ThermoResult<Self> {
        let state = SaturationState::from_def(def, false)?;
        Ok(Self {
            t_sat: ScalarField::uniform("TSat", n_cells, state.t_sat_g.value),
            state,
        })
    }
}

impl SaturationModel for ConstantSaturation {
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
        self.t_sat.fill(self.state.t_sat_g.value);
        Ok(())
    }

    fn read(&mut self, def: &SaturationDef) -> ThermoResult<()> {
        self.state = SaturationState::from_def(def, false)?;
        self.t_sat.fill(self.state.t_sat_g.value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(t_sat: f64) -> SaturationDef {
        SaturationDef {
            model: "constant".into(),
            t_sat: Some(t_sat),
            p_sat: Some(1e5),
            h_evap: Some(2e6),
            r: None,
            pressure_dependent: true,
        }
    }

    #[test]
    fn ignores_pressure() {
        let mut model = ConstantSaturation::new(&def(350.0), 3).unwrap();
        let p = ScalarField::new("p", vec![1e3, 1e5, 1e7]);
        model.calc_t_sat(&p).unwrap();
        assert!(model.t_sat().iter().all(|&t| t == 350.0));
        assert!(model.calc_t_sat(&ScalarField::zeros("p", 2)).is_err());
    }

    #[test]
    fn read_updates_field() {
        let mut model = ConstantSaturation::new(&def(350.0), 2).unwrap();
        model.read(&def(360.0)).unwrap();
        assert_eq!(model.t_sat_global().value, 360.0);
        assert_eq!(model.t_sat()[1], 360.0);
    }
}
