use super::{ClausiusClapeyron, ConstantSaturation, SaturationModel};
use crate::error::{ThermoError, ThermoResult};
use pc_config::SaturationDef;
use std::collections::BTreeMap;
use tracing::info;

pub type SaturationFactory =
    Box<dyn Fn(&SaturationDef, usize) -> ThermoResult<Box<dyn SaturationModel>> + Send + Sync>;

/// Name to constructor table for saturation correlations.
pub struct SaturationRegistry {
    factories: BTreeMap<&'static str, SaturationFactory>,
}

impl SaturationRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn with_builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(ConstantSaturation::NAME, |def, n| {
            ConstantSaturation::new(def, n).map(|m| Box::new(m) as Box<dyn SaturationModel>)
        });
        reg.register(ClausiusClapeyron::NAME, |def, n| {
            ClausiusClapeyron::new(def, n).map(|m| Box::new(m) as Box<dyn SaturationModel>)
        });
        reg
    }

    /// Add or replace a correlation.
    pub fn register<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn(&SaturationDef, usize) -> ThermoResult<Box<dyn SaturationModel>>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name, Box::new(factory));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Construct the correlation named by `def.model` for `n_cells` cells.
    pub fn create(&self, def: &SaturationDef, n_cells: usize) -> ThermoResult<Box<dyn SaturationModel>> {
        let factory = self
            .factories
            .get(def.model.as_str())
            .ok_or_else(|| ThermoError::UnknownModel {
                kind: "saturation",
                name: def.model.clone(),
                valid: self.names().iter().map(|s| s.to_string()).collect(),
            })?;
        info!(model = %def.model, "Selecting saturation model");
        factory(def, n_cells)
    }
}

impl Default for SaturationRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(model: &str) -> SaturationDef {
        SaturationDef {
            model: model.into(),
            t_sat: Some(373.15),
            p_sat: Some(101_325.0),
            h_evap: Some(2.26e6),
            r: Some(461.5),
            pressure_dependent: true,
        }
    }

    #[test]
    fn builtin_names() {
        let reg = SaturationRegistry::default();
        assert_eq!(reg.names(), vec!["ClausiusClapeyron", "constant"]);
        assert!(reg.contains("constant"));
    }

    #[test]
    fn creates_by_name() {
        let reg = SaturationRegistry::with_builtin();
        let model = reg.create(&def("ClausiusClapeyron"), 4).unwrap();
        assert_eq!(model.name(), "ClausiusClapeyron");
        assert_eq!(model.t_sat().len(), 4);
        assert_eq!(model.gas_constant().map(|r| r.value), Some(461.5));
    }

    #[test]
    fn unknown_name_fails_fast() {
        let reg = SaturationRegistry::with_builtin();
        match reg.create(&def("Antoine"), 1) {
            Err(ThermoError::UnknownModel { name, valid, .. }) => {
                assert_eq!(name, "Antoine");
                assert_eq!(valid, vec!["ClausiusClapeyron", "constant"]);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("unknown model accepted"),
        }
    }

    #[test]
    fn custom_registration() {
        let mut reg = SaturationRegistry::empty();
        assert!(reg.names().is_empty());
        reg.register("fixed", |def, n| {
            ConstantSaturation::new(def, n).map(|m| Box::new(m) as Box<dyn SaturationModel>)
        });
        assert!(reg.create(&def("fixed"), 2).is_ok());
    }
}
