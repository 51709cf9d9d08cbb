//! Name-keyed construction of phase-change closures.

use crate::closure::{ChoiZhang, ExplicitSharp, Lee, PhaseChangeClosure, Tanasawa, Xu};
use crate::error::{PhaseChangeError, PhaseChangeResult};
use pc_config::PhaseChangeDef;
use pc_thermo::ThermalMixture;
use std::collections::BTreeMap;
use tracing::info;

pub type ClosureFactory = Box<
    dyn Fn(&PhaseChangeDef, &ThermalMixture, usize) -> PhaseChangeResult<Box<dyn PhaseChangeClosure>>
        + Send
        + Sync,
>;

/// Name to constructor table for phase-change closures.
pub struct PhaseChangeRegistry {
    factories: BTreeMap<&'static str, ClosureFactory>,
}

impl PhaseChangeRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn with_builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(Lee::NAME, |def, mixture, _| {
            Lee::new(def, mixture).map(|m| Box::new(m) as Box<dyn PhaseChangeClosure>)
        });
        reg.register(ChoiZhang::NAME, |def, mixture, _| {
            ChoiZhang::new(def, mixture).map(|m| Box::new(m) as Box<dyn PhaseChangeClosure>)
        });
        reg.register(Xu::NAME, |def, mixture, _| {
            Xu::new(def, mixture).map(|m| Box::new(m) as Box<dyn PhaseChangeClosure>)
        });
        reg.register(Tanasawa::NAME, |def, _, n| {
            Tanasawa::new(def, n).map(|m| Box::new(m) as Box<dyn PhaseChangeClosure>)
        });
        reg.register(ExplicitSharp::NAME, |def, mixture, _| {
            ExplicitSharp::new(def, mixture).map(|m| Box::new(m) as Box<dyn PhaseChangeClosure>)
        });
        reg
    }

    /// Add or replace a closure.
    pub fn register<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn(&PhaseChangeDef, &ThermalMixture, usize) -> PhaseChangeResult<Box<dyn PhaseChangeClosure>>
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

    /// Construct the closure named by `def.model` for `n_cells` cells.
    pub fn create(
        &self,
        def: &PhaseChangeDef,
        mixture: &ThermalMixture,
        n_cells: usize,
    ) -> PhaseChangeResult<Box<dyn PhaseChangeClosure>> {
        let factory = self
            .factories
            .get(def.model.as_str())
            .ok_or_else(|| PhaseChangeError::UnknownModel {
                kind: "phase change",
                name: def.model.clone(),
                valid: self.names().iter().map(|s| s.to_string()).collect(),
            })?;
        info!(model = %def.model, "Selecting phase change model");
        factory(def, mixture, n_cells)
    }
}

impl Default for PhaseChangeRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lee_def, mixture_def};
    use std::collections::BTreeMap;

    fn mixture() -> ThermalMixture {
        ThermalMixture::new(&mixture_def(1.0, 1.0), 4).unwrap()
    }

    #[test]
    fn builtin_names() {
        let reg = PhaseChangeRegistry::default();
        assert_eq!(
            reg.names(),
            vec!["ChoiZhang", "Lee", "Tanasawa", "Xu", "explicitSharp"]
        );
    }

    #[test]
    fn every_builtin_reads_its_own_section() {
        let reg = PhaseChangeRegistry::with_builtin();
        let mut def = lee_def(0.1, 0.2);
        for name in ["ChoiZhang", "Xu", "explicitSharp"] {
            def.coeffs.insert(
                format!("{name}Coeffs"),
                BTreeMap::from([("Cc".to_string(), 0.1), ("Cv".to_string(), 0.2)]),
            );
        }
        def.coeffs.insert(
            "TanasawaCoeffs".to_string(),
            BTreeMap::from([("gamma".to_string(), 1.0), ("R".to_string(), 461.5)]),
        );

        for name in reg.names() {
            def.model = name.to_string();
            let closure = reg.create(&def, &mixture(), 4).unwrap();
            assert_eq!(closure.name(), name);
        }
    }

    #[test]
    fn unknown_name_lists_alternatives() {
        let reg = PhaseChangeRegistry::with_builtin();
        let mut def = lee_def(0.1, 0.2);
        def.model = "Schrage".to_string();
        match reg.create(&def, &mixture(), 4) {
            Err(PhaseChangeError::UnknownModel { kind, name, valid }) => {
                assert_eq!(kind, "phase change");
                assert_eq!(name, "Schrage");
                assert!(valid.contains(&"Lee".to_string()));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("unknown model accepted"),
        }
    }

    #[test]
    fn missing_section_is_reported_at_construction() {
        let reg = PhaseChangeRegistry::with_builtin();
        let mut def = lee_def(0.1, 0.2);
        def.model = "Tanasawa".to_string();
        let err = reg.create(&def, &mixture(), 4).err().unwrap();
        assert!(matches!(
            err,
            PhaseChangeError::Config(pc_config::ConfigError::MissingSection { .. })
        ));
    }
}
