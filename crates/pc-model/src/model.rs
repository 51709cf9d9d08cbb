//! The phase-change model: owns the saturation correlation, the mixture, the
//! interface cache, one closure and the optional spreader, and runs them in a
//! fixed order once per correction.

use crate::closure::{ClosureContext, PhaseChangeClosure};
use crate::error::{PhaseChangeError, PhaseChangeResult};
use crate::fields::FlowFields;
use crate::fluxes::{InterfaceFluxes, MassFluxes, Switches};
use crate::interface::InterfaceCache;
use crate::registry::PhaseChangeRegistry;
use crate::sources::{SourcePair, SourceTerms};
use crate::spreader::{HardtWondra, SpreadReport};
use pc_config::{ConfigError, PhaseChangeDef, PhaseChangeProperties, validate_properties};
use pc_core::units::{GasConstant, LatentHeat, Pressure, Temperature};
use pc_mesh::{FvMesh, LinearSolver, Reduction, ScalarField, fvc};
use pc_thermo::{SaturationModel, SaturationRegistry, ThermalMixture};
use tracing::{debug, info};

/// Domain totals of the weighted transfer rates [kg/s].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransferIntegrals {
    pub condensation: f64,
    pub evaporation: f64,
}

pub struct PhaseChangeModel {
    saturation: Box<dyn SaturationModel>,
    mixture: ThermalMixture,
    cache: InterfaceCache,
    closure: Box<dyn PhaseChangeClosure>,
    spreader: Option<HardtWondra>,
    switches: Switches,
    print_phase_change: bool,
    fluxes: MassFluxes,
    interface: InterfaceFluxes,
    sources: SourceTerms,
    last_spread: Option<SpreadReport>,
    last_integrals: TransferIntegrals,
    n_cells: usize,
}

impl std::fmt::Debug for PhaseChangeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseChangeModel")
            .field("saturation", &self.saturation.name())
            .field("closure", &self.closure.name())
            .field("spreader", &self.spreader)
            .field("switches", &self.switches)
            .field("n_cells", &self.n_cells)
            .finish()
    }
}

fn switches_of(def: &PhaseChangeDef) -> Switches {
    Switches {
        condensation: def.condensation,
        evaporation: def.evaporation,
    }
}

impl PhaseChangeModel {
    /// Build from the built-in registries.
    pub fn new(props: &PhaseChangeProperties, n_cells: usize) -> PhaseChangeResult<Self> {
        Self::with_registries(
            props,
            n_cells,
            &SaturationRegistry::with_builtin(),
            &PhaseChangeRegistry::with_builtin(),
        )
    }

    pub fn with_registries(
        props: &PhaseChangeProperties,
        n_cells: usize,
        saturation_registry: &SaturationRegistry,
        closure_registry: &PhaseChangeRegistry,
    ) -> PhaseChangeResult<Self> {
        validate_properties(props)?;
        let def = &props.phase_change;
        let saturation = saturation_registry.create(&props.saturation, n_cells)?;
        let mixture = ThermalMixture::new(&props.mixture, n_cells)?;
        let closure = closure_registry.create(def, &mixture, n_cells)?;
        let spreader = def.hardt_wondra.then(|| HardtWondra::from_def(def));

        let model = Self {
            saturation,
            mixture,
            cache: InterfaceCache::new(n_cells),
            closure,
            spreader,
            switches: switches_of(def),
            print_phase_change: def.print_phase_change,
            fluxes: MassFluxes::new(n_cells),
            interface: InterfaceFluxes::new(n_cells),
            sources: SourceTerms::new(n_cells),
            last_spread: None,
            last_integrals: TransferIntegrals::default(),
            n_cells,
        };
        model.log_banner(def);
        Ok(model)
    }

    fn log_banner(&self, def: &PhaseChangeDef) {
        let state = self.saturation.state();
        info!(
            saturation = self.saturation.name(),
            t_sat = state.t_sat_g.value,
            p_sat = state.p_sat.value,
            h_evap = state.h_evap.value,
            "Saturation properties"
        );
        info!(
            model = self.closure.name(),
            condensation = self.switches.condensation,
            evaporation = self.switches.evaporation,
            hardt_wondra = self.spreader.is_some(),
            spread = def.spread,
            cutoff = def.cutoff,
            coeffs = %self.closure.describe(),
            "Phase change model"
        );
    }

    /// Replace the spreader's linear solver.
    pub fn with_linear_solver(mut self, solver: Box<dyn LinearSolver>) -> Self {
        self.set_linear_solver(solver);
        self
    }

    pub fn set_linear_solver(&mut self, solver: Box<dyn LinearSolver>) {
        if let Some(spreader) = self.spreader.take() {
            self.spreader = Some(spreader.with_solver(solver));
        }
    }

    /// Reload coefficients and switches. The selected model names are fixed
    /// at construction; `Ok(false)` when the closure subsection is absent.
    pub fn read(&mut self, props: &PhaseChangeProperties) -> PhaseChangeResult<bool> {
        validate_properties(props)?;
        let def = &props.phase_change;
        for (what, configured, current) in [
            ("saturation.model", &props.saturation.model, self.saturation.name()),
            ("phase_change.model", &def.model, self.closure.name()),
        ] {
            if configured != current {
                return Err(ConfigError::InvalidValue {
                    field: what.to_string(),
                    value: configured.clone(),
                    reason: format!("model is fixed at construction as '{current}'"),
                }
                .into());
            }
        }

        self.saturation.read(&props.saturation)?;
        self.mixture.read(&props.mixture)?;
        self.switches = switches_of(def);
        self.print_phase_change = def.print_phase_change;
        if !def.hardt_wondra {
            self.spreader = None;
        } else if let Some(spreader) = self.spreader.as_mut() {
            spreader.reconfigure(def);
        } else {
            self.spreader = Some(HardtWondra::from_def(def));
        }

        let found = self.closure.read(def, &self.mixture)?;
        if !found {
            debug!(model = self.closure.name(), "No coefficient subsection, keeping coefficients");
        }
        Ok(found)
    }

    /// Recompute fluxes and source terms from the current flow state.
    pub fn correct(
        &mut self,
        mesh: &dyn FvMesh,
        reduction: &dyn Reduction,
        fields: &FlowFields<'_>,
    ) -> PhaseChangeResult<()> {
        if mesh.n_cells() != self.n_cells {
            return Err(PhaseChangeError::SizeMismatch {
                what: "mesh cells".to_string(),
                expected: self.n_cells,
                found: mesh.n_cells(),
            });
        }
        fields.check(mesh)?;

        self.saturation.calc_t_sat(fields.p)?;
        self.cache.update(mesh, fields.alpha1)?;
        self.mixture.correct(self.cache.limited_alpha())?;

        let ctx = ClosureContext {
            mesh,
            reduction,
            fields,
            cache: &self.cache,
            saturation: self.saturation.as_ref(),
            mixture: &self.mixture,
            switches: self.switches,
        };

        self.fluxes.clear();
        self.closure.j(&ctx, &mut self.fluxes)?;
        self.fluxes.zero_disabled(self.switches);

        self.closure
            .interface_fluxes(&ctx, &self.fluxes, &mut self.interface)?;
        self.interface.zero_disabled(self.switches);

        self.closure.observe(&ctx, &self.fluxes)?;

        self.last_spread = match &self.spreader {
            Some(spreader) => Some(spreader.spread(
                mesh,
                reduction,
                &self.cache,
                &mut self.fluxes,
                self.switches,
            )?),
            None => None,
        };

        self.closure
            .alpha_source(&ctx, &self.fluxes, &mut self.sources.alpha)?;
        self.closure
            .p_source(&ctx, &self.fluxes, &mut self.sources.p)?;
        self.closure
            .t_source(&ctx, &self.fluxes, &mut self.sources.t)?;

        for channel in [&self.fluxes.condensation, &self.fluxes.evaporation] {
            if !channel.all_finite() {
                return Err(PhaseChangeError::NonFinite {
                    what: channel.alpha.name().to_string(),
                });
            }
        }
        if !self.sources.all_finite() {
            return Err(PhaseChangeError::NonFinite {
                what: "source terms".to_string(),
            });
        }

        self.last_integrals = TransferIntegrals {
            condensation: fvc::domain_integrate(mesh, reduction, &self.fluxes.condensation.alpha)?,
            evaporation: fvc::domain_integrate(mesh, reduction, &self.fluxes.evaporation.alpha)?,
        };
        if self.print_phase_change {
            info!(
                condensation = self.last_integrals.condensation,
                evaporation = self.last_integrals.evaporation,
                "Phase change integrals"
            );
        } else {
            debug!(
                condensation = self.last_integrals.condensation,
                evaporation = self.last_integrals.evaporation,
                "Phase change integrals"
            );
        }
        Ok(())
    }

    /// Close the time step: adaptive closures update their coefficients from
    /// the last correction. Corrections before this call are repeatable.
    pub fn end_step(&mut self) {
        self.closure.adapt(&self.mixture, self.switches);
        debug!(model = self.closure.name(), coeffs = %self.closure.describe(), "Step closed");
    }

    pub fn closure(&self) -> &dyn PhaseChangeClosure {
        self.closure.as_ref()
    }

    pub fn saturation(&self) -> &dyn SaturationModel {
        self.saturation.as_ref()
    }

    pub fn mixture(&self) -> &ThermalMixture {
        &self.mixture
    }

    pub fn switches(&self) -> Switches {
        self.switches
    }

    pub fn spreading_enabled(&self) -> bool {
        self.spreader.is_some()
    }

    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    pub fn t_sat(&self) -> &ScalarField {
        self.saturation.t_sat()
    }

    pub fn t_sat_global(&self) -> Temperature {
        self.saturation.t_sat_global()
    }

    pub fn p_sat(&self) -> Pressure {
        self.saturation.p_sat()
    }

    pub fn h_evap(&self) -> LatentHeat {
        self.saturation.h_evap()
    }

    pub fn gas_constant(&self) -> Option<GasConstant> {
        self.saturation.gas_constant()
    }

    /// Interfacial condensation mass flux [kg/m^2/s].
    pub fn jc(&self) -> &ScalarField {
        &self.interface.jc
    }

    /// Interfacial evaporation mass flux [kg/m^2/s].
    pub fn je(&self) -> &ScalarField {
        &self.interface.je
    }

    pub fn fluxes(&self) -> &MassFluxes {
        &self.fluxes
    }

    pub fn sources(&self) -> &SourceTerms {
        &self.sources
    }

    pub fn alpha_source(&self) -> &SourcePair {
        &self.sources.alpha
    }

    pub fn alpha_source_sp(&self) -> &ScalarField {
        &self.sources.alpha.sp
    }

    pub fn alpha_source_su(&self) -> &ScalarField {
        &self.sources.alpha.su
    }

    pub fn p_source_sp(&self) -> &ScalarField {
        &self.sources.p.sp
    }

    pub fn p_source_su(&self) -> &ScalarField {
        &self.sources.p.su
    }

    pub fn t_source_sp(&self) -> &ScalarField {
        &self.sources.t.sp
    }

    pub fn t_source_su(&self) -> &ScalarField {
        &self.sources.t.su
    }

    pub fn limited_alpha(&self) -> &ScalarField {
        self.cache.limited_alpha()
    }

    pub fn mag_grad_alpha(&self) -> &ScalarField {
        self.cache.mag_grad_alpha()
    }

    /// Spreader diagnostics of the last correction, if spreading ran.
    pub fn last_spread_report(&self) -> Option<&SpreadReport> {
        self.last_spread.as_ref()
    }

    pub fn last_integrals(&self) -> TransferIntegrals {
        self.last_integrals
    }
}
