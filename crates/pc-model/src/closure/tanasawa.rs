use super::{ClosureContext, PhaseChangeClosure, relax_cell};
use crate::error::{PhaseChangeError, PhaseChangeResult};
use crate::fluxes::{InterfaceFluxes, MassFluxes};
use pc_config::{CoeffsDict, ConfigError, PhaseChangeDef};
use pc_core::{neg, pos0};
use pc_mesh::ScalarField;
use pc_thermo::{SaturationModel, ThermalMixture};
use std::f64::consts::PI;
use tracing::warn;

/// Kinetic-theory model with an interfacial heat-transfer resistance.
///
/// `Rint = (2 - gamma) / (2 gamma) * sqrt(2 pi R) / (rho2 hEvap^2) * TSat^1.5`
/// and the interfacial flux is `|T - TSat| / (Rint hEvap)` in the active
/// direction. Volumetric rates are the interfacial flux times `|grad alpha|`.
///
/// `R` comes from `TanasawaCoeffs` when given, otherwise from the saturation
/// model.
#[derive(Clone, Debug)]
pub struct Tanasawa {
    gamma: f64,
    r: Option<f64>,
    mismatch_reported: bool,
    rint: ScalarField,
}

impl Tanasawa {
    pub const NAME: &'static str = "Tanasawa";

    pub fn new(def: &PhaseChangeDef, n_cells: usize) -> PhaseChangeResult<Self> {
        let coeffs = def.require_coeffs(Self::NAME)?;
        let (gamma, r) = Self::read_coeffs(&coeffs)?;
        Ok(Self {
            gamma,
            r,
            mismatch_reported: false,
            rint: ScalarField::zeros("Rint", n_cells),
        })
    }

    fn read_coeffs(coeffs: &CoeffsDict<'_>) -> PhaseChangeResult<(f64, Option<f64>)> {
        let gamma = coeffs.require("gamma")?;
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(PhaseChangeError::Config(ConfigError::InvalidValue {
                field: format!("{}.gamma", coeffs.section()),
                value: gamma.to_string(),
                reason: "accommodation coefficient must lie in (0, 1]".to_string(),
            }));
        }
        let r = coeffs.get("R");
        if let Some(r) = r {
            if !(r > 0.0) {
                return Err(PhaseChangeError::Config(ConfigError::InvalidValue {
                    field: format!("{}.R", coeffs.section()),
                    value: r.to_string(),
                    reason: "gas constant must be positive".to_string(),
                }));
            }
        }
        Ok((gamma, r))
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Gas constant given in `TanasawaCoeffs`, if any.
    pub fn r(&self) -> Option<f64> {
        self.r
    }

    /// Gas constant used by the next correction.
    ///
    /// Falls back to the saturation model's `R`. A coefficient that disagrees
    /// with the saturation model wins and is reported once.
    pub fn gas_constant(&mut self, saturation: &dyn SaturationModel) -> PhaseChangeResult<f64> {
        let saturation_r = saturation.gas_constant().map(|r| r.value);
        match (self.r, saturation_r) {
            (Some(r), Some(sat)) => {
                if !self.mismatch_reported && (r - sat).abs() > 1e-9 * sat {
                    warn!(
                        tanasawa_r = r,
                        saturation_r = sat,
                        "TanasawaCoeffs.R differs from the saturation gas constant"
                    );
                    self.mismatch_reported = true;
                }
                Ok(r)
            }
            (Some(r), None) | (None, Some(r)) => Ok(r),
            (None, None) => Err(PhaseChangeError::Config(ConfigError::MissingKey {
                section: format!("{}Coeffs", Self::NAME),
                key: "R".to_string(),
            })),
        }
    }

    /// Interfacial resistance of the last correction.
    pub fn rint(&self) -> &ScalarField {
        &self.rint
    }

    pub fn rint_coeff(&self, r: f64, rho2: f64, h_evap: f64) -> f64 {
        (2.0 - self.gamma) / (2.0 * self.gamma) * (2.0 * PI * r).sqrt() / (rho2 * h_evap * h_evap)
    }
}

impl PhaseChangeClosure for Tanasawa {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn read(&mut self, def: &PhaseChangeDef, _mixture: &ThermalMixture) -> PhaseChangeResult<bool> {
        let Some(coeffs) = def.coeffs_for(Self::NAME) else {
            return Ok(false);
        };
        (self.gamma, self.r) = Self::read_coeffs(&coeffs)?;
        self.mismatch_reported = false;
        Ok(true)
    }

    fn j(&mut self, ctx: &ClosureContext<'_>, fluxes: &mut MassFluxes) -> PhaseChangeResult<()> {
        self.rint.check_len(ctx.mesh.n_cells())?;
        let h_evap = ctx.h_evap();
        let r = self.gas_constant(ctx.saturation)?;
        let rint_coeff = self.rint_coeff(r, ctx.rho2(), h_evap);
        let t = ctx.fields.t;
        let t_sat = ctx.saturation.t_sat();
        let alpha = ctx.cache.limited_alpha();
        let mag = ctx.cache.mag_grad_alpha();

        for c in 0..t.len() {
            let rint = rint_coeff * t_sat[c].powf(1.5);
            self.rint[c] = rint;
            // Lee form with a per-cell coefficient
            let k = mag[c] * t_sat[c] / (rint * h_evap);
            relax_cell(fluxes, c, t[c] - t_sat[c], t_sat[c], alpha[c], k, k);
        }
        Ok(())
    }

    fn interface_fluxes(
        &self,
        ctx: &ClosureContext<'_>,
        _fluxes: &MassFluxes,
        out: &mut InterfaceFluxes,
    ) -> PhaseChangeResult<()> {
        let h_evap = ctx.h_evap();
        let t = ctx.fields.t;
        let t_sat = ctx.saturation.t_sat();
        for c in 0..t.len() {
            let dt = t[c] - t_sat[c];
            let denom = self.rint[c] * h_evap;
            out.jc[c] = -neg(dt) * dt / denom;
            out.je[c] = pos0(dt) * dt / denom;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match self.r {
            Some(r) => format!("gamma = {}, R = {r}", self.gamma),
            None => format!("gamma = {}, R from saturation", self.gamma),
        }
    }
}
