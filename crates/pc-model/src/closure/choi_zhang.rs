use super::{ClosureContext, Lee, PhaseChangeClosure};
use crate::error::PhaseChangeResult;
use crate::fluxes::{MassFluxes, Switches};
use pc_config::PhaseChangeDef;
use pc_mesh::fvc;
use pc_thermo::ThermalMixture;
use tracing::debug;

/// Integrated condensation and evaporation rates of the last correction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransferTotals {
    pub condensation: f64,
    pub evaporation: f64,
}

/// Lee model whose coefficients follow the condensation/evaporation balance.
///
/// Each correction records the integrated rates. At the end of a time step
/// `Cc` is multiplied by
/// `1 - (C - |E|) / max(C, |E|)`, with `C` and `E` the integrated rates. With
/// `symmetric` set (the Xu variant) `Cv` is rescaled the same way by
/// `1 - (|E| - C) / max(C, |E|)`. Repeated corrections within a step see the
/// same coefficients. Unless both channels are on, the nominal values are
/// restored.
#[derive(Clone, Debug)]
struct AdaptiveLee {
    lee: Lee,
    cc_var: f64,
    cv_var: f64,
    totals: TransferTotals,
    symmetric: bool,
}

impl AdaptiveLee {
    fn new(lee: Lee, symmetric: bool) -> Self {
        Self {
            cc_var: lee.cc(),
            cv_var: lee.cv(),
            lee,
            totals: TransferTotals::default(),
            symmetric,
        }
    }

    fn read(
        &mut self,
        section: &str,
        def: &PhaseChangeDef,
        mixture: &ThermalMixture,
    ) -> PhaseChangeResult<bool> {
        let Some(coeffs) = def.coeffs_for(section) else {
            return Ok(false);
        };
        *self = Self::new(Lee::from_coeffs(&coeffs, mixture)?, self.symmetric);
        Ok(true)
    }

    fn observe(&mut self, ctx: &ClosureContext<'_>, fluxes: &MassFluxes) -> PhaseChangeResult<()> {
        self.totals = TransferTotals {
            condensation: fvc::domain_integrate(
                ctx.mesh,
                ctx.reduction,
                &fluxes.condensation.alpha,
            )?,
            evaporation: fvc::domain_integrate(
                ctx.mesh,
                ctx.reduction,
                &fluxes.evaporation.alpha,
            )?,
        };
        Ok(())
    }

    fn adapt(&mut self, mixture: &ThermalMixture, switches: Switches) {
        let cond = self.totals.condensation;
        let evap = self.totals.evaporation.abs();
        if switches.condensation && switches.evaporation {
            if !(cond == 0.0 && evap == 0.0) {
                let scale = cond.max(evap);
                self.cc_var -= self.cc_var * (cond - evap) / scale;
                if self.symmetric {
                    self.cv_var -= self.cv_var * (evap - cond) / scale;
                }
            }
        } else {
            self.cc_var = self.lee.cc();
            self.cv_var = self.lee.cv();
        }

        let mv_coeff = if self.symmetric {
            self.cv_var * mixture.rho1().value
        } else {
            self.lee.mv_coeff()
        };
        self.lee.set_coeffs(self.cc_var * mixture.rho2().value, mv_coeff);
        debug!(
            total_condensation = cond,
            total_evaporation = evap,
            cc = self.cc_var,
            cv = self.cv_var,
            "Adapted relaxation coefficients"
        );
    }

    fn describe(&self) -> String {
        format!("{}, Ccvar = {}, Cvvar = {}", self.lee.describe(), self.cc_var, self.cv_var)
    }
}

/// Lee model with `Cc` adapted to balance condensation against evaporation.
#[derive(Clone, Debug)]
pub struct ChoiZhang {
    inner: AdaptiveLee,
}

impl ChoiZhang {
    pub const NAME: &'static str = "ChoiZhang";

    pub fn new(def: &PhaseChangeDef, mixture: &ThermalMixture) -> PhaseChangeResult<Self> {
        Ok(Self {
            inner: AdaptiveLee::new(Lee::from_section(Self::NAME, def, mixture)?, false),
        })
    }

    /// Current (adapted) condensation coefficient.
    pub fn cc_var(&self) -> f64 {
        self.inner.cc_var
    }

    pub fn cv_var(&self) -> f64 {
        self.inner.cv_var
    }

    pub fn totals(&self) -> TransferTotals {
        self.inner.totals
    }

    pub fn lee(&self) -> &Lee {
        &self.inner.lee
    }
}

/// ChoiZhang with `Cv` rescaled as well.
#[derive(Clone, Debug)]
pub struct Xu {
    inner: AdaptiveLee,
}

impl Xu {
    pub const NAME: &'static str = "Xu";

    pub fn new(def: &PhaseChangeDef, mixture: &ThermalMixture) -> PhaseChangeResult<Self> {
        Ok(Self {
            inner: AdaptiveLee::new(Lee::from_section(Self::NAME, def, mixture)?, true),
        })
    }

    pub fn cc_var(&self) -> f64 {
        self.inner.cc_var
    }

    pub fn cv_var(&self) -> f64 {
        self.inner.cv_var
    }

    pub fn totals(&self) -> TransferTotals {
        self.inner.totals
    }

    pub fn lee(&self) -> &Lee {
        &self.inner.lee
    }
}

macro_rules! adaptive_closure {
    ($ty:ty) => {
        impl PhaseChangeClosure for $ty {
            fn name(&self) -> &'static str {
                Self::NAME
            }

            fn read(
                &mut self,
                def: &PhaseChangeDef,
                mixture: &ThermalMixture,
            ) -> PhaseChangeResult<bool> {
                self.inner.read(Self::NAME, def, mixture)
            }

            fn j(
                &mut self,
                ctx: &ClosureContext<'_>,
                fluxes: &mut MassFluxes,
            ) -> PhaseChangeResult<()> {
                self.inner.lee.relax(ctx, fluxes);
                Ok(())
            }

            fn observe(
                &mut self,
                ctx: &ClosureContext<'_>,
                fluxes: &MassFluxes,
            ) -> PhaseChangeResult<()> {
                self.inner.observe(ctx, fluxes)
            }

            fn adapt(&mut self, mixture: &ThermalMixture, switches: Switches) {
                self.inner.adapt(mixture, switches)
            }

            fn describe(&self) -> String {
                self.inner.describe()
            }
        }
    };
}

adaptive_closure!(ChoiZhang);
adaptive_closure!(Xu);
