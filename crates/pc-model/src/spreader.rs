//! Hardt-Wondra source spreading.
//!
//! A sharp interfacial source is smoothed by a screened Poisson solve and then
//! split back into a liquid-side source and a vapor-side sink. Each side is
//! rescaled so it integrates to the pre-spreading total, and cells inside the
//! interface band receive nothing.

use crate::error::PhaseChangeResult;
use crate::fluxes::{Channel, MassFluxes, Switches};
use crate::interface::{InterfaceCache, Region};
use nalgebra::DVector;
use pc_config::{PhaseChangeDef, SpreadWeightingDef};
use pc_core::guarded_ratio;
use pc_mesh::{FvMesh, LinearSolver, PcgSolver, Reduction, ScalarField, fvc, fvm};
use tracing::debug;

/// Normalization used when an integral carries no information.
pub const DEGENERATE_NORMALIZATION: f64 = 2.0;

/// Representations rescaled by the first normalization `N`, beyond the
/// canonical condensation `alpha`/`no_t` and evaporation `no_alpha`/`no_t`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpreadWeighting {
    pub scale_condensation_no_alpha: bool,
    pub scale_evaporation_alpha: bool,
}

impl From<SpreadWeightingDef> for SpreadWeighting {
    fn from(def: SpreadWeightingDef) -> Self {
        Self {
            scale_condensation_no_alpha: def.scale_condensation_no_alpha,
            scale_evaporation_alpha: def.scale_evaporation_alpha,
        }
    }
}

/// Diagnostics of one spread channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelSpread {
    /// Integral of the source before smoothing
    pub reference: f64,
    pub psi_integral: f64,
    /// `sum alpha psi V` over bulk liquid cells
    pub liquid_integral: f64,
    /// `sum (1 - alpha) psi V` over bulk vapor cells
    pub vapor_integral: f64,
    pub nl: f64,
    pub nv: f64,
    pub iterations: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadReport {
    pub n: f64,
    /// `N` fell back to [`DEGENERATE_NORMALIZATION`]
    pub n_degenerate: bool,
    /// Screened Poisson diffusivity [m^2]
    pub diffusivity: f64,
    pub condensation: Option<ChannelSpread>,
    pub evaporation: Option<ChannelSpread>,
}

impl SpreadReport {
    pub fn channel(&self, channel: Channel) -> Option<&ChannelSpread> {
        match channel {
            Channel::Condensation => self.condensation.as_ref(),
            Channel::Evaporation => self.evaporation.as_ref(),
        }
    }
}

pub struct HardtWondra {
    spread: f64,
    cutoff: f64,
    weighting: SpreadWeighting,
    solver: Box<dyn LinearSolver>,
}

impl std::fmt::Debug for HardtWondra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HardtWondra")
            .field("spread", &self.spread)
            .field("cutoff", &self.cutoff)
            .field("weighting", &self.weighting)
            .field("solver", &self.solver.name())
            .finish()
    }
}

impl HardtWondra {
    pub fn new(spread: f64, cutoff: f64, weighting: SpreadWeighting) -> Self {
        Self {
            spread,
            cutoff,
            weighting,
            solver: Box::new(PcgSolver::default()),
        }
    }

    pub fn from_def(def: &PhaseChangeDef) -> Self {
        Self::new(def.spread, def.cutoff, def.spread_weighting.into())
    }

    pub fn with_solver(mut self, solver: Box<dyn LinearSolver>) -> Self {
        self.solver = solver;
        self
    }

    /// Take new spread width, cutoff and weighting; the solver is kept.
    pub fn reconfigure(&mut self, def: &PhaseChangeDef) {
        self.spread = def.spread;
        self.cutoff = def.cutoff;
        self.weighting = def.spread_weighting.into();
    }

    pub fn spread_width(&self) -> f64 {
        self.spread
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn weighting(&self) -> SpreadWeighting {
        self.weighting
    }

    /// Spread the `alpha` representation of every enabled channel in place.
    pub fn spread(
        &self,
        mesh: &dyn FvMesh,
        reduction: &dyn Reduction,
        cache: &InterfaceCache,
        fluxes: &mut MassFluxes,
        switches: Switches,
    ) -> PhaseChangeResult<SpreadReport> {
        let delta = fvc::average_delta_coeff(mesh, reduction);
        let diffusivity = if delta > 0.0 {
            self.spread / (delta * delta)
        } else {
            0.0
        };

        let alpha = cache.limited_alpha();
        let mag_grad = cache.mag_grad_alpha();
        let int_psi0 = fvc::domain_integrate(mesh, reduction, mag_grad)?;
        let weighted = ScalarField::new(
            "limitedAlpha1*magGrad",
            alpha.iter().zip(mag_grad.iter()).map(|(a, g)| a * g).collect(),
        );
        let int_alpha_psi0 = fvc::domain_integrate(mesh, reduction, &weighted)?;
        let (n, n_degenerate) = guarded_ratio(int_psi0, int_alpha_psi0, DEGENERATE_NORMALIZATION);
        if n_degenerate {
            debug!(
                int_alpha_psi0,
                "No interface found; using default spreading normalization {DEGENERATE_NORMALIZATION}"
            );
        }

        let mut report = SpreadReport {
            n,
            n_degenerate,
            diffusivity,
            condensation: None,
            evaporation: None,
        };

        if switches.condensation {
            let cond = &mut fluxes.condensation;
            cond.alpha.scale(n);
            cond.no_t.scale(n);
            if self.weighting.scale_condensation_no_alpha {
                cond.no_alpha.scale(n);
            }
            report.condensation =
                Some(self.redistribute(mesh, reduction, cache, diffusivity, &mut cond.alpha)?);
        }

        if switches.evaporation {
            let evap = &mut fluxes.evaporation;
            evap.no_alpha.scale(n);
            evap.no_t.scale(n);
            if self.weighting.scale_evaporation_alpha {
                evap.alpha.scale(n);
            }
            report.evaporation =
                Some(self.redistribute(mesh, reduction, cache, diffusivity, &mut evap.alpha)?);
        }

        debug!(
            n,
            diffusivity,
            cond = ?report.condensation.map(|c| (c.nl, c.nv, c.iterations)),
            evap = ?report.evaporation.map(|c| (c.nl, c.nv, c.iterations)),
            "Spread phase-change sources"
        );
        Ok(report)
    }

    fn redistribute(
        &self,
        mesh: &dyn FvMesh,
        reduction: &dyn Reduction,
        cache: &InterfaceCache,
        diffusivity: f64,
        source: &mut ScalarField,
    ) -> PhaseChangeResult<ChannelSpread> {
        let n_cells = mesh.n_cells();
        let alpha = cache.limited_alpha();
        let reference = fvc::domain_integrate(mesh, reduction, source)?;

        let system = fvm::helmholtz(mesh, diffusivity, source)?;
        let mut psi = DVector::zeros(n_cells);
        let stats = self.solver.solve(&system.matrix, &system.rhs, &mut psi)?;

        let mut liquid = 0.0;
        let mut vapor = 0.0;
        let mut total = 0.0;
        for c in 0..n_cells {
            let v = mesh.cell_volume(c);
            total += psi[c] * v;
            match cache.region(c, self.cutoff) {
                Region::Liquid => liquid += alpha[c] * psi[c] * v,
                Region::Vapor => vapor += (1.0 - alpha[c]) * psi[c] * v,
                Region::Interface => {}
            }
        }
        let liquid_integral = reduction.sum(liquid);
        let vapor_integral = reduction.sum(vapor);
        let psi_integral = reduction.sum(total);

        let (nl, nl_degenerate) =
            guarded_ratio(reference, liquid_integral, DEGENERATE_NORMALIZATION);
        let (nv, nv_degenerate) =
            guarded_ratio(reference, vapor_integral, DEGENERATE_NORMALIZATION);
        if nl_degenerate || nv_degenerate {
            debug!(
                liquid_integral,
                vapor_integral, "Degenerate bulk integral; using default side normalization"
            );
        }

        for c in 0..n_cells {
            source[c] = match cache.region(c, self.cutoff) {
                Region::Liquid => nl * alpha[c] * psi[c],
                Region::Vapor => -nv * (1.0 - alpha[c]) * psi[c],
                Region::Interface => 0.0,
            };
        }

        Ok(ChannelSpread {
            reference,
            psi_integral,
            liquid_integral,
            vapor_integral,
            nl,
            nv,
            iterations: stats.iterations,
        })
    }
}
