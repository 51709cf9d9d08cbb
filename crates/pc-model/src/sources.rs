//! Equation source terms split into implicit and explicit parts.
//!
//! A pair contributes `Sp * x + Su` to the equation for `x`.

use crate::fluxes::MassFluxes;
use pc_mesh::ScalarField;

#[derive(Clone, Debug, PartialEq)]
pub struct SourcePair {
    pub sp: ScalarField,
    pub su: ScalarField,
}

impl SourcePair {
    fn new(eqn: &str, n_cells: usize) -> Self {
        Self {
            sp: ScalarField::zeros(format!("{eqn}SourceSp"), n_cells),
            su: ScalarField::zeros(format!("{eqn}SourceSu"), n_cells),
        }
    }

    pub fn all_finite(&self) -> bool {
        self.sp.all_finite() && self.su.all_finite()
    }

    /// Total contribution `Sp * x + Su` in one cell.
    pub fn apply(&self, cell: usize, x: f64) -> f64 {
        self.sp[cell] * x + self.su[cell]
    }
}

/// Source pairs for the volume-fraction, pressure and temperature equations.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceTerms {
    pub alpha: SourcePair,
    pub p: SourcePair,
    pub t: SourcePair,
}

impl SourceTerms {
    pub fn new(n_cells: usize) -> Self {
        Self {
            alpha: SourcePair::new("alpha", n_cells),
            p: SourcePair::new("p", n_cells),
            t: SourcePair::new("T", n_cells),
        }
    }

    pub fn all_finite(&self) -> bool {
        self.alpha.all_finite() && self.p.all_finite() && self.t.all_finite()
    }
}

/// `Sp = (evap - cond) / rho1`, `Su = cond / rho1` on the `no_alpha` rates.
pub fn implicit_alpha_source(fluxes: &MassFluxes, rho1: f64, out: &mut SourcePair) {
    let cond = fluxes.condensation.no_alpha.values();
    let evap = fluxes.evaporation.no_alpha.values();
    for c in 0..cond.len() {
        out.sp[c] = (evap[c] - cond[c]) / rho1;
        out.su[c] = cond[c] / rho1;
    }
}

/// `Sp = 0`, `Su = (cond + evap) / rho1` on the `alpha` rates.
pub fn explicit_alpha_source(fluxes: &MassFluxes, rho1: f64, out: &mut SourcePair) {
    out.sp.fill(0.0);
    let cond = fluxes.condensation.alpha.values();
    let evap = fluxes.evaporation.alpha.values();
    for c in 0..cond.len() {
        out.su[c] = (cond[c] + evap[c]) / rho1;
    }
}

/// Volume dilatation of the transferred mass, fully explicit.
///
/// An implicit pressure coupling drives the interface velocity to zero.
pub fn dilatation_source(fluxes: &MassFluxes, rho1: f64, rho2: f64, out: &mut SourcePair) {
    out.sp.fill(0.0);
    let factor = 1.0 / rho1 - 1.0 / rho2;
    let cond = fluxes.condensation.alpha.values();
    let evap = fluxes.evaporation.alpha.values();
    for c in 0..cond.len() {
        out.su[c] = (cond[c] + evap[c]) * factor;
    }
}

/// `Sp = hEvap (cond - evap) <= 0` on the `no_t` rates, `Su = -Sp TSat`.
pub fn implicit_temperature_source(
    fluxes: &MassFluxes,
    h_evap: f64,
    t_sat: &ScalarField,
    out: &mut SourcePair,
) {
    let cond = fluxes.condensation.no_t.values();
    let evap = fluxes.evaporation.no_t.values();
    for c in 0..cond.len() {
        let sp = h_evap * (cond[c] - evap[c]);
        out.sp[c] = sp;
        out.su[c] = -sp * t_sat[c];
    }
}

/// Latent heat of the transferred mass, fully explicit.
pub fn explicit_temperature_source(fluxes: &MassFluxes, h_evap: f64, out: &mut SourcePair) {
    out.sp.fill(0.0);
    let cond = fluxes.condensation.alpha.values();
    let evap = fluxes.evaporation.alpha.values();
    for c in 0..cond.len() {
        out.su[c] = h_evap * (cond[c] + evap[c]);
    }
}
