//! Volumetric mass-flux fields in the representations each equation consumes.
//!
//! Sign convention: condensation rates are non-negative, evaporation rates
//! non-positive.

use pc_mesh::ScalarField;

/// Which transfer channels are switched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switches {
    pub condensation: bool,
    pub evaporation: bool,
}

impl Switches {
    pub fn enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Condensation => self.condensation,
            Channel::Evaporation => self.evaporation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Condensation,
    Evaporation,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Condensation, Channel::Evaporation];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Condensation => "condensation",
            Channel::Evaporation => "evaporation",
        }
    }
}

/// One physical rate held three ways.
///
/// - `no_alpha`: the rate itself, used as the volume-fraction coefficient
/// - `alpha`: the rate weighted by `1 - alpha` (condensation) or `alpha`
///   (evaporation), consumed by the pressure equation
/// - `no_t`: the rate per unit `T - TSat`, consumed by the energy equation
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelFluxes {
    pub no_alpha: ScalarField,
    pub alpha: ScalarField,
    pub no_t: ScalarField,
}

impl ChannelFluxes {
    fn new(prefix: &str, n_cells: usize) -> Self {
        Self {
            no_alpha: ScalarField::zeros(format!("{prefix}NoAlphal"), n_cells),
            alpha: ScalarField::zeros(format!("{prefix}Alphal"), n_cells),
            no_t: ScalarField::zeros(format!("{prefix}NoTmTSat"), n_cells),
        }
    }

    pub fn clear(&mut self) {
        self.no_alpha.fill(0.0);
        self.alpha.fill(0.0);
        self.no_t.fill(0.0);
    }

    pub fn all_finite(&self) -> bool {
        self.no_alpha.all_finite() && self.alpha.all_finite() && self.no_t.all_finite()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MassFluxes {
    pub condensation: ChannelFluxes,
    pub evaporation: ChannelFluxes,
}

impl MassFluxes {
    pub fn new(n_cells: usize) -> Self {
        Self {
            condensation: ChannelFluxes::new("mCond", n_cells),
            evaporation: ChannelFluxes::new("mEvap", n_cells),
        }
    }

    pub fn n_cells(&self) -> usize {
        self.condensation.alpha.len()
    }

    pub fn channel(&self, channel: Channel) -> &ChannelFluxes {
        match channel {
            Channel::Condensation => &self.condensation,
            Channel::Evaporation => &self.evaporation,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut ChannelFluxes {
        match channel {
            Channel::Condensation => &mut self.condensation,
            Channel::Evaporation => &mut self.evaporation,
        }
    }

    pub fn clear(&mut self) {
        self.condensation.clear();
        self.evaporation.clear();
    }

    /// Zero every representation of each switched-off channel.
    pub fn zero_disabled(&mut self, switches: Switches) {
        for channel in Channel::ALL {
            if !switches.enabled(channel) {
                self.channel_mut(channel).clear();
            }
        }
    }
}

/// Interfacial mass fluxes [kg/m^2/s], both non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceFluxes {
    pub jc: ScalarField,
    pub je: ScalarField,
}

impl InterfaceFluxes {
    pub fn new(n_cells: usize) -> Self {
        Self {
            jc: ScalarField::zeros("jc", n_cells),
            je: ScalarField::zeros("je", n_cells),
        }
    }

    pub fn zero_disabled(&mut self, switches: Switches) {
        if !switches.condensation {
            self.jc.fill(0.0);
        }
        if !switches.evaporation {
            self.je.fill(0.0);
        }
    }
}
