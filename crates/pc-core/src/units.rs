// pc-core/src/units.rs

use uom::si::f64::{
    AvailableEnergy as UomAvailableEnergy, MassDensity as UomMassDensity,
    Pressure as UomPressure, SpecificHeatCapacity as UomSpecificHeatCapacity,
    ThermalConductivity as UomThermalConductivity,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type GasConstant = UomSpecificHeatCapacity;
pub type HeatCapacity = UomSpecificHeatCapacity;
pub type LatentHeat = UomAvailableEnergy;
pub type Pressure = UomPressure;
pub type Conductivity = UomThermalConductivity;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn j_per_kg(v: f64) -> LatentHeat {
    use uom::si::available_energy::joule_per_kilogram;
    LatentHeat::new::<joule_per_kilogram>(v)
}

#[inline]
pub fn j_per_kg_k(v: f64) -> HeatCapacity {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    HeatCapacity::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn w_per_m_k(v: f64) -> Conductivity {
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;
    Conductivity::new::<watt_per_meter_kelvin>(v)
}
