// hn-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, Power as UomPower, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, VolumeRate as UomVolumeRate,
};

// Quantities accepted at equipment constructor boundaries (SI, f64)
pub type Length = UomLength;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type VolumeRate = UomVolumeRate;

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
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Pipe tables are in millimetres.
#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

/// Display conversions used by reports.
pub mod display {
    use super::*;

    #[inline]
    pub fn bar(p_pa: f64) -> f64 {
        use uom::si::pressure::bar;
        pa(p_pa).get::<bar>()
    }

    #[inline]
    pub fn liters_per_minute(q_m3ps: f64) -> f64 {
        use uom::si::volume_rate::liter_per_minute;
        m3ps(q_m3ps).get::<liter_per_minute>()
    }

    #[inline]
    pub fn celsius(t_k: f64) -> f64 {
        use uom::si::thermodynamic_temperature::degree_celsius;
        k(t_k).get::<degree_celsius>()
    }
}

pub mod constants {
    /// Gravitational acceleration used by static-head and pump-head laws.
    pub const G_MPS2: f64 = 9.81;

    /// Standard atmosphere.
    pub const P_ATM_PA: f64 = 101_325.0;

    /// 20 °C, the reference ambient temperature.
    pub const T_AMBIENT_K: f64 = 293.15;
}
