//! Fluid type definitions.

/// Liquids known to the property model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FluidType {
    /// Fresh water
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "water"))]
    Water,
    /// ISO VG 46 mineral lubricating oil
    #[cfg_attr(feature = "serde", serde(rename = "iso_vg_46"))]
    IsoVg46,
    /// ISO VG 32 mineral lubricating oil
    #[cfg_attr(feature = "serde", serde(rename = "iso_vg_32"))]
    IsoVg32,
    /// Unrecognized fluid: constant water-like properties at 20 °C
    #[cfg_attr(feature = "serde", serde(rename = "generic"))]
    Generic,
}

impl FluidType {
    pub const ALL: [FluidType; 4] = [
        FluidType::Water,
        FluidType::IsoVg46,
        FluidType::IsoVg32,
        FluidType::Generic,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FluidType::Water => "water",
            FluidType::IsoVg46 => "iso_vg_46",
            FluidType::IsoVg32 => "iso_vg_32",
            FluidType::Generic => "generic",
        }
    }

    /// Resolve a fluid key, falling back to [`FluidType::Generic`] when the key
    /// is not recognized.
    ///
    /// Equipment created in an editor is frequently left with a placeholder
    /// fluid, so an unknown key never fails; it is logged at `warn` level.
    pub fn from_key(key: &str) -> Self {
        match key.parse() {
            Ok(fluid) => fluid,
            Err(_) => {
                tracing::warn!(
                    fluid = key,
                    "unknown fluid type, using generic water-like properties"
                );
                FluidType::Generic
            }
        }
    }
}

impl std::fmt::Display for FluidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for FluidType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "water" | "h2o" => Ok(FluidType::Water),
            "iso_vg_46" | "iso_vg46" | "vg46" => Ok(FluidType::IsoVg46),
            "iso_vg_32" | "iso_vg32" | "vg32" => Ok(FluidType::IsoVg32),
            "generic" => Ok(FluidType::Generic),
            _ => Err("unknown fluid type"),
        }
    }
}
