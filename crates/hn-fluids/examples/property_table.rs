//! Print density and viscosity of every fluid over a temperature sweep.

use hn_core::units::display::celsius;
use hn_fluids::{FluidType, properties};

fn main() {
    println!("{:<10} {:>8} {:>12} {:>14}", "fluid", "T [°C]", "ρ [kg/m³]", "μ [mPa·s]");
    for fluid in FluidType::ALL {
        for t_k in [283.15, 293.15, 313.15, 333.15, 373.15] {
            match properties(fluid, t_k) {
                Ok(p) => println!(
                    "{:<10} {:>8.1} {:>12.2} {:>14.3}",
                    fluid.key(),
                    celsius(t_k),
                    p.density,
                    p.viscosity * 1e3
                ),
                Err(e) => println!("{:<10} {:>8.1} error: {e}", fluid.key(), celsius(t_k)),
            }
        }
    }
}
