pub const WATTS_PER_KILOWATT: u32 = 1_000;
pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_YEAR: u32 = 365;

/// Outdoor temperature above which a building needs no space heating, in °C.
pub const HEATING_LIMIT_TEMPERATURE: f64 = 15.0;

/// Typical transition-season outdoor temperature, in °C, reported as a
/// part-load reference point alongside the load curve.
pub const TRANSITION_SEASON_TEMPERATURE: f64 = 7.0;

/// Upper end of the temperature axis for load curves, in °C.
pub const CURVE_UPPER_TEMPERATURE: f64 = 20.0;

// Domestic hot water demand assumptions: two draw-off cycles per person per
// day at 1.45 kWh each, converted to average power over the annual full-load
// hours a heat pump is sized against.
pub(crate) const HOT_WATER_KWH_PER_CYCLE: f64 = 1.45;
pub(crate) const HOT_WATER_CYCLES_PER_DAY: f64 = 2.0;
pub(crate) const ANNUAL_FULL_LOAD_HOURS: f64 = 2_400.;

/// Average power addend per person served with domestic hot water, in kW.
pub fn hot_water_kw_per_person() -> f64 {
    HOT_WATER_KWH_PER_CYCLE * HOT_WATER_CYCLES_PER_DAY * DAYS_PER_YEAR as f64
        / ANNUAL_FULL_LOAD_HOURS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hot_water_factor_matches_annual_demand_conversion() {
        assert_relative_eq!(hot_water_kw_per_person(), 0.441_041_666_6, epsilon = 1e-9);
    }
}
