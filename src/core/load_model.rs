use crate::core::units::{hot_water_kw_per_person, HOURS_PER_DAY, WATTS_PER_KILOWATT};
use crate::errors::SizingError;
use crate::input::SizingInput;
use serde::Serialize;

/// Steady-state design load split into its constituents, all in kW. Derived
/// purely from a [`SizingInput`]; there is no hidden state and no I/O.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LoadBreakdown {
    /// Building heat loss at the design temperature, before the blocked-time
    /// correction.
    pub building_base_kw: f64,
    /// Building load scaled up so the reduced daily runtime can still cover
    /// the full daily heat demand.
    pub building_corrected_kw: f64,
    /// Difference between corrected and base building load. Only used for
    /// the breakdown chart and the report table.
    pub blocked_time_surcharge_kw: f64,
    /// Domestic hot water addend, zero when hot water is not served.
    pub hot_water_kw: f64,
    /// Recommended heating capacity at the design temperature.
    pub total_kw: f64,
    /// Daily hours the heat pump is allowed to run.
    pub runtime_hours: u32,
    /// 24h spread over the available runtime, in [1.0, 2.0] for valid input.
    pub blocked_time_factor: f64,
}

impl LoadBreakdown {
    pub fn calculate(input: &SizingInput) -> Result<Self, SizingError> {
        let runtime_hours = input.runtime_hours();
        if runtime_hours == 0 {
            return Err(SizingError::BlockedHoursExhaustRuntime {
                blocked_hours: input.blocked_hours,
            });
        }

        let building_base_kw =
            input.floor_area_m2 * input.specific_load_w_per_m2 / WATTS_PER_KILOWATT as f64;
        let hot_water_kw = input.effective_occupants() as f64 * hot_water_kw_per_person();
        let blocked_time_factor = HOURS_PER_DAY as f64 / runtime_hours as f64;
        let building_corrected_kw = building_base_kw * blocked_time_factor;

        Ok(Self {
            building_base_kw,
            building_corrected_kw,
            blocked_time_surcharge_kw: building_corrected_kw - building_base_kw,
            hot_water_kw,
            total_kw: building_corrected_kw + hot_water_kw,
            runtime_hours,
            blocked_time_factor,
        })
    }
}
