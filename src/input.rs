use crate::core::units::HOURS_PER_DAY;
use crate::errors::SizingError;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::ops::RangeInclusive;
use strum_macros::Display;

/// One complete set of user-entered values for a sizing run. Nothing in here
/// is mutated after entry; every derived figure is recomputed from a fresh
/// instance each time the calculation fires.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SizingInput {
    /// Project or client name, free text. Used in the report header and the
    /// download filename.
    #[serde(default)]
    pub project: String,
    /// Combined editor field. An optional company name can be appended after
    /// a slash ("Jane Doe / Example GmbH").
    #[serde(default)]
    pub editor: String,
    #[validate(minimum = 50.)]
    #[validate(maximum = 2000.)]
    pub floor_area_m2: f64,
    pub insulation_standard: InsulationStandard,
    /// Specific heat load in W/m². Defaulted from the insulation standard,
    /// but the user may override it.
    #[validate(minimum = 10.)]
    #[validate(maximum = 300.)]
    pub specific_load_w_per_m2: f64,
    /// Daily utility-mandated blocked operation hours.
    #[validate(maximum = 12)]
    pub blocked_hours: u32,
    /// Design (norm) outdoor temperature in °C.
    #[validate(minimum = -25.)]
    #[validate(maximum = 0.)]
    pub design_temperature: f64,
    /// Maximum flow temperature of the distribution system in °C.
    #[validate(minimum = 30.)]
    #[validate(maximum = 80.)]
    pub flow_temperature: f64,
    pub heat_distribution: HeatDistribution,
    /// Whether domestic hot water is served by this heat pump.
    pub hot_water_served: bool,
    #[validate(maximum = 20)]
    #[serde(default)]
    pub occupants: u32,
    pub backup_mode: BackupMode,
    /// Outdoor temperature at/below which the backup source activates, in °C.
    /// The valid range depends on the backup mode.
    pub bivalence_temperature: f64,
}

impl SizingInput {
    /// Checks field ranges and the mode-dependent bivalence range. The input
    /// widgets already clamp to these ranges; the library surface is public,
    /// so the checks live here too.
    pub fn ensure_valid(&self) -> Result<(), SizingError> {
        self.validate().map_err(|errors| {
            SizingError::InvalidInput(
                serde_json::to_string(&errors).unwrap_or_else(|_| "validation failed".to_owned()),
            )
        })?;
        let range = self.backup_mode.bivalence_range();
        if !range.contains(&self.bivalence_temperature) {
            return Err(SizingError::BivalenceOutOfRange {
                mode: self.backup_mode,
                value: self.bivalence_temperature,
                min: *range.start(),
                max: *range.end(),
            });
        }
        Ok(())
    }

    /// Occupant count as used by the load model. A disabled hot-water toggle
    /// forces this to zero regardless of the entered count.
    pub fn effective_occupants(&self) -> u32 {
        if self.hot_water_served {
            self.occupants
        } else {
            0
        }
    }

    pub fn runtime_hours(&self) -> u32 {
        HOURS_PER_DAY.saturating_sub(self.blocked_hours)
    }

    /// Editor name, i.e. the part of the editor field before any slash.
    pub fn editor_name(&self) -> &str {
        match self.editor.split_once('/') {
            Some((name, _)) => name.trim(),
            None => self.editor.trim(),
        }
    }

    /// Company name appended to the editor field after a slash, if any.
    pub fn company(&self) -> Option<&str> {
        self.editor
            .split_once('/')
            .map(|(_, company)| company.trim())
            .filter(|company| !company.is_empty())
    }

    pub fn project_or_placeholder(&self) -> &str {
        let project = self.project.trim();
        if project.is_empty() {
            "Unbenannt"
        } else {
            project
        }
    }
}

/// Named insulation-standard categories, each mapped to a default specific
/// heat load. The user may override the mapped value.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InsulationStandard {
    #[strum(to_string = "Unrenovated pre-1980 (single glazing)")]
    UnrenovatedPre1980,
    #[strum(to_string = "Partially renovated (new windows/double glazing)")]
    PartiallyRenovated,
    #[strum(to_string = "Standard stock 1990-2000 (partial insulation)")]
    Stock1990To2000,
    #[strum(to_string = "New build / well insulated (post-2010)")]
    NewBuildPost2010,
    #[strum(to_string = "KfW efficiency house / passive house")]
    PassiveHouse,
}

impl InsulationStandard {
    /// Default specific heat load for the category, in W/m².
    pub fn default_specific_load(&self) -> f64 {
        match self {
            Self::UnrenovatedPre1980 => 150.,
            Self::PartiallyRenovated => 100.,
            Self::Stock1990To2000 => 60.,
            Self::NewBuildPost2010 => 50.,
            Self::PassiveHouse => 30.,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HeatDistribution {
    #[strum(to_string = "Underfloor heating")]
    UnderfloorHeating,
    #[strum(to_string = "Radiators")]
    Radiators,
    #[strum(to_string = "Mixed (underfloor + radiators)")]
    Mixed,
    #[strum(to_string = "Air heating/ventilation")]
    AirHeating,
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BackupMode {
    #[strum(to_string = "monoenergetic")]
    Monoenergetic,
    #[strum(to_string = "bivalent")]
    Bivalent,
}

impl BackupMode {
    /// Valid bivalence-temperature range for the mode, in °C.
    pub fn bivalence_range(&self) -> RangeInclusive<f64> {
        match self {
            Self::Monoenergetic => -20.0..=0.0,
            Self::Bivalent => -10.0..=10.0,
        }
    }

    /// Human-readable name of the backup heat source.
    pub fn backup_source(&self) -> &'static str {
        match self {
            Self::Monoenergetic => "Immersion heater",
            Self::Bivalent => "Boiler (existing)",
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    pub fn input() -> SizingInput {
        SizingInput {
            project: "Elke Muster".into(),
            editor: "Jane Doe / Example GmbH".into(),
            floor_area_m2: 160.,
            insulation_standard: InsulationStandard::Stock1990To2000,
            specific_load_w_per_m2: 60.,
            blocked_hours: 6,
            design_temperature: -14.,
            flow_temperature: 55.,
            heat_distribution: HeatDistribution::Radiators,
            hot_water_served: false,
            occupants: 0,
            backup_mode: BackupMode::Monoenergetic,
            bivalence_temperature: -15.,
        }
    }

    #[rstest]
    fn valid_input_passes(input: SizingInput) {
        assert!(input.ensure_valid().is_ok());
    }

    #[rstest]
    fn editor_field_splits_on_slash(input: SizingInput) {
        assert_eq!(input.editor_name(), "Jane Doe");
        assert_eq!(input.company(), Some("Example GmbH"));
    }

    #[rstest]
    fn editor_field_without_slash_has_no_company(mut input: SizingInput) {
        input.editor = "Jane Doe".into();
        assert_eq!(input.editor_name(), "Jane Doe");
        assert_eq!(input.company(), None);
    }

    #[rstest]
    fn empty_project_falls_back_to_placeholder(mut input: SizingInput) {
        input.project = "  ".into();
        assert_eq!(input.project_or_placeholder(), "Unbenannt");
    }

    #[rstest]
    fn disabled_hot_water_forces_zero_occupants(mut input: SizingInput) {
        input.hot_water_served = false;
        input.occupants = 4;
        assert_eq!(input.effective_occupants(), 0);
    }

    #[rstest]
    fn out_of_range_area_is_rejected(mut input: SizingInput) {
        input.floor_area_m2 = 25.;
        assert!(matches!(
            input.ensure_valid(),
            Err(SizingError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case(BackupMode::Monoenergetic, -15., true)]
    #[case(BackupMode::Monoenergetic, 5., false)]
    #[case(BackupMode::Bivalent, 5., true)]
    #[case(BackupMode::Bivalent, -15., false)]
    fn bivalence_range_depends_on_backup_mode(
        mut input: SizingInput,
        #[case] mode: BackupMode,
        #[case] bivalence: f64,
        #[case] valid: bool,
    ) {
        input.backup_mode = mode;
        input.bivalence_temperature = bivalence;
        assert_eq!(input.ensure_valid().is_ok(), valid);
    }

    #[rstest]
    fn insulation_standards_map_to_default_loads() {
        assert_eq!(
            InsulationStandard::UnrenovatedPre1980.default_specific_load(),
            150.
        );
        assert_eq!(InsulationStandard::PassiveHouse.default_specific_load(), 30.);
    }

    #[rstest]
    fn input_round_trips_through_json(input: SizingInput) {
        let json = serde_json::to_string(&input).unwrap();
        let back: SizingInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.floor_area_m2, input.floor_area_m2);
        assert_eq!(back.backup_mode, input.backup_mode);
    }
}
