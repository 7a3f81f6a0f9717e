use crate::input::{HeatDistribution, SizingInput};
use serde::Serialize;
use strum_macros::Display;

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Machine-readable advisory identifiers. The presentation string lives in
/// [`AdvisoryKey::message`] so report and GUI render the same advisory
/// without any string surgery.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKey {
    CommercialHotWaterDemand,
    FlowTemperatureOptimal,
    HighTemperatureRefrigerantRecommended,
    HighTemperatureRefrigerantRequired,
    RenovationRequired,
    UnderfloorFlowTemperatureCheck,
}

impl AdvisoryKey {
    pub fn severity(&self) -> Severity {
        match self {
            Self::CommercialHotWaterDemand
            | Self::FlowTemperatureOptimal
            | Self::HighTemperatureRefrigerantRecommended
            | Self::HighTemperatureRefrigerantRequired => Severity::Info,
            Self::UnderfloorFlowTemperatureCheck => Severity::Warning,
            Self::RenovationRequired => Severity::Critical,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::CommercialHotWaterDemand => {
                "Floor area above 300 m²: commercial-scale hot water demand should be checked separately."
            }
            Self::FlowTemperatureOptimal => {
                "Flow temperature is in the optimal range for heat pump operation."
            }
            Self::HighTemperatureRefrigerantRecommended => {
                "High flow temperature: a high-temperature refrigerant (R290/R744) is recommended."
            }
            Self::HighTemperatureRefrigerantRequired => {
                "Very high flow temperature: a high-temperature refrigerant (R290/R744) is required."
            }
            Self::RenovationRequired => {
                "Flow temperatures above 75°C cannot be served by a heat pump; the building needs renovation first."
            }
            Self::UnderfloorFlowTemperatureCheck => {
                "Flow temperatures above 50°C with underfloor heating: check the distribution system's limits."
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Advisory {
    pub key: AdvisoryKey,
    pub severity: Severity,
}

impl Advisory {
    fn new(key: AdvisoryKey) -> Self {
        Self {
            key,
            severity: key.severity(),
        }
    }

    pub fn message(&self) -> &'static str {
        self.key.message()
    }
}

/// Evaluates the advisory rules in their fixed order. Rules are independent
/// across categories (no deduplication, no escalation); only the
/// flow-temperature brackets are mutually exclusive.
pub fn evaluate_advisories(input: &SizingInput) -> Vec<Advisory> {
    let mut advisories = vec![];

    if input.floor_area_m2 > 300. && input.hot_water_served {
        advisories.push(Advisory::new(AdvisoryKey::CommercialHotWaterDemand));
    }

    let flow_temp_key = match input.flow_temperature {
        t if t <= 55. => AdvisoryKey::FlowTemperatureOptimal,
        t if t <= 65. => AdvisoryKey::HighTemperatureRefrigerantRecommended,
        t if t <= 75. => AdvisoryKey::HighTemperatureRefrigerantRequired,
        _ => AdvisoryKey::RenovationRequired,
    };
    advisories.push(Advisory::new(flow_temp_key));

    if input.flow_temperature > 50.
        && input.heat_distribution == HeatDistribution::UnderfloorHeating
    {
        advisories.push(Advisory::new(AdvisoryKey::UnderfloorFlowTemperatureCheck));
    }

    advisories
}

/// Advisories of one severity, preserving evaluation order.
pub fn with_severity(advisories: &[Advisory], severity: Severity) -> Vec<Advisory> {
    advisories
        .iter()
        .filter(|advisory| advisory.severity == severity)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::input;
    use crate::input::SizingInput;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn keys(advisories: &[Advisory]) -> Vec<AdvisoryKey> {
        advisories.iter().map(|advisory| advisory.key).collect()
    }

    #[rstest]
    fn optimal_flow_temperature_yields_a_single_info(input: SizingInput) {
        let advisories = evaluate_advisories(&input);
        assert_eq!(keys(&advisories), vec![AdvisoryKey::FlowTemperatureOptimal]);
        assert_eq!(advisories[0].severity, Severity::Info);
    }

    #[rstest]
    #[case(55., AdvisoryKey::FlowTemperatureOptimal)]
    #[case(60., AdvisoryKey::HighTemperatureRefrigerantRecommended)]
    #[case(65., AdvisoryKey::HighTemperatureRefrigerantRecommended)]
    #[case(70., AdvisoryKey::HighTemperatureRefrigerantRequired)]
    #[case(75., AdvisoryKey::HighTemperatureRefrigerantRequired)]
    fn flow_temperature_brackets_are_mutually_exclusive(
        mut input: SizingInput,
        #[case] flow_temperature: f64,
        #[case] expected: AdvisoryKey,
    ) {
        input.flow_temperature = flow_temperature;
        let advisories = evaluate_advisories(&input);
        assert_eq!(keys(&advisories), vec![expected]);
    }

    #[rstest]
    fn above_75_degrees_produces_exactly_one_critical(mut input: SizingInput) {
        input.flow_temperature = 80.;
        let advisories = evaluate_advisories(&input);
        let critical = with_severity(&advisories, Severity::Critical);
        assert_eq!(keys(&critical), vec![AdvisoryKey::RenovationRequired]);
    }

    #[rstest]
    fn underfloor_above_50_degrees_warns_alongside_the_bracket_info(mut input: SizingInput) {
        input.flow_temperature = 60.;
        input.heat_distribution = HeatDistribution::UnderfloorHeating;
        let advisories = evaluate_advisories(&input);
        assert_eq!(
            keys(&advisories),
            vec![
                AdvisoryKey::HighTemperatureRefrigerantRecommended,
                AdvisoryKey::UnderfloorFlowTemperatureCheck,
            ]
        );
        assert_eq!(
            with_severity(&advisories, Severity::Warning).len(),
            1
        );
    }

    #[rstest]
    fn large_area_with_hot_water_adds_the_commercial_info_first(mut input: SizingInput) {
        input.floor_area_m2 = 400.;
        input.hot_water_served = true;
        input.occupants = 6;
        let advisories = evaluate_advisories(&input);
        assert_eq!(advisories[0].key, AdvisoryKey::CommercialHotWaterDemand);
    }

    #[rstest]
    fn large_area_without_hot_water_stays_quiet(mut input: SizingInput) {
        input.floor_area_m2 = 400.;
        input.hot_water_served = false;
        let advisories = evaluate_advisories(&input);
        assert_eq!(keys(&advisories), vec![AdvisoryKey::FlowTemperatureOptimal]);
    }
}
