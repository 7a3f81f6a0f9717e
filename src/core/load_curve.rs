use crate::core::load_model::LoadBreakdown;
use crate::core::units::{
    CURVE_UPPER_TEMPERATURE, HEATING_LIMIT_TEMPERATURE, TRANSITION_SEASON_TEMPERATURE,
};
use crate::errors::SizingError;
use serde::Serialize;

/// The interactive chart and the report chart share the same curve but show
/// a slightly different temperature margin below the design point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CurveView {
    Interactive,
    Report,
}

impl CurveView {
    fn margin(&self) -> f64 {
        match self {
            Self::Interactive => 5.0,
            Self::Report => 2.0,
        }
    }

    fn samples(&self) -> usize {
        match self {
            Self::Interactive => 100,
            Self::Report => 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Outdoor temperature in °C.
    pub temperature: f64,
    /// Heat demand at that temperature, in kW.
    pub load_kw: f64,
}

/// Heat demand at outdoor temperature `t`: linear between the design point
/// and the hot-water floor at the heating limit, constant above it.
///
/// A design temperature at or above the heating limit would make the
/// interpolation degenerate and is rejected outright rather than clamped.
pub fn load_at_temperature(
    breakdown: &LoadBreakdown,
    design_temperature: f64,
    t: f64,
) -> Result<f64, SizingError> {
    ensure_below_heating_limit(design_temperature)?;
    Ok(if t < HEATING_LIMIT_TEMPERATURE {
        breakdown.building_corrected_kw * (HEATING_LIMIT_TEMPERATURE - t)
            / (HEATING_LIMIT_TEMPERATURE - design_temperature)
            + breakdown.hot_water_kw
    } else {
        breakdown.hot_water_kw
    })
}

/// Evenly spaced samples from `design_temperature - margin` up to +20°C.
pub fn sample_curve(
    breakdown: &LoadBreakdown,
    design_temperature: f64,
    view: CurveView,
) -> Result<Vec<CurvePoint>, SizingError> {
    ensure_below_heating_limit(design_temperature)?;
    let start = design_temperature - view.margin();
    let step = (CURVE_UPPER_TEMPERATURE - start) / (view.samples() - 1) as f64;
    (0..view.samples())
        .map(|i| {
            let temperature = start + i as f64 * step;
            Ok(CurvePoint {
                temperature,
                load_kw: load_at_temperature(breakdown, design_temperature, temperature)?,
            })
        })
        .collect()
}

/// Part-load figure at the typical transition-season temperature (+7°C),
/// shown next to the interactive curve.
pub fn transition_season_load(
    breakdown: &LoadBreakdown,
    design_temperature: f64,
) -> Result<f64, SizingError> {
    load_at_temperature(breakdown, design_temperature, TRANSITION_SEASON_TEMPERATURE)
}

fn ensure_below_heating_limit(design_temperature: f64) -> Result<(), SizingError> {
    if design_temperature >= HEATING_LIMIT_TEMPERATURE {
        return Err(SizingError::DegenerateDesignTemperature {
            design_temperature,
            limit: HEATING_LIMIT_TEMPERATURE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::input;
    use crate::input::SizingInput;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn breakdown(mut input: SizingInput) -> LoadBreakdown {
        input.hot_water_served = true;
        input.occupants = 3;
        LoadBreakdown::calculate(&input).unwrap()
    }

    #[rstest]
    fn full_load_at_design_temperature(breakdown: LoadBreakdown) {
        let load = load_at_temperature(&breakdown, -14., -14.).unwrap();
        assert_relative_eq!(load, breakdown.total_kw, epsilon = 1e-12);
    }

    #[rstest]
    fn curve_is_continuous_at_the_heating_limit(breakdown: LoadBreakdown) {
        let just_below = load_at_temperature(&breakdown, -14., 15. - 1e-9).unwrap();
        assert_relative_eq!(just_below, breakdown.hot_water_kw, epsilon = 1e-6);
        for t in [15., 17.5, 20.] {
            assert_eq!(
                load_at_temperature(&breakdown, -14., t).unwrap(),
                breakdown.hot_water_kw
            );
        }
    }

    #[rstest]
    fn loads_decrease_monotonically_towards_the_heating_limit(breakdown: LoadBreakdown) {
        let points = sample_curve(&breakdown, -14., CurveView::Interactive).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].load_kw <= pair[0].load_kw);
        }
    }

    #[rstest]
    #[case(CurveView::Interactive, 100, -19.)]
    #[case(CurveView::Report, 50, -16.)]
    fn sample_domain_starts_below_the_design_point(
        breakdown: LoadBreakdown,
        #[case] view: CurveView,
        #[case] samples: usize,
        #[case] start: f64,
    ) {
        let points = sample_curve(&breakdown, -14., view).unwrap();
        assert_eq!(points.len(), samples);
        assert_relative_eq!(points[0].temperature, start, epsilon = 1e-12);
        assert_relative_eq!(
            points.last().unwrap().temperature,
            CURVE_UPPER_TEMPERATURE,
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn transition_season_load_matches_direct_evaluation(breakdown: LoadBreakdown) {
        let expected = breakdown.building_corrected_kw * (15. - 7.) / (15. - -14.)
            + breakdown.hot_water_kw;
        assert_relative_eq!(
            transition_season_load(&breakdown, -14.).unwrap(),
            expected,
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn design_temperature_at_the_heating_limit_is_rejected(breakdown: LoadBreakdown) {
        assert!(matches!(
            load_at_temperature(&breakdown, 15., 10.),
            Err(SizingError::DegenerateDesignTemperature { .. })
        ));
        assert!(matches!(
            sample_curve(&breakdown, 15., CurveView::Report),
            Err(SizingError::DegenerateDesignTemperature { .. })
        ));
    }
}
