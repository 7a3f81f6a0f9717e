pub mod cockpit;
pub mod core;
mod errors;
pub mod input;
pub mod report;

pub use crate::core::advisory::{evaluate_advisories, Advisory, AdvisoryKey, Severity};
pub use crate::core::load_curve::{
    sample_curve, transition_season_load, CurvePoint, CurveView,
};
pub use crate::core::load_model::LoadBreakdown;
pub use crate::errors::SizingError;
pub use crate::input::SizingInput;

/// Everything one calculation run produces for presentation: the load
/// breakdown, the interactive-view curve samples, the transition-season
/// part-load figure and the advisories.
#[derive(Clone, Debug)]
pub struct CalculationOutcome {
    pub breakdown: LoadBreakdown,
    pub curve: Vec<CurvePoint>,
    pub transition_load_kw: f64,
    pub advisories: Vec<Advisory>,
}

/// Validates the input and evaluates the full model. Pure apart from the
/// validation error path; recomputed from scratch on every call.
pub fn run_calculation(input: &SizingInput) -> Result<CalculationOutcome, SizingError> {
    input.ensure_valid()?;
    let breakdown = LoadBreakdown::calculate(input)?;
    let curve = sample_curve(&breakdown, input.design_temperature, CurveView::Interactive)?;
    let transition_load_kw = transition_season_load(&breakdown, input.design_temperature)?;
    let advisories = evaluate_advisories(input);
    Ok(CalculationOutcome {
        breakdown,
        curve,
        transition_load_kw,
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::input;
    use approx::assert_relative_eq;
    use rstest::*;

    #[rstest]
    fn run_calculation_wires_model_curve_and_advisories_together(input: SizingInput) {
        let outcome = run_calculation(&input).unwrap();
        assert_relative_eq!(outcome.breakdown.total_kw, 12.8, epsilon = 1e-12);
        assert_eq!(outcome.curve.len(), 100);
        assert_eq!(outcome.advisories.len(), 1);
        assert!(outcome.transition_load_kw < outcome.breakdown.total_kw);
    }

    #[rstest]
    fn invalid_input_is_rejected_before_any_calculation(mut input: SizingInput) {
        input.blocked_hours = 18;
        assert!(matches!(
            run_calculation(&input),
            Err(SizingError::InvalidInput(_))
        ));
    }
}
