//! Magnitude-aware rounding to the nearest multiple of a step.
//!
//! The quotient is formed against the step's decimal order of magnitude first,
//! `round(v / offset / scaled) * scaled * offset` with `offset = 10^(digits - 1)`,
//! so it stays close to unit scale before rounding.

use ndarray::{Array1, ArrayView1};

use crate::error::RoundError;

/// A rounding step in either floating or integral form.
///
/// The variant decides the element type of the rounded output: integral steps
/// truncate each rounded value toward zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Float(f64),
    Integer(i64),
}

impl Step {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Step::Float(s) => s,
            Step::Integer(s) => s as f64,
        }
    }

    /// Steps must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), RoundError> {
        let ok = match *self {
            Step::Float(s) => s.is_finite() && s > 0.0,
            Step::Integer(s) => s > 0,
        };
        if ok {
            Ok(())
        } else {
            Err(RoundError::InvalidParameter(format!(
                "rounding step must be finite and > 0, got {}",
                self.as_f64()
            )))
        }
    }
}

impl From<f64> for Step {
    fn from(s: f64) -> Self {
        Step::Float(s)
    }
}

impl From<i64> for Step {
    fn from(s: i64) -> Self {
        Step::Integer(s)
    }
}

/// Output of [`round_with_step`], typed after the step.
#[derive(Clone, Debug, PartialEq)]
pub enum Rounded {
    Float(Array1<f64>),
    Integer(Array1<i64>),
}

/// Number of integer digits of `step`: `ceil(log10(step + 1))`.
pub fn digit_count(step: f64) -> i32 {
    (step + 1.0).log10().ceil() as i32
}

/// Precomputed scale factors for one step.
#[derive(Clone, Copy, Debug)]
struct Scale {
    offset: f64,
    scaled_step: f64,
}

impl Scale {
    fn new(step: f64) -> Result<Self, RoundError> {
        Step::Float(step).validate()?;
        let offset = 10f64.powi(digit_count(step) - 1);
        Ok(Self {
            offset,
            scaled_step: step / offset,
        })
    }

    // Ties go to the even neighbour.
    #[inline]
    fn apply(&self, v: f64) -> f64 {
        (v / self.offset / self.scaled_step).round_ties_even() * self.scaled_step * self.offset
    }
}

/// Round every value in place to the nearest multiple of `step`.
pub fn round_in_place(values: &mut [f64], step: f64) -> Result<(), RoundError> {
    let scale = Scale::new(step)?;
    for v in values.iter_mut() {
        *v = scale.apply(*v);
    }
    Ok(())
}

/// Round `values` to the nearest multiple of a floating `step`.
pub fn round_to_nearest(values: ArrayView1<'_, f64>, step: f64) -> Result<Array1<f64>, RoundError> {
    let scale = Scale::new(step)?;
    Ok(values.mapv(|v| scale.apply(v)))
}

/// Round `values` to the nearest multiple of an integral `step`.
///
/// The rounded values are truncated toward zero into `i64`, so any fractional
/// remainder left by floating-point rounding is dropped.
pub fn round_to_nearest_int(
    values: ArrayView1<'_, f64>,
    step: i64,
) -> Result<Array1<i64>, RoundError> {
    Step::Integer(step).validate()?;
    let scale = Scale::new(step as f64)?;
    Ok(values.mapv(|v| scale.apply(v) as i64))
}

/// Round with a step whose kind selects the output element type.
pub fn round_with_step(
    values: ArrayView1<'_, f64>,
    step: impl Into<Step>,
) -> Result<Rounded, RoundError> {
    match step.into() {
        Step::Float(s) => round_to_nearest(values, s).map(Rounded::Float),
        Step::Integer(s) => round_to_nearest_int(values, s).map(Rounded::Integer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_digit_count() {
        let cases = [
            (1.0, 1),
            (9.0, 1),
            (10.0, 2),
            (11.0, 2),
            (99.0, 2),
            (100.0, 3),
            (101.0, 3),
            (1001.0, 4),
            (5000.0, 4),
            (13.5, 2),
            (100_001_312.0, 9),
        ];
        for (step, expected) in cases {
            assert_eq!(digit_count(step), expected, "step = {step}");
        }
    }

    #[test]
    fn test_integer_step() {
        let values = array![-60.0, -40.0, 20.0, 30.0, 1226.0];
        let rounded = round_to_nearest_int(values.view(), 50).unwrap();
        assert_eq!(rounded, array![-50, -50, 0, 50, 1250]);
    }

    #[test]
    fn test_fractional_step() {
        let values = array![-7.0, 2.0, 14.0, 136.0, 149.0];
        let rounded = round_to_nearest(values.view(), 13.5).unwrap();
        let expected = [-13.5, 0.0, 13.5, 135.0, 148.5];
        for (r, e) in rounded.iter().zip(expected.iter()) {
            assert_relative_eq!(*r, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_float_step_keeps_float_output() {
        let values = array![-60.0, -40.0, 20.0, 30.0, 1226.0];
        let rounded = round_to_nearest(values.view(), 50.0).unwrap();
        assert_eq!(rounded, array![-50.0, -50.0, 0.0, 50.0, 1250.0]);
    }

    #[test]
    fn test_ties_round_to_even() {
        // Quotients 0.5, 1.5, 2.5, -0.5 with step 10
        let values = array![5.0, 15.0, 25.0, -5.0];
        let rounded = round_to_nearest(values.view(), 10.0).unwrap();
        assert_eq!(rounded, array![0.0, 20.0, 20.0, 0.0]);
    }

    #[test]
    fn test_sub_unit_step() {
        let values = array![0.26, 0.74, -1.1];
        let rounded = round_to_nearest(values.view(), 0.5).unwrap();
        for (r, e) in rounded.iter().zip([0.5, 0.5, -1.0].iter()) {
            assert_relative_eq!(*r, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_large_geocentric_values() {
        let values = array![6_378_137.0, -4_510_023.9, 2_499.0];
        let rounded = round_to_nearest(values.view(), 5000.0).unwrap();
        assert_eq!(rounded, array![6_380_000.0, -4_510_000.0, 0.0]);
    }

    #[test]
    fn test_in_place_matches_view() {
        let values = array![-7.0, 2.0, 14.0, 136.0, 149.0];
        let mut buf = values.to_vec();
        round_in_place(&mut buf, 13.5).unwrap();
        let rounded = round_to_nearest(values.view(), 13.5).unwrap();
        assert_eq!(buf, rounded.to_vec());
    }

    #[test]
    fn test_invalid_steps() {
        let values = array![1.0, 2.0];
        for step in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                round_to_nearest(values.view(), step),
                Err(RoundError::InvalidParameter(_))
            ));
        }
        assert!(round_to_nearest_int(values.view(), 0).is_err());
        assert!(round_in_place(&mut [1.0], -1.0).is_err());
    }

    #[test]
    fn test_step_kind_selects_output() {
        let values = array![-60.0, 30.0];
        match round_with_step(values.view(), 50_i64).unwrap() {
            Rounded::Integer(r) => assert_eq!(r, array![-50, 50]),
            other => panic!("expected integer output, got {other:?}"),
        }
        match round_with_step(values.view(), 50.0).unwrap() {
            Rounded::Float(r) => assert_eq!(r, array![-50.0, 50.0]),
            other => panic!("expected float output, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let values: Array1<f64> = Array1::zeros(0);
        assert_eq!(round_to_nearest(values.view(), 50.0).unwrap().len(), 0);
    }
}
