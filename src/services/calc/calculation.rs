//! Calculation types and sequence evaluation.
//!
//! A `Calculation` is an owner, a type and an ordered list of inputs. The
//! result is computed on demand by folding the inputs with the operation
//! that matches the type:
//!
//! | type           | fold                         | example              |
//! |----------------|------------------------------|----------------------|
//! | addition       | `x1 + x2 + ... + xn`         | `[1, 2, 3] -> 6`     |
//! | subtraction    | `((x1 - x2) - ...) - xn`     | `[10, 3, 2] -> 5`    |
//! | multiplication | `x1 * x2 * ... * xn`         | `[2, 3, 4] -> 24`    |
//! | division       | `((x1 / x2) / ...) / xn`     | `[60, 3, 4] -> 5`    |
//! | power          | `x1 ^ (x2 ^ (... ^ xn))`     | `[2, 3, 2] -> 512`   |
//! | root           | `((x1 ^ 1/x2) ^ ...) ^ 1/xn` | `[16, 2, 2] -> 2`    |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CalcError;
use super::operations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Power,
    Root,
}

impl CalculationType {
    pub const ALL: [CalculationType; 6] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
        Self::Power,
        Self::Root,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::Power => "power",
            Self::Root => "root",
        }
    }

    /// Allowed tags in alphabetical order, comma separated (for error messages).
    pub fn allowed_list() -> String {
        let mut tags: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
        tags.sort_unstable();
        tags.join(", ")
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| CalcError::UnsupportedType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub user_id: Uuid,
    pub kind: CalculationType,
    pub inputs: Vec<f64>,
}

impl Calculation {
    pub fn new(kind: CalculationType, user_id: Uuid, inputs: Vec<f64>) -> Self {
        Self {
            user_id,
            kind,
            inputs,
        }
    }

    /// Build a calculation from a raw type tag.
    pub fn create(tag: &str, user_id: Uuid, inputs: Vec<f64>) -> Result<Self, CalcError> {
        let kind = tag.parse::<CalculationType>()?;
        Ok(Self::new(kind, user_id, inputs))
    }

    pub fn get_result(&self) -> Result<f64, CalcError> {
        let inputs = self.inputs.as_slice();
        let result = match self.kind {
            CalculationType::Addition => sum(inputs)?,
            CalculationType::Subtraction => difference(inputs)?,
            CalculationType::Multiplication => product(inputs)?,
            CalculationType::Division => quotient(inputs)?,
            CalculationType::Power => chained_power(inputs)?,
            CalculationType::Root => chained_root(inputs)?,
        };

        if !result.is_finite() {
            return Err(CalcError::invalid_input("Result is not a finite number."));
        }
        Ok(result)
    }
}

const AT_LEAST_TWO: &str = "Inputs must be a list with at least two numbers.";

fn require_two<'a>(inputs: &'a [f64], message: &str) -> Result<(f64, &'a [f64]), CalcError> {
    match inputs {
        [first, rest @ ..] if !rest.is_empty() => Ok((*first, rest)),
        _ => Err(CalcError::invalid_input(message)),
    }
}

fn sum(inputs: &[f64]) -> Result<f64, CalcError> {
    let (first, rest) = require_two(inputs, AT_LEAST_TWO)?;
    Ok(rest.iter().fold(first, |acc, &x| operations::add(acc, x)))
}

fn difference(inputs: &[f64]) -> Result<f64, CalcError> {
    let (first, rest) = require_two(inputs, AT_LEAST_TWO)?;
    Ok(rest.iter().fold(first, |acc, &x| operations::subtract(acc, x)))
}

fn product(inputs: &[f64]) -> Result<f64, CalcError> {
    let (first, rest) = require_two(inputs, AT_LEAST_TWO)?;
    Ok(rest.iter().fold(first, |acc, &x| operations::multiply(acc, x)))
}

fn quotient(inputs: &[f64]) -> Result<f64, CalcError> {
    let (first, rest) = require_two(inputs, AT_LEAST_TWO)?;
    rest.iter().try_fold(first, |acc, &x| operations::divide(acc, x))
}

// Right-associative: the innermost exponent is evaluated first.
fn chained_power(inputs: &[f64]) -> Result<f64, CalcError> {
    require_two(inputs, "Power operation requires at least two numbers.")?;
    let mut rev = inputs.iter().rev().copied();
    let innermost = rev.next().unwrap_or_default();
    Ok(rev.fold(innermost, |exponent, base| operations::power(base, exponent)))
}

fn chained_root(inputs: &[f64]) -> Result<f64, CalcError> {
    let (first, degrees) = require_two(inputs, "Root operation requires at least two numbers.")?;
    degrees
        .iter()
        .try_fold(first, |acc, &degree| operations::root(acc, degree))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(kind: CalculationType, inputs: &[f64]) -> Calculation {
        Calculation::new(kind, Uuid::new_v4(), inputs.to_vec())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn parses_every_allowed_tag_case_insensitively() {
        for kind in CalculationType::ALL {
            assert_eq!(kind.as_str().parse::<CalculationType>(), Ok(kind));
            assert_eq!(
                kind.as_str().to_uppercase().parse::<CalculationType>(),
                Ok(kind)
            );
        }
    }

    #[test]
    fn rejects_tags_outside_the_allowed_set() {
        for tag in ["cube_root", "modulus", "", "add", " power", "power\n"] {
            assert_eq!(
                tag.parse::<CalculationType>(),
                Err(CalcError::UnsupportedType(tag.to_string()))
            );
        }
    }

    #[test]
    fn allowed_list_is_sorted() {
        assert_eq!(
            CalculationType::allowed_list(),
            "addition, division, multiplication, power, root, subtraction"
        );
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&CalculationType::Multiplication).unwrap();
        assert_eq!(json, "\"multiplication\"");
        let back: CalculationType = serde_json::from_str("\"root\"").unwrap();
        assert_eq!(back, CalculationType::Root);
    }

    #[test]
    fn factory_builds_each_type() {
        let user_id = Uuid::new_v4();
        let c = Calculation::create("addition", user_id, vec![4.0, 5.0, 6.0]).unwrap();
        assert_eq!(c.kind, CalculationType::Addition);
        assert_eq!(c.user_id, user_id);
        assert_eq!(c.get_result(), Ok(15.0));

        let c = Calculation::create("subtraction", user_id, vec![12.0, 7.0]).unwrap();
        assert_eq!(c.get_result(), Ok(5.0));

        let c = Calculation::create("multiplication", user_id, vec![2.0, 6.0, 2.0]).unwrap();
        assert_eq!(c.get_result(), Ok(24.0));

        let c = Calculation::create("division", user_id, vec![48.0, 2.0, 4.0]).unwrap();
        assert_eq!(c.get_result(), Ok(6.0));
    }

    #[test]
    fn factory_rejects_unsupported_type() {
        let err = Calculation::create("modulus", Uuid::new_v4(), vec![5.0, 2.0]).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported calculation type: modulus");
    }

    #[test]
    fn sequence_folds() {
        assert_eq!(
            calc(CalculationType::Addition, &[7.0, 8.0, 2.5]).get_result(),
            Ok(17.5)
        );
        assert_eq!(
            calc(CalculationType::Subtraction, &[15.0, 4.0, 2.0]).get_result(),
            Ok(9.0)
        );
        assert_eq!(
            calc(CalculationType::Multiplication, &[5.0, 2.0, 3.0]).get_result(),
            Ok(30.0)
        );
        assert_eq!(
            calc(CalculationType::Division, &[60.0, 3.0, 4.0]).get_result(),
            Ok(5.0)
        );
    }

    #[test]
    fn division_by_zero_anywhere_after_the_first_input() {
        let err = calc(CalculationType::Division, &[25.0, 0.0, 2.0])
            .get_result()
            .unwrap_err();
        assert_eq!(err, CalcError::DivisionByZero);
    }

    #[test]
    fn flat_folds_need_two_inputs() {
        for kind in [
            CalculationType::Addition,
            CalculationType::Subtraction,
            CalculationType::Multiplication,
            CalculationType::Division,
        ] {
            let err = calc(kind, &[99.0]).get_result().unwrap_err();
            assert_eq!(err.to_string(), AT_LEAST_TWO);
        }
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(calc(CalculationType::Power, &[2.0, 3.0]).get_result(), Ok(8.0));
        assert_eq!(
            calc(CalculationType::Power, &[2.0, 3.0, 2.0]).get_result(),
            Ok(512.0)
        );
        assert_eq!(
            calc(CalculationType::Power, &[5.0, 2.0]).get_result(),
            Ok(25.0)
        );
    }

    #[test]
    fn power_needs_two_inputs() {
        for inputs in [&[5.0][..], &[][..]] {
            let err = calc(CalculationType::Power, inputs).get_result().unwrap_err();
            assert_eq!(
                err,
                CalcError::invalid_input("Power operation requires at least two numbers.")
            );
        }
    }

    #[test]
    fn root_is_left_associative() {
        assert_close(
            calc(CalculationType::Root, &[16.0, 2.0, 2.0]).get_result().unwrap(),
            2.0,
        );
        assert_close(
            calc(CalculationType::Root, &[9.0, 2.0]).get_result().unwrap(),
            3.0,
        );
        assert_close(
            calc(CalculationType::Root, &[27.0, 3.0]).get_result().unwrap(),
            3.0,
        );
    }

    #[test]
    fn root_needs_two_inputs() {
        let err = calc(CalculationType::Root, &[9.0]).get_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Root operation requires at least two numbers."
        );
    }

    #[test]
    fn root_rejects_zero_degree_at_any_position() {
        for inputs in [&[9.0, 0.0][..], &[16.0, 2.0, 0.0][..]] {
            let err = calc(CalculationType::Root, inputs).get_result().unwrap_err();
            assert_eq!(err, CalcError::DegreeZero);
        }
    }

    #[test]
    fn non_finite_results_are_rejected() {
        let err = calc(CalculationType::Power, &[10.0, 400.0])
            .get_result()
            .unwrap_err();
        assert_eq!(err, CalcError::invalid_input("Result is not a finite number."));

        let err = calc(CalculationType::Root, &[-16.0, 2.0])
            .get_result()
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn evaluation_does_not_consume_inputs() {
        let c = calc(CalculationType::Power, &[2.0, 3.0, 2.0]);
        assert_eq!(c.get_result(), c.get_result());
        assert_eq!(c.inputs, vec![2.0, 3.0, 2.0]);
    }
}
