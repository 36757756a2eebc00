use super::*;

mod arithmetic {
  use super::*;

  #[test]
  fn addition() {
    assert_eq!(eval_one("3 + 4").unwrap(), "ans = 7.0000");
    assert_eq!(eval_one("1 + 2 + 3").unwrap(), "ans = 6.0000");
    assert_eq!(eval_one("(3 + (3 + 3))").unwrap(), "ans = 9.0000");
  }

  #[test]
  fn subtraction_and_negation() {
    assert_eq!(eval_one("3 - 7").unwrap(), "ans = -4.0000");
    assert_eq!(eval_one("-3 + 7").unwrap(), "ans = 4.0000");
    assert_eq!(eval_one("3 * -4").unwrap(), "ans = -12.0000");
    assert_eq!(eval_one("3 + -4").unwrap(), "ans = -1.0000");
  }

  #[test]
  fn multiplication_binds_tighter_than_addition() {
    assert_eq!(eval_one("1 + 2 * 3").unwrap(), "ans = 7.0000");
    assert_eq!(eval_one("(1 + 2) * 3").unwrap(), "ans = 9.0000");
  }

  #[test]
  fn division_binds_tighter_than_multiplication() {
    // '/' groups first, so both spellings resolve the division eagerly.
    assert_eq!(eval_one("8 / 2 * 3").unwrap(), "ans = 12.0000");
    assert_eq!(eval_one("3 * 8 / 2").unwrap(), "ans = 12.0000");
  }

  #[test]
  fn scalar_division_only() {
    assert_eq!(eval_one("[2 4] / 2").unwrap(), "ans =\n[1.0000  2.0000]");
    assert!(matches!(
      eval_one("2 / [2 4]"),
      Err(EvalError::DimensionMismatch(_))
    ));
  }

  #[test]
  fn elementwise_operators() {
    assert_eq!(
      eval_one("[2 6] ./ [2 3]").unwrap(),
      "ans =\n[1.0000  2.0000]"
    );
    assert_eq!(
      eval_one("[2 3] .* [4 5]").unwrap(),
      "ans =\n[8.0000  15.0000]"
    );
    assert!(matches!(
      eval_one("[1 2] .* [1 2 3]"),
      Err(EvalError::DimensionMismatch(_))
    ));
  }

  #[test]
  fn non_broadcastable_addition_is_rejected() {
    assert!(matches!(
      eval_one("[1 2 3; 4 5 6] + [1 2; 3 4; 5 6]"),
      Err(EvalError::DimensionMismatch(_))
    ));
  }

  #[test]
  fn pi_is_predefined() {
    let out = eval_one("2 * pi").unwrap();
    assert_eq!(out, "ans = 6.2832");
  }

  #[test]
  fn decimal_and_scientific_literals() {
    assert_eq!(eval_one("0.5 + .25").unwrap(), "ans = 0.7500");
    assert_eq!(eval_one("1e3 + 2E-1").unwrap(), "ans = 1000.2000");
  }

  #[test]
  fn missing_term_errors() {
    assert!(matches!(eval_one("3 +"), Err(EvalError::MissingTerm)));
    assert!(matches!(eval_one("3 + * 4"), Err(EvalError::MissingTerm)));
    assert!(matches!(eval_one("sum(1,,2)"), Err(EvalError::MissingTerm)));
  }

  #[test]
  fn garbage_is_an_unknown_expression() {
    assert!(matches!(
      eval_one("3 $ 4"),
      Err(EvalError::UnknownExpression(_))
    ));
  }
}
