use super::*;

mod matrices {
  use super::*;

  #[test]
  fn literal_rows_and_columns() {
    assert_eq!(
      eval_one("[1 2; 3 4]").unwrap(),
      "ans =\n⎡1.0000  2.0000⎤\n⎣3.0000  4.0000⎦"
    );
    assert_eq!(eval_one("[]").unwrap(), "ans = []");
  }

  #[test]
  fn transpose_swaps_extents() {
    assert_eq!(
      eval_one("[1 2; 3 4]'").unwrap(),
      "ans =\n⎡1.0000  3.0000⎤\n⎣2.0000  4.0000⎦"
    );
    assert_eq!(
      eval_one("size([1 2 3]')").unwrap(),
      "ans =\n[3.0000  1.0000]"
    );
  }

  #[test]
  fn negative_elements_are_not_subtraction() {
    assert_eq!(
      eval_one("[1 -2]").unwrap(),
      "ans =\n[1.0000  -2.0000]"
    );
    // A bare '-' is not a row element.
    assert!(matches!(
      eval_one("[1 - 2]"),
      Err(EvalError::UnknownExpression(_))
    ));
  }

  #[test]
  fn blocks_compose() {
    let out = session(&["x = [1 2; 3 4]", "size([x x; x x])"]).unwrap();
    assert_eq!(out, "ans =\n[4.0000  4.0000]");
  }

  #[test]
  fn ragged_rows_are_rejected() {
    assert!(matches!(
      eval_one("[1 2; 3]"),
      Err(EvalError::DimensionMismatch(_))
    ));
  }

  #[test]
  fn space_concatenation_outside_brackets() {
    let out = session(&["x = [1 2]", "size(x x)"]).unwrap();
    assert_eq!(out, "ans =\n[1.0000  4.0000]");
    assert!(matches!(
      session(&["x = [1 2]", "x' [1 2 3]"]),
      Err(EvalError::DimensionMismatch(_))
    ));
  }

  #[test]
  fn ranges_are_inclusive_rows() {
    assert_eq!(
      eval_one("2:5").unwrap(),
      "ans =\n[2.0000  3.0000  4.0000  5.0000]"
    );
    assert_eq!(
      eval_one("0:0.5:1").unwrap(),
      "ans =\n[0.0000  0.5000  1.0000]"
    );
    assert_eq!(
      eval_one("[0:2]").unwrap(),
      "ans =\n[0.0000  1.0000  2.0000]"
    );
  }

  #[test]
  fn ranges_resolve_before_surrounding_operators() {
    // (1:2)+1, not 1:(2+1).
    assert_eq!(
      eval_one("1:2+1").unwrap(),
      "ans =\n[2.0000  3.0000]"
    );
    assert_eq!(
      eval_one("5 - 2:3").unwrap(),
      "ans =\n[3.0000  2.0000]"
    );
    assert_eq!(
      eval_one("2 * 0:2").unwrap(),
      "ans =\n[0.0000  2.0000  4.0000]"
    );
    assert_eq!(
      eval_one("-1:1").unwrap(),
      "ans =\n[-1.0000  0.0000  1.0000]"
    );
  }

  #[test]
  fn invalid_ranges() {
    assert!(matches!(eval_one("5:2"), Err(EvalError::InvalidRange(_))));
    assert!(matches!(
      eval_one("1:0:9"),
      Err(EvalError::InvalidRange(_))
    ));
    assert!(matches!(eval_one(":"), Err(EvalError::InvalidRange(_))));
  }

  #[test]
  fn constructors() {
    assert_eq!(
      eval_one("size(zeros(2, 5))").unwrap(),
      "ans =\n[2.0000  5.0000]"
    );
    assert_eq!(eval_one("sum(ones(3))").unwrap(), "ans =\n[3.0000  3.0000  3.0000]");
    assert_eq!(
      eval_one("eye(2)").unwrap(),
      "ans =\n⎡1.0000  0.0000⎤\n⎣0.0000  1.0000⎦"
    );
  }

  #[test]
  fn seeded_rand_is_deterministic() {
    matshell::seed_rng(42);
    let a = eval_one("rand(2, 3)").unwrap();
    matshell::seed_rng(42);
    let b = eval_one("rand(2, 3)").unwrap();
    matshell::unseed_rng();
    assert_eq!(a, b);
    assert_eq!(
      eval_one("size(rand(3, 4))").unwrap(),
      "ans =\n[3.0000  4.0000]"
    );
  }

  #[test]
  fn large_matrices_print_an_excerpt() {
    let out = eval_one("zeros(40, 3)").unwrap();
    assert!(out.contains("Dims(40, 3)"));
    // "ans =", the Dims line, five head rows, the gap row, five tail rows.
    assert_eq!(out.lines().count(), 13);
  }
}
