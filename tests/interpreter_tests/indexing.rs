use super::*;

mod indexing {
  use super::*;

  const X: &str = "x = [1 2 3; 4 5 6]";

  #[test]
  fn linear_indexing_is_row_major_and_zero_based() {
    assert_eq!(session(&[X, "x(0)"]).unwrap(), "ans = 1.0000");
    assert_eq!(session(&[X, "x(3)"]).unwrap(), "ans = 4.0000");
    assert_eq!(session(&[X, "x(5)"]).unwrap(), "ans = 6.0000");
  }

  #[test]
  fn linear_index_accepts_vectors() {
    assert_eq!(
      session(&[X, "x([0 2 4])"]).unwrap(),
      "ans =\n[1.0000  3.0000  5.0000]"
    );
    assert_eq!(
      session(&[X, "x(0:2)"]).unwrap(),
      "ans =\n[1.0000  2.0000  3.0000]"
    );
  }

  #[test]
  fn fractional_linear_positions_truncate() {
    assert_eq!(session(&[X, "x(1.9)"]).unwrap(), "ans = 2.0000");
  }

  #[test]
  fn full_range_reshapes_to_a_column() {
    assert_eq!(
      session(&[X, "size(x(:))"]).unwrap(),
      "ans =\n[6.0000  1.0000]"
    );
  }

  #[test]
  fn two_dimensional_selection() {
    assert_eq!(session(&[X, "x(1, 2)"]).unwrap(), "ans = 6.0000");
    assert_eq!(
      session(&[X, "x(1, :)"]).unwrap(),
      "ans =\n[4.0000  5.0000  6.0000]"
    );
    assert_eq!(
      session(&[X, "x(:, 0)"]).unwrap(),
      "ans =\n⎡1.0000⎤\n⎣4.0000⎦"
    );
    assert_eq!(
      session(&[X, "x([1 0], [2 0])"]).unwrap(),
      "ans =\n⎡6.0000  4.0000⎤\n⎣3.0000  1.0000⎦"
    );
  }

  #[test]
  fn range_arithmetic_in_index_position() {
    // The column argument is (0:1)+1 = [1 2].
    assert_eq!(
      session(&[X, "x(1, 0:1+1)"]).unwrap(),
      "ans =\n[5.0000  6.0000]"
    );
  }

  #[test]
  fn out_of_range_positions() {
    assert!(matches!(
      session(&[X, "x(6)"]),
      Err(EvalError::IndexOutOfRange(_))
    ));
    assert!(matches!(
      session(&[X, "x(-1)"]),
      Err(EvalError::IndexOutOfRange(_))
    ));
    assert!(matches!(
      session(&[X, "x(0, 3)"]),
      Err(EvalError::IndexOutOfRange(_))
    ));
  }

  #[test]
  fn too_many_and_too_few_indices() {
    assert!(matches!(
      session(&[X, "x(0, 0, 0)"]),
      Err(EvalError::TooManyIndices)
    ));
    assert!(matches!(session(&[X, "x()"]), Err(EvalError::MissingTerm)));
  }

  #[test]
  fn indexing_shadows_builtins() {
    // Once `sum` is a variable, `sum(...)` subindexes it.
    let out = session(&["sum = [7 8 9]", "sum(1)"]).unwrap();
    assert_eq!(out, "ans = 8.0000");
  }
}
