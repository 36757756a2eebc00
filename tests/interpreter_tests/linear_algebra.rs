use super::*;

mod linear_algebra {
  use super::*;

  #[test]
  fn normr_scales_rows_to_unit_length() {
    assert_eq!(
      eval_one("normr([3 4; 0 2])").unwrap(),
      "ans =\n⎡0.6000  0.8000⎤\n⎣0.0000  1.0000⎦"
    );
  }

  #[test]
  fn pdist_lists_pairs_in_order() {
    assert_eq!(
      eval_one("pdist([0; 3; 7])").unwrap(),
      "ans =\n⎡3.0000⎤\n⎢7.0000⎥\n⎣4.0000⎦"
    );
    assert_eq!(
      eval_one("size(pdist(zeros(5, 2)))").unwrap(),
      "ans =\n[10.0000  1.0000]"
    );
  }

  #[test]
  fn svd_publishes_u_s_v() {
    let out = session(&["x = [3 0; 0 2]", "svd(x)"]).unwrap();
    let order: Vec<usize> = ["U =", "S =", "V =", "ans ="]
      .iter()
      .map(|needle| out.find(needle).unwrap())
      .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    // Singular values come back as a descending column.
    assert_eq!(
      session(&["x = [3 0; 0 2]", "s = svd(x)", "size(s)"]).unwrap(),
      "ans =\n[2.0000  1.0000]"
    );
    assert_eq!(
      session(&["x = [3 0; 0 2]", "svd(x)", "S(0, 0)"]).unwrap(),
      "ans = 3.0000"
    );
  }

  #[test]
  fn svd_factors_have_thin_shapes() {
    assert_eq!(
      session(&["x = ones(4, 2)", "svd(x)", "size(U)"]).unwrap(),
      "ans =\n[4.0000  2.0000]"
    );
    assert_eq!(
      session(&["x = ones(4, 2)", "svd(x)", "size(V)"]).unwrap(),
      "ans =\n[2.0000  2.0000]"
    );
    // S is shaped like the input, singular values on the diagonal.
    assert_eq!(
      session(&["x = ones(4, 2)", "svd(x)", "size(S)"]).unwrap(),
      "ans =\n[4.0000  2.0000]"
    );
  }

  #[test]
  fn pca_projects_onto_k_components() {
    let x = "x = [1 1; 2 2.1; 3 2.9; 4 4.2]";
    assert_eq!(
      session(&[x, "p = pca(x, 1)", "size(p)"]).unwrap(),
      "ans =\n[4.0000  1.0000]"
    );
    assert_eq!(
      session(&[x, "pca(x, 2)", "size(vectors)"]).unwrap(),
      "ans =\n[2.0000  2.0000]"
    );
    assert_eq!(
      session(&[x, "pca(x, 1)", "size(vars)"]).unwrap(),
      "ans =\n[1.0000  2.0000]"
    );
    // The projection also persists under its fixed name.
    assert_eq!(
      session(&[x, "pca(x, 1)", "size(proj)"]).unwrap(),
      "ans =\n[4.0000  1.0000]"
    );
  }

  #[test]
  fn pca_component_count_is_bounded() {
    assert!(matches!(
      eval_one("pca(ones(3, 2), 3)"),
      Err(EvalError::InvalidArgument { position: 2, .. })
    ));
  }

  #[test]
  fn elementwise_math_functions() {
    assert_eq!(
      eval_one("sqrt([1 4; 9 16])").unwrap(),
      "ans =\n⎡1.0000  2.0000⎤\n⎣3.0000  4.0000⎦"
    );
    assert_eq!(eval_one("exp(0)").unwrap(), "ans = 1.0000");
    assert_eq!(eval_one("log(exp(2))").unwrap(), "ans = 2.0000");
    assert_eq!(eval_one("abs(-3)").unwrap(), "ans = 3.0000");
    assert_eq!(eval_one("round(2.5)").unwrap(), "ans = 3.0000");
    assert_eq!(eval_one("floor(2.9)").unwrap(), "ans = 2.0000");
    assert_eq!(eval_one("ceil(2.1)").unwrap(), "ans = 3.0000");
    assert_eq!(eval_one("cos(0) + sin(0)").unwrap(), "ans = 1.0000");
  }

  #[test]
  fn unknown_function() {
    assert!(matches!(
      eval_one("cot(1)"),
      Err(EvalError::UnknownFunction(_))
    ));
  }
}
