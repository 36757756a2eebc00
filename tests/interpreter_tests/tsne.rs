use super::*;

mod tsne {
  use super::*;
  use matshell::functions::tsne::{
    read_result_file, write_input_file, MAX_ITERATIONS,
  };
  use matshell::DenseMatrix;

  #[test]
  fn input_file_carries_the_full_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.dat");
    let data =
      DenseMatrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    write_input_file(&path, &data, 2, 0.5, 30.0).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 4 + 4 + 8 + 8 + 4 + 4 + 6 * 8);
    assert_eq!(i32::from_le_bytes(bytes[0..4].try_into().unwrap()), 3);
    assert_eq!(i32::from_le_bytes(bytes[4..8].try_into().unwrap()), 2);
    assert_eq!(f64::from_le_bytes(bytes[8..16].try_into().unwrap()), 0.5);
    assert_eq!(f64::from_le_bytes(bytes[16..24].try_into().unwrap()), 30.0);
    assert_eq!(i32::from_le_bytes(bytes[24..28].try_into().unwrap()), 2);
    assert_eq!(
      i32::from_le_bytes(bytes[28..32].try_into().unwrap()),
      MAX_ITERATIONS
    );
    assert_eq!(
      f64::from_le_bytes(bytes[32..40].try_into().unwrap()),
      1.0
    );
  }

  #[test]
  fn result_file_reads_back_row_major() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.dat");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&2i32.to_le_bytes());
    bytes.extend_from_slice(&2i32.to_le_bytes());
    for v in [-1.5, 0.5, 2.5, -0.25] {
      bytes.extend_from_slice(&f64::to_le_bytes(v));
    }
    std::fs::write(&path, bytes).unwrap();

    let m = read_result_file(&path).unwrap();
    assert_eq!(m.dims(), (2, 2));
    assert_eq!(m.row(0), &[-1.5, 0.5]);
    assert_eq!(m.row(1), &[2.5, -0.25]);
  }

  #[test]
  fn argument_contract_is_checked_before_any_io() {
    assert!(matches!(
      eval_one("bh_tsne(ones(4, 3), 2, 0.5)"),
      Err(EvalError::InvalidArgument { .. })
    ));
    assert!(matches!(
      eval_one("bh_tsne(ones(4, 3), 2.5, 0.5, 30)"),
      Err(EvalError::InvalidArgument { position: 2, .. })
    ));
  }
}
