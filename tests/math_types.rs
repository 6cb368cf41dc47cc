//! Integration tests for the lightweight array types.

use tabclf::math::{Array1, Array2};

// ---------------------------------------------------------------------------
// Array1
// ---------------------------------------------------------------------------

#[test]
fn vector_select_and_mapv() {
    let v = Array1::from_vec(vec![10, 20, 30, 40]);
    assert_eq!(v.select(&[3, 0]).to_vec(), vec![40, 10]);
    assert_eq!(v.mapv(|&x| x * 2).to_vec(), vec![20, 40, 60, 80]);
}

#[test]
fn vector_mean_handles_empty() {
    let v = Array1::from_vec(vec![1.0f32, 2.0, 3.0]);
    assert_eq!(v.mean(), Some(2.0));
    assert_eq!(Array1::<f32>::from_vec(vec![]).mean(), None);
    assert_eq!(Array1::<f32>::zeros(2).mean(), Some(0.0));
}

#[test]
fn boolean_vectors_support_bitand() {
    let a = Array1::from_vec(vec![true, true, false]);
    let b = Array1::from_vec(vec![true, false, false]);
    assert_eq!((&a & &b).to_vec(), vec![true, false, false]);
}

// ---------------------------------------------------------------------------
// Array2
// ---------------------------------------------------------------------------

#[test]
fn matrix_shape_mismatch_is_an_error() {
    assert!(Array2::from_shape_vec((2, 3), vec![1.0f32; 5]).is_err());
    assert!(Array2::from_shape_vec((2, 3), vec![1.0f32; 6]).is_ok());
}

#[test]
fn matrix_rows_and_columns_agree_with_indexing() {
    let m = Array2::from_shape_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(m.row_slice(1), &[4, 5, 6]);
    assert_eq!(m.column(2).to_vec(), vec![3, 6]);
    assert_eq!(m[(1, 0)], 4);
}

#[test]
fn select_rows_copies_in_index_order() {
    let m = Array2::from_shape_vec((3, 2), vec![1, 2, 3, 4, 5, 6]).unwrap();
    let picked = m.select_rows(&[2, 0]);
    assert_eq!(picked.shape(), (2, 2));
    assert_eq!(picked.as_slice(), &[5, 6, 1, 2]);
}

#[test]
fn from_row_stacks_copies_and_set_column_overwrites() {
    let mut m = Array2::from_row(&[1.0f32, 2.0], 3);
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.row_slice(2), &[1.0, 2.0]);

    m.set_column(1, &[7.0, 8.0, 9.0]);
    assert_eq!(m.column(1).to_vec(), vec![7.0, 8.0, 9.0]);
    assert_eq!(m.column(0).to_vec(), vec![1.0, 1.0, 1.0]);
}
