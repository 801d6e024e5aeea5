use super::*;

#[test]
fn unit_conversion_round_trips_every_byte() {
    for v in 0..=255u8 {
        assert_eq!(unit_to_u8(u8_to_unit(v)), v);
    }
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(-0.5), 0);
    assert_eq!(unit_to_u8(1.5), 255);
}

#[test]
fn minmax_stretches_to_unit_range() {
    let mut v = vec![0.25, 0.5, 0.75];
    minmax_normalize_in_place(&mut v);
    assert!(v[0].abs() < 1e-12);
    assert!((v[1] - 0.5).abs() < 1e-12);
    assert!((v[2] - 1.0).abs() < 1e-12);
}

#[test]
fn minmax_of_uniform_buffer_is_all_ones() {
    let mut v = vec![0.0; 8];
    minmax_normalize_in_place(&mut v);
    assert!(v.iter().all(|&x| x == 1.0));
}

#[test]
fn minmax_of_empty_buffer_is_noop() {
    let mut v: Vec<f64> = Vec::new();
    minmax_normalize_in_place(&mut v);
    assert!(v.is_empty());
}
