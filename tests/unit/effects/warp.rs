use super::*;

#[test]
fn zero_grid_is_identity_away_from_far_edges() {
    let mut src = GrayImage::new(16, 12);
    for (x, y, px) in src.enumerate_pixels_mut() {
        *px = Luma([((x * 13 + y * 7) % 256) as u8]);
    }
    let out = local_warp(&src, &DisplacementGrid::zero(16, 12));
    for y in 0..11 {
        for x in 0..15 {
            assert_eq!(out.get_pixel(x, y), src.get_pixel(x, y));
        }
    }
}

#[test]
fn displacement_interpolates_between_control_points() {
    let mut grid = DisplacementGrid::zero(31, 31);
    grid.dx[0] = 3.0;
    assert_eq!(grid.displacement_at(0.0, 0.0), (3.0, 0.0));
    let (dx, _) = grid.displacement_at(5.0, 0.0);
    assert!((dx - 1.5).abs() < 1e-5);
    assert_eq!(grid.displacement_at(30.0, 30.0), (0.0, 0.0));
}

#[test]
fn sampled_grid_is_reproducible_and_bounded() {
    let mut a = RandomStream::from_seed(4);
    let mut b = RandomStream::from_seed(4);
    let ga = DisplacementGrid::sample(0.03, 64, 32, &mut a);
    let gb = DisplacementGrid::sample(0.03, 64, 32, &mut b);
    assert_eq!(ga, gb);
    assert_eq!(ga.dx.len(), GRID_ROWS * GRID_COLS);
    assert!(ga.dx.iter().all(|v| v.abs() < 64.0));
}
