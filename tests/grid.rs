use ndarray::{Array2, Array3};

use _rust::geodesic::{displacement, summarize};
use _rust::proj::pipeline::Transformer;
use _rust::round::points::{round_points, RoundOptions};

fn global_grid(rows: usize, cols: usize) -> Array3<f64> {
    let mut grid = Array3::zeros((2, rows, cols));
    for i in 0..rows {
        for j in 0..cols {
            grid[(0, i, j)] = -180.0 + 360.0 * j as f64 / (cols - 1) as f64;
            grid[(1, i, j)] = -90.0 + 180.0 * i as f64 / (rows - 1) as f64;
        }
    }
    grid
}

#[test]
fn test_full_globe_grid_at_1250m() {
    let grid = global_grid(250, 500);
    let opts = RoundOptions::new(1250.0).with_parallel(true);
    let rounded = round_points(grid.view(), &opts, &Transformer::default()).unwrap();
    assert_eq!(rounded.shape(), &[2, 250, 500]);

    let dist = displacement(grid.view(), rounded.view()).unwrap();
    assert!(dist.iter().all(|d| d.is_finite()));

    let stats = summarize(dist.iter()).unwrap();
    assert_eq!(stats.count, 250 * 500);
    assert!(stats.max < 2.0 * 1250.0, "max displacement {}", stats.max);
}

#[test]
fn test_poles_and_antimeridian() {
    let points = Array2::from_shape_vec(
        (2, 6),
        vec![
            -180.0, 180.0, 179.9999, -179.9999, 0.0, 45.0, //
            0.0, 0.0, 10.0, 10.0, 90.0, -90.0,
        ],
    )
    .unwrap();
    for distance in [1250.0, 5000.0, 12_500.0] {
        let rounded = _rust::round(points.view(), distance).unwrap();
        let dist = displacement(points.view(), rounded.view()).unwrap();
        for d in dist.iter() {
            assert!(d.is_finite() && *d < 2.0 * distance, "{d} at {distance}");
        }
    }
}

#[test]
fn test_proj4rs_backend_grid() {
    let grid = global_grid(25, 50);
    let opts = RoundOptions::new(5000.0);
    let native = round_points(grid.view(), &opts, &Transformer::default()).unwrap();
    let fallback = round_points(grid.view(), &opts, &Transformer::proj4rs().unwrap()).unwrap();

    // Same grid nodes, so the rounded points agree to well under a metre
    let dist = displacement(native.view(), fallback.view()).unwrap();
    let agree = dist.iter().filter(|d| **d < 1.0).count();
    assert!(agree as f64 >= 0.99 * dist.len() as f64);
}
