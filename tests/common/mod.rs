#![allow(dead_code)]

use multiview_pose_eval::{Pose3D, Prediction, coco_to_shelf};
use nalgebra as na;

/// Upright COCO person centred at `x = dx`, millimeters, feet on z = 0.
///
/// Its Shelf remap has head joints at z = 1500 (bottom) and z = 1700 (top).
pub fn coco_person(dx: f64) -> Pose3D {
    let pts = [
        (0.0, 1600.0),
        (30.0, 1620.0),
        (-30.0, 1620.0),
        (60.0, 1600.0),
        (-60.0, 1600.0),
        (200.0, 1400.0),
        (-200.0, 1400.0),
        (200.0, 1150.0),
        (-200.0, 1150.0),
        (200.0, 900.0),
        (-200.0, 900.0),
        (100.0, 900.0),
        (-100.0, 900.0),
        (100.0, 450.0),
        (-100.0, 450.0),
        (100.0, 0.0),
        (-100.0, 0.0),
    ];
    Pose3D::new(
        pts.iter()
            .map(|(x, z)| na::Vector3::new(x + dx, 0.0, *z))
            .collect(),
    )
}

pub fn prediction(dx: f64) -> Prediction {
    Prediction::new(coco_person(dx), 1.0)
}

pub fn invalid_prediction(dx: f64) -> Prediction {
    Prediction::new(coco_person(dx), -1.0)
}

/// Shelf-order ground truth that a `prediction(dx)` matches exactly.
pub fn shelf_person(dx: f64) -> Pose3D {
    coco_to_shelf(&coco_person(dx)).unwrap()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
