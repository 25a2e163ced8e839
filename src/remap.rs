use nalgebra as na;

use crate::error::{EvalError, Result};
use crate::skeleton::{COCO_TO_SHELF, CocoJoint, NUM_COCO_JOINTS, NUM_SHELF_JOINTS, ShelfJoint};
use crate::types::Pose3D;

/// Per-axis scale applied to the neck-to-nose offset when placing the top of the head.
pub const HEAD_TOP_SCALE: [f64; 3] = [0.75, 0.75, 1.5];
/// Fraction of the way from mid-shoulder to nose for the bottom of the head.
pub const HEAD_BOTTOM_PULL: f64 = 0.5;
/// Weight of the nose-based estimate against the ear-based one.
pub const HEAD_BLEND_ALPHA: f64 = 0.75;

/// Transforms a COCO-order 3D pose into the Shelf joint order.
///
/// Twelve joints are copied straight across. The two head joints Shelf has and
/// COCO lacks are interpolated from shoulders, ears and nose.
pub fn coco_to_shelf(coco: &Pose3D) -> Result<Pose3D> {
    if coco.num_joints() != NUM_COCO_JOINTS {
        return Err(EvalError::Shape(format!(
            "coco pose needs {} joints, got {}",
            NUM_COCO_JOINTS,
            coco.num_joints()
        )));
    }
    Ok(coco_to_shelf_unchecked(coco.joints()))
}

fn coco_to_shelf_unchecked(src: &[na::Vector3<f64>]) -> Pose3D {
    let at = |j: CocoJoint| src[j.index()];

    let mut dst = Pose3D::zeros(NUM_SHELF_JOINTS);
    let joints = dst.joints_mut();
    for (slot, j) in COCO_TO_SHELF.iter().enumerate() {
        joints[slot] = at(*j);
    }

    let mid_shoulder = (at(CocoJoint::LeftShoulder) + at(CocoJoint::RightShoulder)) / 2.0;
    let head_center = (at(CocoJoint::LeftEar) + at(CocoJoint::RightEar)) / 2.0;
    let head_bottom = (mid_shoulder + head_center) / 2.0;
    let head_top = head_bottom + (head_center - head_bottom) * 2.0;

    let nose = at(CocoJoint::Nose);
    let neck =
        (joints[ShelfJoint::RightShoulder.index()] + joints[ShelfJoint::LeftShoulder.index()]) / 2.0;

    let top = neck + (nose - neck).component_mul(&na::Vector3::from(HEAD_TOP_SCALE));
    let bottom = neck + (nose - neck) * HEAD_BOTTOM_PULL;

    joints[ShelfJoint::TopHead.index()] =
        top * HEAD_BLEND_ALPHA + head_top * (1.0 - HEAD_BLEND_ALPHA);
    joints[ShelfJoint::BottomHead.index()] =
        bottom * HEAD_BLEND_ALPHA + head_bottom * (1.0 - HEAD_BLEND_ALPHA);

    dst
}
