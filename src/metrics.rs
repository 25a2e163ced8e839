//! Per-pose error measures: MPJPE, limb scoring and nearest-pose lookup.

use nalgebra as na;

use crate::error::{EvalError, Result};
use crate::skeleton::{NUM_SCORED_BONES, SCORED_LIMBS, ShelfJoint, TORSO_BONE};
use crate::types::Pose3D;

/// Mean per-joint Euclidean distance between two poses of equal size.
pub fn mpjpe(a: &Pose3D, b: &Pose3D) -> f64 {
    debug_assert_eq!(a.num_joints(), b.num_joints());
    let n = a.num_joints().min(b.num_joints());
    if n == 0 {
        return 0.0;
    }
    a.joints()
        .iter()
        .zip(b.joints())
        .map(|(p, q)| (p - q).norm())
        .sum::<f64>()
        / n as f64
}

/// Endpoint error of one scored bone against its ground-truth length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbScore {
    pub error: f64,
    pub length: f64,
    pub correct: bool,
}

/// Scores a segment: correct when the mean endpoint error is at most
/// `alpha_pcp` times the ground-truth segment length.
pub fn score_segment(
    pred_start: &na::Vector3<f64>,
    pred_end: &na::Vector3<f64>,
    gt_start: &na::Vector3<f64>,
    gt_end: &na::Vector3<f64>,
    alpha_pcp: f64,
) -> LimbScore {
    let error = ((pred_start - gt_start).norm() + (pred_end - gt_end).norm()) / 2.0;
    let length = (gt_start - gt_end).norm();
    LimbScore {
        error,
        length,
        correct: error <= alpha_pcp * length,
    }
}

/// Scores all bones of a Shelf-order prediction against ground truth.
///
/// The first nine entries follow `SCORED_LIMBS`; the last is the torso,
/// running from the hip midpoint to the bottom of the head.
pub fn score_pose(pred: &Pose3D, gt: &Pose3D, alpha_pcp: f64) -> [LimbScore; NUM_SCORED_BONES] {
    let mut scores = [LimbScore {
        error: 0.0,
        length: 0.0,
        correct: false,
    }; NUM_SCORED_BONES];
    for (bone, (s, e)) in SCORED_LIMBS.iter().enumerate() {
        scores[bone] =
            score_segment(pred.joint(*s), pred.joint(*e), gt.joint(*s), gt.joint(*e), alpha_pcp);
    }

    let pred_hip = pred.midpoint(ShelfJoint::RightHip, ShelfJoint::LeftHip);
    let gt_hip = gt.midpoint(ShelfJoint::RightHip, ShelfJoint::LeftHip);
    scores[TORSO_BONE] = score_segment(
        &pred_hip,
        pred.joint(ShelfJoint::BottomHead),
        &gt_hip,
        gt.joint(ShelfJoint::BottomHead),
        alpha_pcp,
    );
    scores
}

/// Index and MPJPE of the candidate closest to `gt`; ties keep the first.
///
/// A non-finite distance means a pose carries NaN or infinite coordinates and
/// is reported as `EvalError::NonFinite` instead of taking part in the argmin.
pub fn closest_prediction(gt: &Pose3D, candidates: &[Pose3D]) -> Result<Option<(usize, f64)>> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let d = mpjpe(gt, c);
        if !d.is_finite() {
            return Err(EvalError::NonFinite { candidate: i });
        }
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((i, d)),
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_resolve_to_first_candidate() {
        let gt = Pose3D::zeros(3);
        let c = Pose3D::new(vec![na::Vector3::new(1.0, 0.0, 0.0); 3]);
        let (idx, d) = closest_prediction(&gt, &[c.clone(), c]).unwrap().unwrap();
        assert_eq!(idx, 0);
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_candidate_fails_in_any_position() {
        let gt = Pose3D::zeros(14);
        let good = Pose3D::new(vec![na::Vector3::new(5.0, 0.0, 0.0); 14]);
        let mut nan = Pose3D::zeros(14);
        nan.joints_mut()[3] = na::Vector3::new(f64::NAN, 0.0, 0.0);

        let tail = closest_prediction(&gt, &[good.clone(), nan.clone()]);
        assert!(matches!(tail, Err(EvalError::NonFinite { candidate: 1 })));
        let head = closest_prediction(&gt, &[nan, good]);
        assert!(matches!(head, Err(EvalError::NonFinite { candidate: 0 })));
    }
}
