//! Sequence-level PCP / recall evaluation.
//!
//! [`SequenceEvaluator`] owns the running counters for one evaluation run.
//! Feed it frames in order with [`SequenceEvaluator::process_frame`] and read
//! the aggregate numbers with [`SequenceEvaluator::finalize`].

use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};
use crate::metrics::{closest_prediction, score_pose};
use crate::remap::coco_to_shelf;
use crate::skeleton::{BONE_GROUPS, NUM_SCORED_BONES, NUM_SHELF_JOINTS};
use crate::types::{FrameInput, GroundTruthSequence, Pose3D, Prediction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// A ground-truth actor counts as detected when its closest prediction
    /// has an MPJPE below this (mm).
    pub recall_threshold: f64,
    /// A bone is correct when its mean endpoint error is at most
    /// `alpha_pcp * bone length`.
    pub alpha_pcp: f64,
    /// Number of leading actors averaged into `avg_pcp`.
    pub num_scored_actors: usize,
    pub epsilon: f64,
    /// Match actors to predictions on the rayon pool.
    pub parallel_matching: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            recall_threshold: 500.0,
            alpha_pcp: 0.5,
            num_scored_actors: 3,
            epsilon: 1e-8,
            parallel_matching: false,
        }
    }
}

/// Per-frame log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame_idx: usize,
    pub image_paths: Vec<String>,
    /// Valid predictions after remapping to Shelf order.
    pub pred: Vec<Vec<[f64; 3]>>,
    /// Minimum MPJPE of each present actor, in actor order.
    pub mpjpes: Vec<f64>,
    /// Prediction index each actor was matched to.
    pub matched: Vec<Option<usize>>,
    /// PCP of this frame alone, per actor.
    pub actor_pcp: Vec<f64>,
    pub avg_pcp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoneGroupPcp {
    pub name: String,
    pub actor_pcp: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub actor_pcp: Vec<f64>,
    pub avg_pcp: f64,
    pub bone_person_pcp: Vec<BoneGroupPcp>,
    pub recall: f64,
    pub total_gt: usize,
    pub match_gt: usize,
    pub total_parts: Vec<usize>,
    pub correct_parts: Vec<usize>,
    pub bone_correct_parts: Vec<[usize; NUM_SCORED_BONES]>,
}

impl EvaluationResult {
    pub fn summary(&self) -> String {
        let actors = self
            .actor_pcp
            .iter()
            .enumerate()
            .map(|(a, p)| format!("actor{}={:.4}", a, p))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{}  avg_pcp={:.4}  recall={:.4} ({}/{})",
            actors, self.avg_pcp, self.recall, self.match_gt, self.total_gt
        )
    }
}

struct ActorMatch {
    actor: usize,
    pred_idx: usize,
    mpjpe: f64,
}

pub struct SequenceEvaluator {
    config: EvalConfig,
    num_actors: usize,
    total_gt: usize,
    match_gt: usize,
    total_parts: Vec<usize>,
    correct_parts: Vec<usize>,
    bone_correct_parts: Vec<[usize; NUM_SCORED_BONES]>,
}

impl SequenceEvaluator {
    pub fn new(num_actors: usize, config: EvalConfig) -> SequenceEvaluator {
        SequenceEvaluator {
            config,
            num_actors,
            total_gt: 0,
            match_gt: 0,
            total_parts: vec![0; num_actors],
            correct_parts: vec![0; num_actors],
            bone_correct_parts: vec![[0; NUM_SCORED_BONES]; num_actors],
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.total_gt = 0;
        self.match_gt = 0;
        self.total_parts.iter_mut().for_each(|c| *c = 0);
        self.correct_parts.iter_mut().for_each(|c| *c = 0);
        self.bone_correct_parts.iter_mut().for_each(|c| *c = [0; NUM_SCORED_BONES]);
    }

    pub fn total_gt(&self) -> usize {
        self.total_gt
    }

    pub fn match_gt(&self) -> usize {
        self.match_gt
    }

    pub fn total_parts(&self) -> &[usize] {
        &self.total_parts
    }

    pub fn correct_parts(&self) -> &[usize] {
        &self.correct_parts
    }

    pub fn bone_correct_parts(&self) -> &[[usize; NUM_SCORED_BONES]] {
        &self.bone_correct_parts
    }

    /// Scores one frame and folds it into the running counters.
    ///
    /// Invalid predictions are dropped and the rest remapped to Shelf order.
    /// Each present actor is matched to its closest prediction independently,
    /// so two actors may share one prediction. Frames without any valid
    /// prediction leave the counters untouched. A non-finite distance fails
    /// the frame before any counter moves.
    pub fn process_frame(&mut self, frame_idx: usize, input: &FrameInput) -> Result<FrameRecord> {
        if input.ground_truth.len() > self.num_actors {
            return Err(EvalError::ActorOverflow {
                got: input.ground_truth.len(),
                expected: self.num_actors,
            });
        }
        for gt in input.ground_truth.iter().flatten() {
            if gt.num_joints() != NUM_SHELF_JOINTS {
                return Err(EvalError::Shape(format!(
                    "ground truth in frame {} has {} joints, expected {}",
                    frame_idx,
                    gt.num_joints(),
                    NUM_SHELF_JOINTS
                )));
            }
        }

        let candidates = remap_valid(input.predictions)?;
        trace!(
            "frame {}: {} of {} predictions valid",
            frame_idx,
            candidates.len(),
            input.predictions.len()
        );

        let init_total = self.total_parts.clone();
        let init_correct = self.correct_parts.clone();
        let mut mpjpes = Vec::new();
        let mut matched = vec![None; self.num_actors];

        if !candidates.is_empty() {
            for m in self.match_actors(&input.ground_truth, &candidates)? {
                if let Some(gt) = input.ground_truth[m.actor] {
                    debug!(
                        "frame {} actor {} -> pred {} (mpjpe {:.2})",
                        frame_idx, m.actor, m.pred_idx, m.mpjpe
                    );
                    self.accumulate(m.actor, gt, &candidates[m.pred_idx], m.mpjpe);
                    mpjpes.push(m.mpjpe);
                    matched[m.actor] = Some(m.pred_idx);
                }
            }
        }

        let actor_pcp: Vec<f64> = (0..self.num_actors)
            .map(|a| {
                let correct = (self.correct_parts[a] - init_correct[a]) as f64;
                let total = (self.total_parts[a] - init_total[a]) as f64;
                correct / (total + self.config.epsilon)
            })
            .collect();
        let avg_pcp = self.leading_mean(&actor_pcp);

        Ok(FrameRecord {
            frame_idx,
            image_paths: input.image_paths.clone(),
            pred: candidates.iter().map(|p| p.to_rows()).collect(),
            mpjpes,
            matched,
            actor_pcp,
            avg_pcp,
        })
    }

    fn match_actors(
        &self,
        ground_truth: &[Option<&Pose3D>],
        candidates: &[Pose3D],
    ) -> Result<Vec<ActorMatch>> {
        let match_one = |(actor, gt): (usize, &Option<&Pose3D>)| -> Option<Result<ActorMatch>> {
            let gt = (*gt)?;
            closest_prediction(gt, candidates)
                .map(|best| {
                    best.map(|(pred_idx, mpjpe)| ActorMatch {
                        actor,
                        pred_idx,
                        mpjpe,
                    })
                })
                .transpose()
        };
        if self.config.parallel_matching {
            ground_truth.par_iter().enumerate().filter_map(match_one).collect()
        } else {
            ground_truth.iter().enumerate().filter_map(match_one).collect()
        }
    }

    fn accumulate(&mut self, actor: usize, gt: &Pose3D, pred: &Pose3D, mpjpe: f64) {
        self.total_gt += 1;
        if mpjpe < self.config.recall_threshold {
            self.match_gt += 1;
        }
        for (bone, score) in score_pose(pred, gt, self.config.alpha_pcp).iter().enumerate() {
            self.total_parts[actor] += 1;
            if score.correct {
                self.correct_parts[actor] += 1;
                self.bone_correct_parts[actor][bone] += 1;
            }
        }
    }

    fn leading_mean(&self, values: &[f64]) -> f64 {
        let n = self.config.num_scored_actors.min(values.len());
        if n == 0 {
            return 0.0;
        }
        values[..n].iter().sum::<f64>() / n as f64
    }

    /// Aggregate metrics over everything processed since the last reset.
    pub fn finalize(&self) -> EvaluationResult {
        let eps = self.config.epsilon;
        let actor_pcp: Vec<f64> = self
            .correct_parts
            .iter()
            .zip(&self.total_parts)
            .map(|(&c, &t)| c as f64 / (t as f64 + eps))
            .collect();
        let avg_pcp = self.leading_mean(&actor_pcp);

        let bone_person_pcp = BONE_GROUPS
            .iter()
            .map(|(name, bones)| BoneGroupPcp {
                name: name.to_string(),
                actor_pcp: (0..self.num_actors)
                    .map(|a| {
                        let correct: usize =
                            bones.iter().map(|&b| self.bone_correct_parts[a][b]).sum();
                        let frames = self.total_parts[a] as f64 / NUM_SCORED_BONES as f64;
                        correct as f64 / (frames * bones.len() as f64 + eps)
                    })
                    .collect(),
            })
            .collect();

        EvaluationResult {
            actor_pcp,
            avg_pcp,
            bone_person_pcp,
            recall: self.match_gt as f64 / (self.total_gt as f64 + eps),
            total_gt: self.total_gt,
            match_gt: self.match_gt,
            total_parts: self.total_parts.clone(),
            correct_parts: self.correct_parts.clone(),
            bone_correct_parts: self.bone_correct_parts.clone(),
        }
    }

    /// Evaluates prediction frame `i` against ground-truth frame `frame_range[i]`.
    ///
    /// Stops at the shorter of `frame_range` and `predictions`. `image_paths`
    /// is called with each ground-truth frame index.
    pub fn run<F>(
        &mut self,
        ground_truth: &GroundTruthSequence,
        predictions: &[Vec<Prediction>],
        frame_range: &[usize],
        mut image_paths: F,
    ) -> Result<Vec<FrameRecord>>
    where
        F: FnMut(usize) -> Vec<String>,
    {
        let n = frame_range.len().min(predictions.len());
        if n < frame_range.len() || n < predictions.len() {
            warn!(
                "evaluating {} frames: {} ground-truth frames requested, {} prediction frames given",
                n,
                frame_range.len(),
                predictions.len()
            );
        }
        frame_range
            .iter()
            .zip(predictions)
            .enumerate()
            .map(|(i, (&fi, preds))| {
                let input = FrameInput::new(ground_truth.frame(fi)?, preds)
                    .with_image_paths(image_paths(fi));
                self.process_frame(i, &input)
            })
            .collect()
    }
}

/// Remaps the valid predictions of a frame to Shelf order.
pub fn remap_valid(predictions: &[Prediction]) -> Result<Vec<Pose3D>> {
    predictions
        .iter()
        .filter(|p| p.is_valid())
        .map(|p| coco_to_shelf(&p.pose))
        .collect()
}

/// One-shot evaluation of a whole sequence.
pub fn evaluate_sequence(
    ground_truth: &GroundTruthSequence,
    predictions: &[Vec<Prediction>],
    frame_range: &[usize],
    config: EvalConfig,
) -> Result<(EvaluationResult, Vec<FrameRecord>)> {
    let mut evaluator = SequenceEvaluator::new(ground_truth.num_actors(), config);
    let log = evaluator.run(ground_truth, predictions, frame_range, |_| Vec::new())?;
    Ok((evaluator.finalize(), log))
}
