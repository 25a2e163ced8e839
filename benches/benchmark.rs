use criterion::{Criterion, black_box, criterion_group, criterion_main};
use multiview_pose_eval::evaluator::{EvalConfig, evaluate_sequence};
use multiview_pose_eval::{GroundTruthSequence, Pose3D, Prediction, coco_to_shelf};
use nalgebra as na;

fn coco_person(dx: f64) -> Pose3D {
    Pose3D::new(
        (0..17)
            .map(|i| na::Vector3::new(dx + (i % 2) as f64 * 150.0, 0.0, 1700.0 - i as f64 * 100.0))
            .collect(),
    )
}

fn bench_remap(c: &mut Criterion) {
    let pose = coco_person(0.0);
    c.bench_function("coco_to_shelf", |b| b.iter(|| coco_to_shelf(black_box(&pose))));
}

fn bench_sequence(c: &mut Criterion) {
    let num_frames = 300;
    let actors = (0..3)
        .map(|a| {
            (0..num_frames)
                .map(|_| coco_to_shelf(&coco_person(a as f64 * 1000.0)).ok())
                .collect()
        })
        .collect();
    let gt = GroundTruthSequence::new(actors);
    let preds: Vec<Vec<Prediction>> = (0..num_frames)
        .map(|f| {
            (0..5)
                .map(|p| Prediction::new(coco_person(p as f64 * 800.0 + (f % 7) as f64 * 10.0), 1.0))
                .collect()
        })
        .collect();
    let frame_range: Vec<usize> = (0..num_frames).collect();

    c.bench_function("evaluate_sequence_300", |b| {
        b.iter(|| {
            evaluate_sequence(
                black_box(&gt),
                black_box(&preds),
                &frame_range,
                EvalConfig::default(),
            )
        })
    });
}

criterion_group!(benches, bench_remap, bench_sequence);
criterion_main!(benches);
