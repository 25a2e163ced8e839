use multiview_pose_eval::EvalError;
use multiview_pose_eval::data_loader::{
    frame_image_paths, load_ground_truth, load_prediction_dir, load_predictions, shelf_frame_range,
};
use serde_json::json;
use tempfile::TempDir;

fn rows(n: usize, cols: usize, value: f64) -> Vec<Vec<f64>> {
    vec![vec![value; cols]; n]
}

#[test]
fn test_load_ground_truth_scales_and_skips_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("actorsGT.json");
    let data = json!({
        "actor3D": [
            [rows(14, 3, 1.5), [], rows(14, 3, 0.25)],
            [[], rows(14, 3, 2.0), []],
        ]
    });
    std::fs::write(&path, data.to_string()).unwrap();

    let gt = load_ground_truth(&path, 1000.0).unwrap();
    assert_eq!(gt.num_actors(), 2);
    assert_eq!(gt.num_frames(), 3);

    let f0 = gt.frame(0).unwrap();
    assert_eq!(f0[0].unwrap().joints()[13].x, 1500.0);
    assert!(f0[1].is_none());

    let f1 = gt.frame(1).unwrap();
    assert!(f1[0].is_none());
    assert_eq!(f1[1].unwrap().joints()[0].z, 2000.0);
    assert!(gt.frame(3).is_err());
}

#[test]
fn test_load_ground_truth_rejects_bad_shape() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.json");
    let data = json!({ "actor3D": [[rows(13, 3, 0.0)]] });
    std::fs::write(&path, data.to_string()).unwrap();
    assert!(matches!(load_ground_truth(&path, 1.0), Err(EvalError::Shape(_))));

    let data = json!({ "actor3D": [[rows(14, 2, 0.0)]] });
    std::fs::write(&path, data.to_string()).unwrap();
    assert!(matches!(load_ground_truth(&path, 1.0), Err(EvalError::Shape(_))));
}

#[test]
fn test_load_ground_truth_missing_file() {
    let result = load_ground_truth("non_existent_path/actorsGT.json", 1.0);
    assert!(matches!(result, Err(EvalError::Io(_))));
}

#[test]
fn test_load_predictions_reads_validity() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preds.json");
    let mut padded = rows(17, 4, 3.0);
    padded[0][3] = -1.0;
    let data = json!([[rows(17, 4, 1.0), padded], [rows(17, 3, 2.0)], []]);
    std::fs::write(&path, data.to_string()).unwrap();

    let frames = load_predictions(&path).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].len(), 2);
    assert!(frames[0][0].is_valid());
    assert!(!frames[0][1].is_valid());
    assert!(frames[1][0].is_valid());
    assert_eq!(frames[1][0].pose.num_joints(), 17);
    assert!(frames[2].is_empty());
}

#[test]
fn test_load_predictions_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preds.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(load_predictions(&path), Err(EvalError::Json(_))));
}

#[test]
fn test_load_prediction_dir_sorted() {
    let temp_dir = TempDir::new().unwrap();
    for (name, v) in [("000002.json", 2.0), ("000000.json", 0.0), ("000001.json", 1.0)] {
        let data = json!([rows(17, 4, v)]);
        std::fs::write(temp_dir.path().join(name), data.to_string()).unwrap();
    }
    std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

    let frames = load_prediction_dir(temp_dir.path()).unwrap();
    assert_eq!(frames.len(), 3);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f[0].pose.joints()[5].x, i as f64);
    }
}

#[test]
fn test_frame_image_paths() {
    let paths = frame_image_paths("/data/Shelf", 300, 5);
    assert_eq!(paths.len(), 5);
    assert!(paths[0].ends_with("Camera0/img_000300.png"));
    assert!(paths[4].ends_with("Camera4/img_000300.png"));
}

#[test]
fn test_shelf_frame_range() {
    let range = shelf_frame_range();
    assert_eq!(range.len(), 301);
    assert_eq!(range[0], 300);
    assert_eq!(*range.last().unwrap(), 600);
}
