//! Joint orderings and limb tables shared by the remapper and the evaluator.
//!
//! Predictions come out in COCO order (17 joints). Shelf ground truth uses its
//! own 14 joint order. All index arithmetic goes through these tables.

/// COCO keypoint order, as produced by the 2D detector and lifted to 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CocoJoint {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

pub const NUM_COCO_JOINTS: usize = 17;

impl CocoJoint {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Shelf dataset joint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShelfJoint {
    RightAnkle = 0,
    RightKnee = 1,
    RightHip = 2,
    LeftHip = 3,
    LeftKnee = 4,
    LeftAnkle = 5,
    RightWrist = 6,
    RightElbow = 7,
    RightShoulder = 8,
    LeftShoulder = 9,
    LeftElbow = 10,
    LeftWrist = 11,
    BottomHead = 12,
    TopHead = 13,
}

pub const NUM_SHELF_JOINTS: usize = 14;

pub const SHELF_JOINTS: [ShelfJoint; NUM_SHELF_JOINTS] = [
    ShelfJoint::RightAnkle,
    ShelfJoint::RightKnee,
    ShelfJoint::RightHip,
    ShelfJoint::LeftHip,
    ShelfJoint::LeftKnee,
    ShelfJoint::LeftAnkle,
    ShelfJoint::RightWrist,
    ShelfJoint::RightElbow,
    ShelfJoint::RightShoulder,
    ShelfJoint::LeftShoulder,
    ShelfJoint::LeftElbow,
    ShelfJoint::LeftWrist,
    ShelfJoint::BottomHead,
    ShelfJoint::TopHead,
];

impl ShelfJoint {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ShelfJoint::RightAnkle => "Right-Ankle",
            ShelfJoint::RightKnee => "Right-Knee",
            ShelfJoint::RightHip => "Right-Hip",
            ShelfJoint::LeftHip => "Left-Hip",
            ShelfJoint::LeftKnee => "Left-Knee",
            ShelfJoint::LeftAnkle => "Left-Ankle",
            ShelfJoint::RightWrist => "Right-Wrist",
            ShelfJoint::RightElbow => "Right-Elbow",
            ShelfJoint::RightShoulder => "Right-Shoulder",
            ShelfJoint::LeftShoulder => "Left-Shoulder",
            ShelfJoint::LeftElbow => "Left-Elbow",
            ShelfJoint::LeftWrist => "Left-Wrist",
            ShelfJoint::BottomHead => "Bottom-Head",
            ShelfJoint::TopHead => "Top-Head",
        }
    }

    pub fn from_name(name: &str) -> Option<ShelfJoint> {
        SHELF_JOINTS.iter().copied().find(|j| j.name() == name)
    }
}

/// Source COCO index copied into Shelf slots 0..12.
pub const COCO_TO_SHELF: [CocoJoint; 12] = [
    CocoJoint::RightAnkle,
    CocoJoint::RightKnee,
    CocoJoint::RightHip,
    CocoJoint::LeftHip,
    CocoJoint::LeftKnee,
    CocoJoint::LeftAnkle,
    CocoJoint::RightWrist,
    CocoJoint::RightElbow,
    CocoJoint::RightShoulder,
    CocoJoint::LeftShoulder,
    CocoJoint::LeftElbow,
    CocoJoint::LeftWrist,
];

/// Edges drawn when rendering a Shelf skeleton. Not used for scoring.
pub const SKELETON_LIMBS: [(ShelfJoint, ShelfJoint); 14] = [
    (ShelfJoint::RightAnkle, ShelfJoint::RightKnee),
    (ShelfJoint::RightKnee, ShelfJoint::RightHip),
    (ShelfJoint::LeftHip, ShelfJoint::LeftKnee),
    (ShelfJoint::LeftKnee, ShelfJoint::LeftAnkle),
    (ShelfJoint::RightHip, ShelfJoint::LeftHip),
    (ShelfJoint::RightWrist, ShelfJoint::RightElbow),
    (ShelfJoint::RightElbow, ShelfJoint::RightShoulder),
    (ShelfJoint::LeftShoulder, ShelfJoint::LeftElbow),
    (ShelfJoint::LeftElbow, ShelfJoint::LeftWrist),
    (ShelfJoint::RightHip, ShelfJoint::RightShoulder),
    (ShelfJoint::LeftHip, ShelfJoint::LeftShoulder),
    (ShelfJoint::RightShoulder, ShelfJoint::BottomHead),
    (ShelfJoint::LeftShoulder, ShelfJoint::BottomHead),
    (ShelfJoint::BottomHead, ShelfJoint::TopHead),
];

/// Limbs scored directly from joint pairs. Bone index == position here.
pub const SCORED_LIMBS: [(ShelfJoint, ShelfJoint); 9] = [
    (ShelfJoint::RightAnkle, ShelfJoint::RightKnee),
    (ShelfJoint::RightKnee, ShelfJoint::RightHip),
    (ShelfJoint::LeftHip, ShelfJoint::LeftKnee),
    (ShelfJoint::LeftKnee, ShelfJoint::LeftAnkle),
    (ShelfJoint::RightWrist, ShelfJoint::RightElbow),
    (ShelfJoint::RightElbow, ShelfJoint::RightShoulder),
    (ShelfJoint::LeftShoulder, ShelfJoint::LeftElbow),
    (ShelfJoint::LeftElbow, ShelfJoint::LeftWrist),
    (ShelfJoint::BottomHead, ShelfJoint::TopHead),
];

/// Bone index of the synthetic hip-midpoint to bottom-head segment.
pub const TORSO_BONE: usize = SCORED_LIMBS.len();

pub const NUM_SCORED_BONES: usize = SCORED_LIMBS.len() + 1;

/// Anatomical groups reported in the bone PCP table, in output order.
pub const BONE_GROUPS: [(&str, &[usize]); 6] = [
    ("Head", &[8]),
    ("Torso", &[TORSO_BONE]),
    ("Upper arms", &[5, 6]),
    ("Lower arms", &[4, 7]),
    ("Upper legs", &[1, 2]),
    ("Lower legs", &[0, 3]),
];
