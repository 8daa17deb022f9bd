// Shared layout/animation tuning constants used by the core and the front-ends.

// Sizing
pub const SCALE_FACTOR: f32 = 2.0; // radius of the largest sphere

// Timeline
pub const FRAME_PAUSE: i32 = 24; // frames the camera holds on each sphere
pub const FRAME_MOVE: i32 = 36; // frames spent travelling to the next sphere
pub const DEFAULT_START_FRAME: i32 = 1; // first frame of the host's timeline

// Camera framing, relative to the framed sphere's radius
pub const CAMERA_DISTANCE_RADII: f32 = 10.0; // distance in front of the sphere (-Y)
pub const CAMERA_HEIGHT_RADII: f32 = 1.3; // height above the ground plane

// Sphere mesh resolution
pub const SPHERE_SEGMENTS: u32 = 64;
pub const SPHERE_RINGS: u32 = 32;

// Labels, relative to the sphere's radius
pub const NAME_LABEL_OFFSET: f32 = 1.35; // above the sphere center
pub const VALUE_LABEL_OFFSET: f32 = 1.3; // below the sphere center
pub const LABEL_SIZE_RATIO: f32 = 0.25;
pub const DEFAULT_VALUE_SUFFIX: &str = "LoC";

// Lighting
pub const KEY_LIGHT_ENERGY: f32 = 2.0;
pub const FILL_LIGHT_ENERGY: f32 = 0.2;
pub const KEY_LIGHT_OFFSET_RADII: f32 = 10.0;

// Background plane, relative to the layout extent (x of the last sphere)
pub const BACKGROUND_WIDTH_RATIO: f32 = 2.5;
pub const BACKGROUND_DEPTH_RATIO: f32 = 3.0; // distance behind the spheres (+Y)
pub const BACKGROUND_INSET: f32 = 0.1; // fraction of the plane pushed past the origin

// Appearance randomization ranges
pub const NOISE_SCALE_RANGE: (f32, f32) = (5.0, 20.0);
pub const NOISE_DETAIL_RANGE: (f32, f32) = (2.0, 100.0);
pub const NOISE_ROUGHNESS_RANGE: (f32, f32) = (0.3, 0.8);
pub const DEFAULT_SEED: u64 = 42;

// Built-in sample dataset: component name -> lines of code
pub const SAMPLE_DATASET: [(&str, f64); 7] = [
    ("Mail", 2301.0),
    ("JobCreator", 2754.0),
    ("JobReadinessChecker", 2841.0),
    ("InfraFailureAnalysis", 5033.0),
    ("Orchestrator", 5058.0),
    ("DropLocationScanner", 8977.0),
    ("TestFailureAnalysis", 12174.0),
];
