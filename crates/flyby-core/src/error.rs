use thiserror::Error;

/// Failures that abort a flyby generation run.
///
/// Every variant is fatal: a partially built scene is never handed back.
#[derive(Debug, Error)]
pub enum FlybyError {
    #[error("dataset is empty; nothing to size")]
    EmptyDataset,

    #[error("no placements to animate")]
    EmptyTimeline,

    #[error("timeline does not fit in the host's frame range")]
    FrameOverflow,

    #[error("item `{name}` has invalid value {value}; values must be positive and finite")]
    InvalidValue { name: String, value: f64 },

    #[error("scale factor must be positive and finite, got {0}")]
    InvalidScaleFactor(f32),

    #[error("dataset line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("scene host request failed")]
    Host(#[source] anyhow::Error),
}

pub type Result<T, E = FlybyError> = std::result::Result<T, E>;
