use thiserror::Error;

/// Errors raised while choosing a graph variant or parsing planner identifiers.
///
/// Writes that are structurally invalid (a missing endpoint, a forbidden self-loop)
/// are not errors. They leave the graph unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unsupported descriptor bits {bits:#05b}")]
    UnsupportedDescriptorBits { bits: u8 },

    #[error("unknown graph descriptor `{0}`")]
    UnknownDescriptor(String),

    #[error("`directed` and `undirected` requested together")]
    ConflictingOrientation,

    #[error("invalid operation path `{0}`")]
    InvalidOperationPath(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
