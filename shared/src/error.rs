use thiserror::Error;

/// Everything that can go wrong between the map and its surroundings.
///
/// None of these is allowed to escape an event handler; callers log and
/// degrade instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("could not load map image from {src}")]
    ResourceLoad { src: String },
    #[error("resource kind \"{0}\" not recognized")]
    UnrecognizedResourceKind(String),
    #[error("display element #{0} not found")]
    MissingElement(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("config: {0}")]
    Config(String),
}
