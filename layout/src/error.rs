/// Errors produced by layout engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// No preset carries the requested name.
    #[error("layout preset not found: {0}")]
    PresetNotFound(String),

    /// No aspect ratio carries the requested identifier.
    #[error("aspect ratio not found: {0}")]
    AspectRatioNotFound(String),

    /// A region mutation named a region the layout does not contain.
    #[error("region not found: {0}")]
    RegionNotFound(String),

    /// Two regions in one layout share an identifier.
    #[error("duplicate region id: {0}")]
    DuplicateRegion(String),

    /// The stack order names a region the layout does not contain.
    #[error("stack order references unknown region: {0}")]
    UnknownStackEntry(String),

    /// A region is absent from the stack order.
    #[error("region missing from stack order: {0}")]
    MissingFromStack(String),
}

impl LayoutError {
    /// Whether this error is a catalog lookup miss (unknown preset or aspect ratio).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PresetNotFound(_) | Self::AspectRatioNotFound(_) | Self::RegionNotFound(_))
    }
}
