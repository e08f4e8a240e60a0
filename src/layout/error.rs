use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// `min_distance` must be strictly positive and finite; anything else
    /// would disable separation or never terminate.
    #[error("invalid parameter: min_distance must be positive and finite, got {value}")]
    InvalidParameter { value: f32 },

    /// Label positions must be finite; NaN and infinity have no usable
    /// ordering against the accepted set.
    #[error("invalid input: non-finite position {value} at index {index}")]
    InvalidInput { index: usize, value: f32 },

    #[error("timeline has no events to lay out")]
    EmptyTimeline,
}
