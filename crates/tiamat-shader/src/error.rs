use std::fmt;

/// A validation error from [`VertexLayout::validated`](crate::layout::VertexLayout::validated).
///
/// The unchecked constructors never produce these; they accept whatever the
/// caller supplies, as misuse of explicit offsets is caller responsibility
/// by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Two attributes occupy overlapping byte ranges.
    Overlap {
        first: String,
        second: String,
        offset: u32,
    },
    /// An explicit total stride is smaller than the computed minimum.
    StrideTooSmall { given: u32, required: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Overlap { first, second, offset } => {
                write!(f, "attribute {second:?} at offset {offset} overlaps {first:?}")
            }
            LayoutError::StrideTooSmall { given, required } => {
                write!(f, "explicit stride {given} is below the required minimum {required}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
