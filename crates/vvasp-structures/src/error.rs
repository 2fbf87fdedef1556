use std::error::Error;
use std::fmt::{Display, Formatter};

/// Common error type for VVASP data operations.
///
/// Raised when parsing or validating the shared vocabulary types: axis-order
/// strings, movement direction names and probe geometry descriptions.
///
/// # Examples
/// ```
/// use vvasp_structures::{AxisOrder, VvaspDataError};
///
/// let err = "xxz".parse::<AxisOrder>().unwrap_err();
/// assert!(matches!(err, VvaspDataError::InvalidAxisOrder(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum VvaspDataError {
    /// Invalid parameters provided to a function
    BadParameters(String),
    /// Axis order string is not a permutation of "xyz"
    InvalidAxisOrder(String),
    /// Movement direction name is not part of the vocabulary
    UnknownDirection(String),
    /// Probe type identifier not present in the catalogue
    UnknownProbeType(String),
    /// Probe geometry description is internally inconsistent
    InvalidGeometry(String),
}

impl Display for VvaspDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VvaspDataError::BadParameters(msg) => write!(f, "Bad Parameters: {}", msg),
            VvaspDataError::InvalidAxisOrder(order) => write!(
                f,
                "Invalid axis order '{}': expected a permutation of \"xyz\"",
                order
            ),
            VvaspDataError::UnknownDirection(token) => {
                write!(f, "Unknown movement direction: '{}'", token)
            }
            VvaspDataError::UnknownProbeType(probetype) => {
                write!(f, "Unknown probe type: '{}'", probetype)
            }
            VvaspDataError::InvalidGeometry(msg) => write!(f, "Invalid probe geometry: {}", msg),
        }
    }
}
impl Error for VvaspDataError {}
