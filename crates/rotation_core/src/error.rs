//! Error taxonomy for round generation

use crate::round::Format;
use crate::types::ParticipantId;
use thiserror::Error;

/// Structural failures of a round-generation call.
///
/// Partial fills (odd pool size, gender imbalance, too few participants for
/// even one match) are not errors; those cases yield a shorter or empty match
/// list instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    /// A format name from outside the process did not match any known format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A format needs a side map the caller did not supply at all.
    #[error("{format} requires a {field} map but none was supplied")]
    MissingContext { format: Format, field: &'static str },

    /// A mixed format met a pool member with no gender entry.
    #[error("no gender recorded for participant {0}")]
    MissingGender(ParticipantId),
}
