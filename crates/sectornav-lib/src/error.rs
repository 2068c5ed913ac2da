use std::fmt;

use thiserror::Error;

use crate::grid::SectorId;

/// Convenient result alias for the sector routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a sector identifier falls outside the grid.
    #[error("sector {sector} is outside the {width}x{width} grid")]
    SectorOutOfRange { sector: SectorId, width: u16 },

    /// Raised when a grid width cannot form a valid sector range.
    #[error("grid width {width} is not in 1..=255")]
    InvalidGridWidth { width: u16 },

    /// Raised when epoch cutover instants are not strictly increasing.
    #[error("epoch cutovers must be strictly increasing (cutover {index} is not)")]
    UnorderedCutovers { index: usize },

    /// Raised when a link registry does not have exactly one more rule set
    /// than cutovers.
    #[error("link registry has {rules} rule sets for {cutovers} cutovers")]
    RuleCountMismatch { rules: usize, cutovers: usize },

    /// Raised when no route could be found between two sectors.
    #[error("no route from {from} to {to}: {reason}")]
    RouteNotFound {
        from: SectorId,
        to: SectorId,
        reason: NoRouteReason,
    },
}

/// Why a routing query produced no route.
///
/// Route-not-found is an expected outcome, not an exceptional one; callers
/// match on this to distinguish a blocked endpoint from an exhausted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRouteReason {
    /// The origin or destination itself is in the obstacle set.
    EndpointBlocked,
    /// No planet can reach the origin within the length cap.
    NoInboundLandmark,
    /// No planet or beacon offers an exit from the destination within the cap.
    NoOutboundLandmark,
    /// Every candidate route exceeded the length cap.
    CapExceeded { max_len: u32 },
}

impl fmt::Display for NoRouteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoRouteReason::EndpointBlocked => f.write_str("an endpoint is obstructed"),
            NoRouteReason::NoInboundLandmark => f.write_str("no landmark reaches the origin"),
            NoRouteReason::NoOutboundLandmark => {
                f.write_str("no landmark exit from the destination")
            }
            NoRouteReason::CapExceeded { max_len } => {
                write!(f, "no route within {max_len} moves")
            }
        }
    }
}
