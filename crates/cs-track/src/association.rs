//! Per-vehicle association state.

use std::fmt;

use cs_core::SiteId;

/// What a tracked vehicle is currently associated with.
///
/// `Unassociated` is a normal state, not an error: the vehicle is in the
/// simulation but no site lies within the maximum distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    Assigned(SiteId),
    Unassociated,
}

impl Association {
    /// Convert a resolver result into a state.
    #[inline]
    pub fn from_resolved(site: Option<SiteId>) -> Self {
        match site {
            Some(s) => Association::Assigned(s),
            None    => Association::Unassociated,
        }
    }

    /// The assigned site, if any.
    #[inline]
    pub fn site(&self) -> Option<&SiteId> {
        match self {
            Association::Assigned(s)  => Some(s),
            Association::Unassociated => None,
        }
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        matches!(self, Association::Assigned(_))
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Association::Assigned(s)  => write!(f, "site {s}"),
            Association::Unassociated => f.write_str("unassociated"),
        }
    }
}

/// Outcome of one [`observe`](crate::AssociationTracker::observe) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The vehicle had no record; one was created and resolved.
    Created(Association),

    /// The record was left unchanged (non-check step, still in range, or
    /// re-resolution produced the same answer).
    Kept,

    /// A check step moved the vehicle to a different association.
    Reassigned { from: Association, to: Association },
}

impl Transition {
    /// `true` for [`Transition::Reassigned`].
    pub fn is_handover(&self) -> bool {
        matches!(self, Transition::Reassigned { .. })
    }
}
