use serde::{Deserialize, Serialize};

/// One end of a player-count interval.
///
/// `Least` and `Greatest` are the unbounded sentinels: `Least` sorts below
/// every finite value and `Greatest` above. The derived `Ord` relies on the
/// variant order here, so `Least` must stay first and `Greatest` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bound {
    /// Unbounded on the low side (compares below every finite value).
    Least,
    /// A concrete count.
    Finite(u32),
    /// Unbounded on the high side (compares above every finite value).
    Greatest,
}

impl Bound {
    /// Returns the finite value, if any.
    pub fn finite(self) -> Option<u32> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Least | Self::Greatest => None,
        }
    }

    /// Round a low bound up to the next multiple of `multiple_of`.
    /// Sentinels pass through unchanged. When no representable multiple
    /// exists at or above the value, the value is kept as-is: every
    /// multiple then lies below it, so a range built from it is empty.
    pub(crate) fn round_up_to_multiple(self, multiple_of: u32) -> Self {
        match self {
            Self::Finite(n) => {
                Self::Finite(n.checked_next_multiple_of(multiple_of).unwrap_or(n))
            }
            other => other,
        }
    }

    /// Round a high bound down to the previous multiple of `multiple_of`.
    /// Sentinels pass through unchanged.
    pub(crate) fn round_down_to_multiple(self, multiple_of: u32) -> Self {
        match self {
            Self::Finite(n) => Self::Finite(n - n % multiple_of),
            other => other,
        }
    }
}

impl From<u32> for Bound {
    fn from(n: u32) -> Self {
        Self::Finite(n)
    }
}
