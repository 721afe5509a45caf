//! Tri-state evaluation status.

use std::fmt;

/// Outcome of evaluating one validator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// The condition holds.
    #[default]
    Ok,
    /// The condition does not hold.
    Fail,
    /// The node was skipped (filtered out or an unknown member under the
    /// ignore policy). Aggregations treat it as absent.
    Ignore,
}

impl Status {
    /// Maps a boolean check result.
    #[must_use]
    pub const fn from_bool(ok: bool) -> Self {
        if ok { Self::Ok } else { Self::Fail }
    }

    /// Swaps `Ok` and `Fail`; `Ignore` stays `Ignore`.
    #[must_use]
    pub const fn invert(self) -> Self {
        match self {
            Self::Ok => Self::Fail,
            Self::Fail => Self::Ok,
            Self::Ignore => Self::Ignore,
        }
    }

    /// Anything but `Fail`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Fail)
    }

    /// Returns true for `Ignore`.
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Ignore)
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        Self::from_bool(ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "ok",
            Self::Fail => "fail",
            Self::Ignore => "ignore",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_keeps_ignore() {
        assert_eq!(Status::Ok.invert(), Status::Fail);
        assert_eq!(Status::Fail.invert(), Status::Ok);
        assert_eq!(Status::Ignore.invert(), Status::Ignore);
    }

    #[test]
    fn ignore_is_success() {
        assert!(Status::Ignore.is_success());
        assert!(!Status::Fail.is_success());
    }
}
