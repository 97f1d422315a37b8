//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// Turn-based decisions never suspend, so there is no `Running` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The condition held, or the action was applied.
    Success,

    /// The condition did not hold, or the action found nothing to apply to.
    Failure,
}

impl Status {
    /// Maps `true` to `Success` and `false` to `Failure`.
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value { Status::Success } else { Status::Failure }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Swaps `Success` and `Failure`.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        Status::from_bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_conversion_round_trips_through_invert() {
        assert_eq!(Status::from(true), Status::Success);
        assert_eq!(Status::from(false).invert(), Status::Success);
        assert!(Status::Failure.is_failure());
    }
}
