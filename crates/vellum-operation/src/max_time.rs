use std::time::Duration;

/// Server-side execution time limit for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxTime {
    /// No limit; the command document carries no `maxTimeMS`.
    Infinite,
    /// Wall-clock limit, encoded as whole milliseconds.
    Limit(Duration),
}

impl MaxTime {
    /// Millisecond value for the `maxTimeMS` field, if one applies.
    pub(crate) fn as_millis(self) -> Option<i64> {
        match self {
            MaxTime::Infinite => None,
            MaxTime::Limit(d) => Some(i64::try_from(d.as_millis()).unwrap_or(i64::MAX)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::MaxTime;

    #[test]
    fn infinite_has_no_millis() {
        assert_eq!(MaxTime::Infinite.as_millis(), None);
    }

    #[test]
    fn zero_is_zero_millis() {
        assert_eq!(MaxTime::Limit(Duration::ZERO).as_millis(), Some(0));
    }

    #[test]
    fn finite_limits_encode_as_millis() {
        assert_eq!(
            MaxTime::Limit(Duration::from_millis(500)).as_millis(),
            Some(500)
        );
        assert_eq!(
            MaxTime::Limit(Duration::from_secs(2)).as_millis(),
            Some(2000)
        );
    }

    #[test]
    fn oversized_limits_saturate_instead_of_wrapping() {
        assert_eq!(MaxTime::Limit(Duration::MAX).as_millis(), Some(i64::MAX));
    }

    #[test]
    fn sub_millisecond_remainders_truncate() {
        assert_eq!(
            MaxTime::Limit(Duration::from_micros(1500)).as_millis(),
            Some(1)
        );
    }
}
