use chrono::{Datelike, Utc};

/// Source of the "current year" used to judge experience claims.
/// The scanner never reads the wall clock itself; callers inject one of these.
pub trait YearClock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Reads the calendar year from the system clock (UTC).
pub struct SystemYearClock;

impl YearClock for SystemYearClock {
    fn current_year(&self) -> i32 {
        Utc::now().year()
    }
}

/// Always reports the same year. Used for the `CURRENT_YEAR` override and in tests.
pub struct FixedYearClock(pub i32);

impl YearClock for FixedYearClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_its_year() {
        assert_eq!(FixedYearClock(2024).current_year(), 2024);
    }

    #[test]
    fn test_system_clock_is_plausible() {
        assert!(SystemYearClock.current_year() >= 2024);
    }
}
