//! Duration scaling for display

/// Convert a duration in seconds into the largest sensible unit.
///
/// Thresholds are checked in descending order with inclusive lower
/// bounds, so exactly 60 seconds prints as one minute. The column
/// output and its consumers key off these exact unit labels.
pub fn format_duration(seconds: f64) -> (f64, &'static str) {
    const UNITS: [(f64, &'static str); 3] = [(86_400.0, "days"), (3_600.0, "h"), (60.0, "min")];

    for (limit, unit) in UNITS {
        if seconds >= limit {
            return (seconds / limit, unit);
        }
    }
    (seconds, "s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_to_days() {
        assert_eq!(format_duration(90_000.0), (90_000.0 / 86_400.0, "days"));
    }

    #[test]
    fn scales_to_hours() {
        assert_eq!(format_duration(7_200.0), (2.0, "h"));
    }

    #[test]
    fn minute_bound_is_inclusive() {
        assert_eq!(format_duration(60.0), (1.0, "min"));
    }

    #[test]
    fn short_durations_stay_in_seconds() {
        assert_eq!(format_duration(45.0), (45.0, "s"));
        assert_eq!(format_duration(0.0), (0.0, "s"));
    }

    #[test]
    fn day_bound_is_inclusive() {
        assert_eq!(format_duration(86_400.0), (1.0, "days"));
        assert_eq!(format_duration(86_399.0), (86_399.0 / 3_600.0, "h"));
    }
}
