//! Urgency classification for scheduled follow-ups.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Days ahead that still count as "due soon". The boundary is inclusive:
/// a follow-up due exactly seven days out belongs to this week.
const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Where a scheduled follow-up sits relative to now.
///
/// A connection with no due date is never classified — it is filtered out
/// before classification, not mapped to a fourth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    DueSoon,
    Upcoming,
}

/// Classify a due instant against `now`.
///
/// Strictly-past due dates are overdue; anything due exactly now counts as
/// due-soon, not overdue.
pub fn classify(due_at: DateTime<Utc>, now: DateTime<Utc>) -> Urgency {
    if due_at < now {
        Urgency::Overdue
    } else if due_at <= now + Duration::days(DUE_SOON_WINDOW_DAYS) {
        Urgency::DueSoon
    } else {
        Urgency::Upcoming
    }
}

/// Whole days until a due date, rounded up; negative when overdue.
///
/// Drives "Due in N days" / "N days overdue" indicator copy.
pub fn days_until(due_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (due_at - now).num_seconds();
    // Ceiling division: partially-elapsed days still count as a full day out
    seconds.div_euclid(86_400) + if seconds.rem_euclid(86_400) > 0 { 1 } else { 0 }
}

/// Whole days elapsed since an instant, rounded down. Drives the
/// "It's been N days" reminder copy.
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days()
}

/// Indicator copy for a scheduled follow-up: "Due today", "Due in N days",
/// "N days overdue".
pub fn status_label(due_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = days_until(due_at, now);
    if days < 0 {
        let late = -days;
        if late == 1 {
            "1 day overdue".to_string()
        } else {
            format!("{} days overdue", late)
        }
    } else if days == 0 {
        "Due today".to_string()
    } else if days == 1 {
        "Due in 1 day".to_string()
    } else {
        format!("Due in {} days", days)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_due_exactly_now_is_not_overdue() {
        assert_eq!(classify(now(), now()), Urgency::DueSoon);
    }

    #[test]
    fn test_past_due_is_overdue() {
        assert_eq!(classify(now() - Duration::seconds(1), now()), Urgency::Overdue);
        assert_eq!(classify(now() - Duration::days(2), now()), Urgency::Overdue);
    }

    #[test]
    fn test_seven_day_boundary_is_inclusive() {
        assert_eq!(classify(now() + Duration::days(7), now()), Urgency::DueSoon);
        assert_eq!(
            classify(now() + Duration::days(7) + Duration::seconds(1), now()),
            Urgency::Upcoming
        );
    }

    #[test]
    fn test_ten_days_out_is_upcoming() {
        assert_eq!(classify(now() + Duration::days(10), now()), Urgency::Upcoming);
    }

    #[test]
    fn test_days_until_ceiling() {
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until(now() + Duration::days(3), now()), 3);
        assert_eq!(days_until(now() - Duration::days(2), now()), -2);
    }

    #[test]
    fn test_status_label_copy() {
        assert_eq!(status_label(now(), now()), "Due today");
        assert_eq!(status_label(now() + Duration::hours(3), now()), "Due in 1 day");
        assert_eq!(status_label(now() + Duration::days(5), now()), "Due in 5 days");
        assert_eq!(status_label(now() + Duration::days(10), now()), "Due in 10 days");
        assert_eq!(
            status_label(now() - Duration::hours(30), now()),
            "1 day overdue"
        );
        assert_eq!(status_label(now() - Duration::days(2), now()), "2 days overdue");
    }

    #[test]
    fn test_days_since_floor() {
        assert_eq!(days_since(now() - Duration::days(9), now()), 9);
        assert_eq!(days_since(now() - Duration::hours(30), now()), 1);
        assert_eq!(days_since(now(), now()), 0);
    }
}
