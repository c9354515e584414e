//! Suggested-frequency advisor.
//!
//! Seeds the frequency selector on the review form with a default based on
//! the relationship label. Advisory only — the scheduling engine never
//! consults it, and the user's explicit choice always wins.

use super::frequency::FollowUpFrequency;

/// Map a relationship type or tag to a suggested follow-up frequency.
///
/// Unrecognized labels fall back to monthly. Casual networking contacts are
/// the one quarterly case; everything else defaults to staying in monthly
/// touch rather than silently going cold.
pub fn suggest(relationship_type_or_tag: &str) -> FollowUpFrequency {
    match relationship_type_or_tag {
        "client" | "lead" | "warm-lead" => FollowUpFrequency::Weekly,
        "investor" | "collaborator" | "founder" => FollowUpFrequency::Biweekly,
        "mentor" | "mentee" | "professional" | "personal" => FollowUpFrequency::Monthly,
        "networking" => FollowUpFrequency::Quarterly,
        _ => FollowUpFrequency::Monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_touch_labels() {
        assert_eq!(suggest("client"), FollowUpFrequency::Weekly);
        assert_eq!(suggest("lead"), FollowUpFrequency::Weekly);
        assert_eq!(suggest("warm-lead"), FollowUpFrequency::Weekly);
        assert_eq!(suggest("investor"), FollowUpFrequency::Biweekly);
        assert_eq!(suggest("founder"), FollowUpFrequency::Biweekly);
    }

    #[test]
    fn test_steady_touch_labels() {
        assert_eq!(suggest("mentor"), FollowUpFrequency::Monthly);
        assert_eq!(suggest("professional"), FollowUpFrequency::Monthly);
        assert_eq!(suggest("personal"), FollowUpFrequency::Monthly);
        assert_eq!(suggest("networking"), FollowUpFrequency::Quarterly);
    }

    #[test]
    fn test_unrecognized_falls_back_to_monthly() {
        assert_eq!(suggest("other"), FollowUpFrequency::Monthly);
        assert_eq!(suggest("acquaintance"), FollowUpFrequency::Monthly);
        assert_eq!(suggest(""), FollowUpFrequency::Monthly);
    }

    #[test]
    fn test_never_suggests_none() {
        for label in ["client", "networking", "other", "garbage"] {
            assert_ne!(suggest(label), FollowUpFrequency::None);
        }
    }
}
