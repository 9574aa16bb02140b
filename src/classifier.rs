use crate::model::StageType;

const BUILD_KEYWORDS: &[&str] = &["build", "compile", "package"];
const TEST_KEYWORDS: &[&str] = &["test", "unit", "integration"];
const DELIVER_KEYWORDS: &[&str] = &["deploy", "deliver", "publish", "release"];
const SECURITY_KEYWORDS: &[&str] = &["security", "scan", "vulnerability", "audit"];

/// Checked in order; the first category with a keyword contained in the name wins.
const CATEGORIES: &[(StageType, &[&str])] = &[
    (StageType::Build, BUILD_KEYWORDS),
    (StageType::Test, TEST_KEYWORDS),
    (StageType::Deliver, DELIVER_KEYWORDS),
    (StageType::Security, SECURITY_KEYWORDS),
];

/// Classifies a stage by keywords in its name, defaulting to [`StageType::Build`].
pub fn classify(stage_name: &str) -> StageType {
    let lower = stage_name.to_lowercase();

    CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(StageType::Build, |(stage_type, _)| *stage_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_wins_over_test_when_both_present() {
        assert_eq!(classify("Build and Test"), StageType::Build);
    }

    #[test]
    fn classifies_security_stage() {
        assert_eq!(classify("Security Audit"), StageType::Security);
    }

    #[test]
    fn classifies_deliver_stage() {
        assert_eq!(classify("Deploy to Prod"), StageType::Deliver);
        assert_eq!(classify("Publish Docs"), StageType::Deliver);
    }

    #[test]
    fn classifies_test_stage() {
        assert_eq!(classify("Run Tests"), StageType::Test);
        assert_eq!(classify("Integration"), StageType::Test);
    }

    #[test]
    fn defaults_to_build_without_keyword() {
        assert_eq!(classify("Lint"), StageType::Build);
        assert_eq!(classify(""), StageType::Build);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("VULNERABILITY SCAN"), StageType::Security);
    }

    #[test]
    fn test_checked_before_deliver() {
        assert_eq!(classify("Release Tests"), StageType::Test);
    }
}
