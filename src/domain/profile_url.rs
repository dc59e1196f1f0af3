pub const LINKEDIN_PREFIX: &str = "https://www.linkedin.com/";

/// Whole-batch check, a single foreign url rejects every url in the batch.
pub fn validate_profiles<S: AsRef<str>>(profiles: &[S]) -> bool {
    profiles
        .iter()
        .all(|profile| profile.as_ref().starts_with(LINKEDIN_PREFIX))
}
