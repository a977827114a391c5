//! Placeholder substitution over static template text
//!
//! Substitution is plain global string replacement. There is no escaping and
//! no detection of unintended matches: a token that appears inside text meant
//! to be literal is replaced as well, and a substituted value that itself
//! contains a later token is rewritten by the later pass.

/// Placeholder replaced by the project name.
pub const PROJECT_NAME_TOKEN: &str = "PRJ-NAME";

/// Placeholder replaced by the environment (`dev` / `prod`).
pub const ENV_TOKEN: &str = "ENV";

/// Replace every occurrence of each token with its value, in the order given.
pub fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(template.to_string(), |text, (token, value)| text.replace(token, value))
}

/// Count non-overlapping occurrences of `token` in `text`.
pub fn count_occurrences(text: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    text.matches(token).count()
}
