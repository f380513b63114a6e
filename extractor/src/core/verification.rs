//! Model-checker console output scraping.

/// First `Result: <number>` value printed by the model checker, if any.
pub fn parse_verification_probability(stdout: &str) -> Option<f64> {
    use std::sync::LazyLock;
    static RESULT_RE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"Result:\s+([\d.]+)").unwrap());

    RESULT_RE
        .captures_iter(stdout)
        .find_map(|caps| caps[1].parse().ok())
}
