// ABOUTME: Advisory check for environment variables the demo agents expect.
// ABOUTME: Missing variables produce a warning on stderr, never an error.

/// Variables checked when the config does not say otherwise.
pub const DEFAULT_REQUIRED_ENV: &[&str] = &["ANTHROPIC_API_KEY"];

/// Names from `required` that `lookup` reports as unset or empty.
pub fn missing_with<'a, F>(required: &'a [String], lookup: F) -> Vec<&'a str>
where
    F: Fn(&str) -> Option<String>,
{
    required
        .iter()
        .map(String::as_str)
        .filter(|name| lookup(name).map_or(true, |v| v.is_empty()))
        .collect()
}

/// Names from `required` missing from the process environment.
pub fn missing(required: &[String]) -> Vec<&str> {
    missing_with(required, |name| std::env::var(name).ok())
}

/// Warning lines for the variables in `missing`; empty when nothing is missing.
pub fn warning_lines(missing: &[&str]) -> Vec<String> {
    let mut lines: Vec<String> = missing
        .iter()
        .map(|name| {
            format!(
                "Warning: {} is not set. Some applications will prompt or fail.",
                name
            )
        })
        .collect();
    if !lines.is_empty() {
        lines.push("Export it or add to .env in the application directory.".to_string());
    }
    lines
}

/// Print a warning on stderr for every missing variable.
pub fn warn_missing(required: &[String]) {
    for line in warning_lines(&missing(required)) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_reports_unset_and_empty() {
        let names = required(&["SET", "EMPTY", "UNSET"]);
        let found = missing_with(&names, |name| match name {
            "SET" => Some("value".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        });
        assert_eq!(found, vec!["EMPTY", "UNSET"]);
    }

    #[test]
    fn test_nothing_required() {
        let found = missing_with(&[], |_| None);
        assert!(found.is_empty());
    }

    #[test]
    fn test_warning_lines_for_api_key() {
        let names = required(DEFAULT_REQUIRED_ENV);
        let found = missing_with(&names, |_| None);
        assert_eq!(
            warning_lines(&found),
            vec![
                "Warning: ANTHROPIC_API_KEY is not set. Some applications will prompt or fail."
                    .to_string(),
                "Export it or add to .env in the application directory.".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_warning_when_set() {
        let names = required(DEFAULT_REQUIRED_ENV);
        let found = missing_with(&names, |_| Some("sk-test".to_string()));
        assert!(warning_lines(&found).is_empty());
    }

    #[test]
    fn test_default_required_env() {
        assert_eq!(DEFAULT_REQUIRED_ENV, &["ANTHROPIC_API_KEY"]);
    }
}
