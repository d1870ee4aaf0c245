//! Domain list reading

use crate::utils::FilterError;
use std::path::Path;

/// Read the candidate domain list, one domain per line
pub async fn read_domains(path: &Path) -> Result<Vec<String>, FilterError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FilterError::InputUnavailable {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

    Ok(parse_domains(&content))
}

/// Trim each line and drop blanks and `#` comments
pub fn parse_domains(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domains() {
        let domains = parse_domains("a.com\n  b.com  \n\n# comment\r\nc.no\r\n");
        assert_eq!(domains, vec!["a.com", "b.com", "c.no"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_domains("").is_empty());
        assert!(parse_domains("\n\n   \n").is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = read_domains(Path::new("/nonexistent/domains.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, FilterError::InputUnavailable { .. }));
    }
}
