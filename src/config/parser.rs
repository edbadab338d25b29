use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Every key is optional; anything missing keeps its default value.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pin_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML text without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
requests-per-second = 2.5
max-depth = 4
request-timeout-secs = 20
base-url = "https://www.pinterest.com"
user-agent = "TestHarvester/1.0"

[output]
database-path = "./test.db"
cookies-path = "./cookies.txt"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.requests_per_second, 2.5);
        assert_eq!(config.crawler.max_depth, 4);
        assert_eq!(config.crawler.request_timeout_secs, 20);
        assert_eq!(config.crawler.base_url, "https://www.pinterest.com");
        assert_eq!(config.output.database_path, "./test.db");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let file = create_temp_config("[crawler]\nmax-depth = 3\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.requests_per_second, 1.0);
        assert_eq!(config.crawler.request_timeout_secs, 15);
        assert_eq!(config.output.database_path, "pinterest.db");
        assert_eq!(config.output.cookies_path, "cookies.txt");
    }

    #[test]
    fn test_empty_file_is_default_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.crawler.max_depth, 1);
        assert_eq!(config.crawler.base_url, "https://de.pinterest.com");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nrequest-timeout-secs = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
