use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server URL is set and uses http(s)
/// - Username is set
/// - Timeout is not 0
/// - At least one download dir, all absolute
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = config.server.url.trim();
    if url.is_empty() {
        return Err(ConfigError::ValidationError(
            "server.url cannot be empty".to_string(),
        ));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "server.url must start with http:// or https://, got {}",
            url
        )));
    }

    if config.server.username.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "server.username cannot be empty".to_string(),
        ));
    }

    if config.server.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "server.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.reconcile.download_dirs.is_empty() {
        return Err(ConfigError::ValidationError(
            "reconcile.download_dirs must contain at least one directory".to_string(),
        ));
    }

    for dir in &config.reconcile.download_dirs {
        if !dir.is_absolute() {
            return Err(ConfigError::ValidationError(format!(
                "download dir must be an absolute path: {}",
                dir.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::reconciler::ReconcileConfig;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                url: "http://localhost:8080".to_string(),
                username: "admin".to_string(),
                password: "adminadmin".to_string(),
                timeout_secs: 10,
                insecure_tls: false,
            },
            reconcile: ReconcileConfig {
                download_dirs: vec![PathBuf::from("/downloads")],
                delete_files: true,
                dry_run: false,
            },
        }
    }

    fn assert_invalid(config: &Config) {
        let err = validate_config(config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_url_fails() {
        let mut config = valid_config();
        config.server.url = "  ".to_string();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_url_without_scheme_fails() {
        let mut config = valid_config();
        config.server.url = "localhost:8080".to_string();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_empty_username_fails() {
        let mut config = valid_config();
        config.server.username = String::new();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = valid_config();
        config.server.timeout_secs = 0;
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_no_download_dirs_fails() {
        let mut config = valid_config();
        config.reconcile.download_dirs.clear();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_relative_download_dir_fails() {
        let mut config = valid_config();
        config
            .reconcile
            .download_dirs
            .push(PathBuf::from("relative/dir"));
        assert_invalid(&config);
    }
}
