//! Configuration validation logic.

use regex::Regex;
use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
///
/// Runs before any network activity.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_url(&config.url)?;
    validate_email(&config.email)?;
    validate_password(&config.password)?;
    validate_target(config)?;
    validate_courses(&config.courses)?;

    Ok(())
}

/// Validate the site origin.
pub fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::MissingConfig("URL".to_string()));
    }

    let parsed = Url::parse(url).map_err(|e| Error::ConfigValidation {
        field: "URL".to_string(),
        message: format!("'{}' is not a valid URL: {}", url, e),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "URL".to_string(),
            message: format!("Unsupported scheme '{}'", parsed.scheme()),
        });
    }

    if parsed.host().is_none() {
        return Err(Error::ConfigValidation {
            field: "URL".to_string(),
            message: format!("'{}' has no host", url),
        });
    }

    Ok(())
}

/// Validate the account e-mail.
pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(Error::MissingConfig("EMAIL".to_string()));
    }

    let email_pattern = Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email pattern");
    if !email_pattern.is_match(email.trim()) {
        return Err(Error::ConfigValidation {
            field: "EMAIL".to_string(),
            message: format!("'{}' is not an e-mail address", email),
        });
    }

    Ok(())
}

/// Validate the account password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::MissingConfig("PASSWORD".to_string()));
    }

    // Check for placeholder values
    let lower = password.to_lowercase();
    if lower == "replaceme" || lower == "your_password" {
        return Err(Error::ConfigValidation {
            field: "PASSWORD".to_string(),
            message: "Password appears to be a placeholder. Please provide your actual password."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the download directory.
pub fn validate_target(config: &Config) -> Result<()> {
    match &config.target {
        Some(target) if target.as_os_str().is_empty() => Err(Error::ConfigValidation {
            field: "TARGET".to_string(),
            message: "Download directory cannot be empty".to_string(),
        }),
        Some(target) if target.exists() && !target.is_dir() => Err(Error::ConfigValidation {
            field: "TARGET".to_string(),
            message: format!("'{}' exists and is not a directory", target.display()),
        }),
        Some(_) => Ok(()),
        None => Err(Error::MissingConfig("TARGET".to_string())),
    }
}

/// Validate the course allow-list.
pub fn validate_courses(courses: &[String]) -> Result<()> {
    if let Some(blank) = courses.iter().find(|c| c.trim().is_empty()) {
        return Err(Error::ConfigValidation {
            field: "COURSES".to_string(),
            message: format!("Course title cannot be blank (got '{}')", blank),
        });
    }

    Ok(())
}
