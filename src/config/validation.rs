use crate::config::types::CrawlOptions;
use crate::ConfigError;
use url::Url;

/// Upper bound on the crawl depth accepted from the CLI
const MAX_DEPTH_BOUND: u32 = 10;

/// Validates crawl options before a run starts
///
/// Checks performed:
/// - The target URL parses, uses HTTP(S), and has a host
/// - `max_depth` is within the 0-10 bound
/// - The request timeout is non-zero
/// - The output directory is non-empty
///
/// A delay of zero is deliberately accepted: pacing is the caller's
/// responsibility and no internal floor is imposed.
pub fn validate(options: &CrawlOptions) -> Result<(), ConfigError> {
    let url = Url::parse(&options.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", options.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "only HTTP and HTTPS URLs are supported, got scheme '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "URL has no host: {}",
            options.base_url
        )));
    }

    if options.max_depth > MAX_DEPTH_BOUND {
        return Err(ConfigError::Validation(format!(
            "max depth must be between 0 and {}, got {}",
            MAX_DEPTH_BOUND, options.max_depth
        )));
    }

    if options.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request timeout must be greater than zero".to_string(),
        ));
    }

    if options.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory must not be empty".to_string(),
        ));
    }

    Ok(())
}
