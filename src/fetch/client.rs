// src/fetch/client.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header;

use crate::utils::error::{AppError, FetchError};

// Quote sites serve an empty shell to unknown agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 15;
// Politeness delay before every request
const REQUEST_DELAY_MS: u64 = 150;

// Listing pages: /autores/<letter>/<page>
static LISTING_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/autores/([a-z]+)/(\d+)").expect("Failed to compile LISTING_URL_RE")
});

/// Creates a reqwest client configured for page downloads.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

/// Downloads one page body, after the politeness delay.
pub async fn download_page(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    tokio::time::sleep(Duration::from_millis(REQUEST_DELAY_MS)).await;

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/json,text/plain,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Received {} - slow down or check the User-Agent.", status);
            return Err(FetchError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

/// File name for a saved snapshot of `url`.
///
/// Author listing pages keep a stable `<letter><page>.text` name so re-downloads
/// overwrite; anything else gets the last path segment plus a millisecond stamp.
pub fn snapshot_filename(url: &str, now: chrono::DateTime<chrono::Utc>) -> String {
    if let Some(caps) = LISTING_URL_RE.captures(url) {
        return format!("{}{}.text", &caps[1], &caps[2]);
    }

    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let location = without_scheme.split(['?', '#']).next().unwrap_or("");
    let path = location.split_once('/').map_or("", |(_, path)| path);
    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("page");
    let stem: String = segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}_{}.txt", stem, now.timestamp_millis())
}

/// Downloads `url` and writes the body into `folder`, returning the saved path.
pub async fn download_to_folder(
    client: &reqwest::Client,
    url: &str,
    folder: &Path,
) -> Result<PathBuf, AppError> {
    let body = download_page(client, url).await?;
    tokio::fs::create_dir_all(folder).await?;
    let path = folder.join(snapshot_filename(url, chrono::Utc::now()));
    tokio::fs::write(&path, body).await?;
    tracing::info!("Downloaded and saved to: {}", path.display());
    Ok(path)
}

/// Downloads `url` every `interval`, `rounds` times (or until Ctrl-C when `None`).
/// A failed round is logged and the loop carries on. Returns the number of pages saved.
pub async fn poll_to_folder(
    url: &str,
    folder: &Path,
    interval: Duration,
    rounds: Option<usize>,
) -> Result<usize, AppError> {
    let client = build_client().map_err(FetchError::from)?;
    let mut ticker = tokio::time::interval(interval);
    let mut saved = 0;
    let mut round = 0;

    loop {
        if rounds.is_some_and(|limit| round >= limit) {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping after {} rounds", round);
                break;
            }
        }
        round += 1;
        match download_to_folder(&client, url, folder).await {
            Ok(_) => saved += 1,
            Err(e) => tracing::error!("Round {} failed: {}", round, e),
        }
    }

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_listing_urls_get_stable_names() {
        assert_eq!(snapshot_filename("https://fraseslibros.com/autores/z/1", fixed_now()), "z1.text");
        assert_eq!(snapshot_filename("https://fraseslibros.com/autores/ab/12/", fixed_now()), "ab12.text");
    }

    #[test]
    fn test_other_urls_get_timestamped_names() {
        let millis = fixed_now().timestamp_millis();
        assert_eq!(
            snapshot_filename("https://uselessfacts.jsph.pl/random.html?language=en", fixed_now()),
            format!("random_html_{}.txt", millis)
        );
        assert_eq!(
            snapshot_filename("https://1000kitap.com/", fixed_now()),
            format!("page_{}.txt", millis)
        );
    }

    #[test]
    fn test_invalid_url_is_a_network_error() {
        let client = build_client().unwrap();
        let result = tokio_test::block_on(download_page(&client, "not a url"));
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
