//! Release feed check
//!
//! Looks up the project's published releases and prints a notice when a
//! newer build is available for download. Strictly best-effort: network
//! or decoding failures are ignored and never affect the run.

use serde::Deserialize;
use tracing::info;

const RELEASE_URL: &str = "https://api.github.com/repos/sylva-db/sylva/releases";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    name: String,
    browser_download_url: String,
}

/// Check the release feed and log a notice if a newer version exists.
pub async fn check_for_update() {
    let Some(current) = parse_version(env!("CARGO_PKG_VERSION")) else {
        return;
    };
    let releases = match fetch_releases().await {
        Ok(releases) => releases,
        Err(_) => return,
    };
    let mut newest: Option<(Version, String)> = None;
    for release in releases {
        let Some(version) = parse_version(release.tag_name.trim_start_matches('v')) else {
            continue;
        };
        let archive = format!("sylva-{}.tar.gz", release.tag_name);
        let Some(asset) = release.assets.iter().find(|asset| asset.name == archive) else {
            continue;
        };
        if newest.as_ref().map(|(v, _)| version > *v).unwrap_or(true) {
            newest = Some((version, asset.browser_download_url.clone()));
        }
    }
    if let Some((version, url)) = newest {
        if version > current {
            info!("=======================================");
            info!(
                "New version {}.{}.{} of sylva is available at:",
                version.0, version.1, version.2
            );
            info!("{}", url);
            info!("=======================================");
        }
    }
}

async fn fetch_releases() -> reqwest::Result<Vec<Release>> {
    reqwest::Client::builder()
        .user_agent(concat!("sylva/", env!("CARGO_PKG_VERSION")))
        .build()?
        .get(RELEASE_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

type Version = (u64, u64, u64);

fn parse_version(text: &str) -> Option<Version> {
    let mut parts = text.trim().splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    Some((major, minor, patch))
}
