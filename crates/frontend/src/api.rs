use choropleth_shared::models::{Dataset, LoadError};
use reqwest::Url;
use tracing::{error, info};

/// The data file, resolved against the page URL so a sub-path deployment
/// fetches its own copy.
pub const DATA_FILE: &str = "county_map_data.json";

fn data_url_for(page_href: &str) -> Result<String, LoadError> {
    Url::parse(page_href)
        .and_then(|page| page.join(DATA_FILE))
        .map(String::from)
        .map_err(|e| LoadError::Network(format!("bad data url: {e}")))
}

fn data_url() -> Result<String, LoadError> {
    let href = web_sys::window()
        .ok_or_else(|| LoadError::Network("no window".to_string()))?
        .location()
        .href()
        .map_err(|e| LoadError::Network(format!("{e:?}")))?;
    data_url_for(&href)
}

async fn fetch_body() -> Result<String, LoadError> {
    let url = data_url()?;
    info!(%url, "fetching county map data");

    let resp = reqwest::get(&url)
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    info!(bytes = body.len(), "fetched county map data");
    Ok(body)
}

/// Fetch and parse the dataset once. Failures are logged here; the caller
/// only decides what to show.
pub async fn fetch_dataset() -> Result<Dataset, LoadError> {
    let result = async { Dataset::from_json_str(&fetch_body().await?) }.await;
    match &result {
        Ok(dataset) => info!(features = dataset.len(), "parsed county map data"),
        Err(e) => error!(error = %e, "error loading map data"),
    }
    result
}
