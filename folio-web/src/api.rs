use folio_common::Manifest;

/// Served next to the images by the listing job
pub const MANIFEST_URL: &str = "/gallery/manifest.json";

pub async fn fetch_manifest() -> Result<Manifest, String> {
    let resp = reqwest::get(MANIFEST_URL)
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.status().is_success() {
        return Err(format!("Manifest request failed: {}", resp.status()));
    }

    let body = resp.text().await.map_err(|e| format!("Read error: {e}"))?;
    Manifest::from_json(&body).map_err(|e| format!("Parse error: {e}"))
}
