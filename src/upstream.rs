use super::*;

/// Client for the upstream ordinal index. Responses are returned as raw
/// JSON values so the server can pass them through with field names
/// unchanged.
pub struct UpstreamClient {
  base_url: Url,
  client: reqwest::Client,
}

impl UpstreamClient {
  pub fn new(base_url: Url) -> Result<Self> {
    Ok(Self {
      base_url,
      client: reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?,
    })
  }

  pub async fn ordinal_utxos(&self, address: &str, limit: u64, offset: u64) -> Result<Value> {
    self
      .fetch(&format!(
        "v1/address/{}/ordinal-utxo?limit={limit}&offset={offset}",
        urlencoding::encode(address),
      ))
      .await
  }

  pub async fn inscription_detail(&self, address: &str, inscription_id: &str) -> Result<Value> {
    self
      .fetch(&format!(
        "v1/address/{}/ordinals/inscriptions/{}",
        urlencoding::encode(address),
        urlencoding::encode(inscription_id),
      ))
      .await
  }

  async fn fetch(&self, path: &str) -> Result<Value> {
    let url = self
      .base_url
      .join(path)
      .with_context(|| format!("failed to build ordinal index URL for `{path}`"))?;

    log::debug!("fetching {url}");

    let response = self
      .client
      .get(url.clone())
      .send()
      .await
      .with_context(|| format!("failed to reach ordinal index at {url}"))?;

    ensure!(
      response.status().is_success(),
      "ordinal index returned {} for {url}",
      response.status(),
    );

    response
      .json()
      .await
      .with_context(|| format!("failed to read ordinal index response from {url}"))
  }
}
