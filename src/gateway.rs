use super::*;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum GatewayError {
  #[snafu(display("{message}"))]
  Upstream { message: String },
  #[snafu(display("unexpected response format: {reason}"))]
  UnexpectedFormat { reason: String },
}

/// The two lookup-server endpoints the state machines fetch through.
#[allow(async_fn_in_trait)]
pub trait Gateway {
  async fn ordinal_utxos(
    &self,
    address: &str,
    limit: u64,
    offset: u64,
  ) -> Result<UtxoPage, GatewayError>;

  async fn inscription_detail(
    &self,
    address: &str,
    inscription_id: &str,
  ) -> Result<InscriptionDetail, GatewayError>;
}

pub struct HttpGateway {
  client: reqwest::Client,
  server_url: Url,
}

impl HttpGateway {
  pub fn new(server_url: Url) -> Result<Self> {
    Ok(Self {
      client: reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?,
      server_url,
    })
  }

  async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value, GatewayError> {
    let url = self
      .server_url
      .join(path)
      .map_err(|err| Upstream { message: err.to_string() }.build())?;

    log::debug!("fetching {url}");

    let response = self
      .client
      .get(url)
      .query(query)
      .send()
      .await
      .map_err(|err| Upstream { message: err.to_string() }.build())?;

    let status = response.status();

    if !status.is_success() {
      let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("lookup server returned {status}"));

      return Upstream { message }.fail();
    }

    response
      .json()
      .await
      .map_err(|err| Upstream { message: err.to_string() }.build())
  }
}

impl Gateway for HttpGateway {
  async fn ordinal_utxos(
    &self,
    address: &str,
    limit: u64,
    offset: u64,
  ) -> Result<UtxoPage, GatewayError> {
    let value = self
      .fetch(
        "api/ordinal-lookup",
        &[
          ("address", address.into()),
          ("limit", limit.to_string()),
          ("offset", offset.to_string()),
        ],
      )
      .await?;

    UtxoPage::from_value(value)
  }

  async fn inscription_detail(
    &self,
    address: &str,
    inscription_id: &str,
  ) -> Result<InscriptionDetail, GatewayError> {
    let value = self
      .fetch(
        "api/inscription-details",
        &[
          ("address", address.into()),
          ("inscriptionId", inscription_id.into()),
        ],
      )
      .await?;

    InscriptionDetail::from_value(value)
  }
}
