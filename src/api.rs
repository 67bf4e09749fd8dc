use {super::*, crate::gateway::UnexpectedFormat};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InscriptionSummary {
  pub id: String,
}

/// An unspent output as reported by the ordinal index. Only `inscriptions`
/// is relied upon; everything else is carried for display.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Utxo {
  #[serde(default)]
  pub inscriptions: Vec<InscriptionSummary>,
  pub txid: Option<String>,
  pub value: Option<u64>,
  pub vout: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UtxoPage {
  pub results: Vec<Utxo>,
  pub total: u64,
}

impl UtxoPage {
  pub fn from_value(value: Value) -> Result<Self, GatewayError> {
    if !value.get("results").map(Value::is_array).unwrap_or_default() {
      return UnexpectedFormat {
        reason: "`results` is not an array",
      }
      .fail();
    }

    serde_json::from_value(value).map_err(|err| {
      UnexpectedFormat {
        reason: err.to_string(),
      }
      .build()
    })
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InscriptionDetail {
  pub address: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  pub content_length: u64,
  pub content_type: Option<String>,
  pub genesis_tx_id: String,
  pub id: String,
  pub location: String,
  pub number: i64,
  pub value: u64,
}

impl InscriptionDetail {
  pub fn from_value(value: Value) -> Result<Self, GatewayError> {
    serde_json::from_value(value).map_err(|err| {
      UnexpectedFormat {
        reason: err.to_string(),
      }
      .build()
    })
  }
}
