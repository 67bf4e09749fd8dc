use super::*;

#[derive(Debug, Parser)]
pub struct Inscription {
  #[arg(help = "Show the inscription owned by <ADDRESS>.")]
  address: String,
  #[arg(help = "Show inscription <INSCRIPTION_ID>.")]
  inscription_id: String,
}

#[derive(Debug, Serialize)]
pub struct Output {
  pub address: String,
  pub content_length: u64,
  pub content_type: Option<String>,
  pub genesis_transaction: String,
  pub id: String,
  pub location: String,
  pub number: i64,
  pub rendering: Rendering,
  pub value: u64,
}

impl Inscription {
  pub(crate) fn run(self, options: Options) -> Result {
    Runtime::new()?.block_on(async {
      let gateway = HttpGateway::new(options.server_url.clone())?;

      let sidebar = Sidebar::load(
        Selection {
          address: self.address,
          inscription_id: self.inscription_id,
        },
        &gateway,
      )
      .await;

      match (sidebar.status(), sidebar.detail()) {
        (Status::Error(message), _) => bail!("{message}"),
        (_, Some(detail)) => print_json(Output {
          address: detail.address.clone(),
          content_length: detail.content_length,
          content_type: detail.content_type.clone(),
          genesis_transaction: abbreviate(&detail.genesis_tx_id),
          id: detail.id.clone(),
          location: abbreviate(&detail.location),
          number: detail.number,
          rendering: Rendering::for_detail(detail, &options.content_url),
          value: detail.value,
        }),
        _ => unreachable!(),
      }
    })
  }
}
