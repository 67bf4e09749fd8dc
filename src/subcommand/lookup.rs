use super::*;

#[derive(Debug, Parser)]
pub struct Lookup {
  #[arg(
    long,
    default_value = "5",
    value_parser = clap::value_parser!(u64).range(1..),
    help = "Fetch <LIMIT> outputs per page."
  )]
  limit: u64,
  #[arg(long, default_value = "0", help = "Fetch outputs starting at <OFFSET>.")]
  offset: u64,
  #[arg(help = "Look up ordinal inscriptions owned by <ADDRESS>.")]
  address: String,
}

#[derive(Debug, Serialize)]
pub struct Output {
  pub more: bool,
  pub page: u64,
  pub results: Vec<Utxo>,
  pub total: u64,
}

impl Lookup {
  pub(crate) fn run(self, options: Options) -> Result {
    Runtime::new()?.block_on(async {
      let gateway = HttpGateway::new(options.server_url.clone())?;
      let mut explorer = Explorer::new(self.address, self.limit);

      explorer.submit(&gateway, self.offset).await;

      match explorer.status() {
        Status::Error(message) => bail!("{message}"),
        Status::Success => print_json(Output {
          more: explorer.page().has_next(),
          page: explorer.page().number(),
          results: explorer.results().to_vec(),
          total: explorer.page().total,
        }),
        Status::Idle | Status::Loading => unreachable!(),
      }
    })
  }
}
