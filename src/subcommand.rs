use super::*;

mod inscription;
mod lookup;
mod server;

#[derive(Debug, Parser)]
pub enum Subcommand {
  Inscription(inscription::Inscription),
  Lookup(lookup::Lookup),
  Server(server::Server),
}

impl Subcommand {
  pub(crate) fn run(self, options: Options) -> Result {
    match self {
      Self::Inscription(inscription) => inscription.run(options),
      Self::Lookup(lookup) => lookup.run(options),
      Self::Server(server) => server.run(options),
    }
  }
}
