use super::*;

#[derive(Debug, Parser)]
#[command(version)]
pub struct Arguments {
  #[command(flatten)]
  pub options: Options,
  #[command(subcommand)]
  pub subcommand: subcommand::Subcommand,
}

impl Arguments {
  pub fn run(self) -> Result {
    self.subcommand.run(self.options)
  }
}
