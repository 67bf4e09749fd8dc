use {
  self::{
    api::{InscriptionDetail, Utxo, UtxoPage},
    arguments::Arguments,
    explorer::{Explorer, Status},
    gateway::{Gateway, GatewayError, HttpGateway},
    media::Rendering,
    options::Options,
    pagination::Page,
    sidebar::{abbreviate, Selection, Sidebar},
    upstream::UpstreamClient,
  },
  anyhow::{anyhow, bail, ensure, Context, Error},
  clap::Parser,
  reqwest::Url,
  serde::{Deserialize, Serialize},
  serde_json::Value,
  snafu::Snafu,
  std::{
    env, io,
    net::ToSocketAddrs,
    process,
    sync::{
      atomic::{self, AtomicBool},
      Arc, Mutex,
    },
    time::Duration,
  },
  tokio::runtime::Runtime,
};


#[cfg(test)]
use self::test::*;

pub mod api;
pub mod arguments;
pub mod explorer;
pub mod gateway;
pub mod media;
pub mod options;
pub mod pagination;
pub mod sidebar;
pub mod subcommand;
pub mod upstream;

type Result<T = (), E = Error> = std::result::Result<T, E>;

static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);
static LISTENERS: Mutex<Vec<axum_server::Handle>> = Mutex::new(Vec::new());

fn print_json(output: impl Serialize) -> Result {
  serde_json::to_writer_pretty(io::stdout(), &output)?;
  println!();
  Ok(())
}

pub fn main() {
  env_logger::init();

  ctrlc::set_handler(move || {
    if SHUTTING_DOWN.fetch_or(true, atomic::Ordering::Relaxed) {
      process::exit(1);
    }

    eprintln!("Shutting down gracefully. Press <CTRL-C> again to shutdown immediately.");

    LISTENERS
      .lock()
      .unwrap()
      .iter()
      .for_each(|handle| handle.graceful_shutdown(Some(Duration::from_millis(100))));
  })
  .expect("Error setting <CTRL-C> handler");

  if let Err(err) = Arguments::parse().run() {
    eprintln!("error: {err}");

    for (i, err) in err.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();
        eprintln!("because:");
      }

      eprintln!("- {err}");
    }

    if env::var_os("RUST_BACKTRACE")
      .map(|val| val == "1")
      .unwrap_or_default()
    {
      eprintln!("{}", err.backtrace());
    }

    process::exit(1);
  }
}
