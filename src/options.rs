use super::*;

#[derive(Clone, Debug, Parser)]
pub struct Options {
  #[arg(
    long,
    env = "ORD_LOOKUP_CONTENT_URL",
    default_value = "https://ord.xverse.app",
    help = "Derive inscription content URLs from <CONTENT_URL>."
  )]
  pub(crate) content_url: Url,
  #[arg(
    long,
    env = "ORD_LOOKUP_INDEX_API_URL",
    default_value = "https://api-3.xverse.app",
    help = "Forward lookups to the ordinal index at <INDEX_API_URL>."
  )]
  pub(crate) index_api_url: Url,
  #[arg(
    long,
    env = "ORD_LOOKUP_SERVER_URL",
    default_value = "http://127.0.0.1:8080",
    help = "Query the lookup server at <SERVER_URL>."
  )]
  pub(crate) server_url: Url,
}
