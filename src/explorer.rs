use super::*;

pub(crate) const LOOKUP_ERROR: &str =
  "Failed to fetch data. Please check the address and try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Status {
  #[default]
  Idle,
  Loading,
  Success,
  Error(String),
}

/// State machine behind the address-lookup view. Owns the entered address,
/// the current result page, and the active selection. Fetches are issued
/// with monotonically increasing tokens; an outcome is applied only if its
/// token is still the latest, so overlapping lookups settle on the most
/// recent request rather than whichever response arrives last.
#[derive(Debug)]
pub struct Explorer {
  address: String,
  page: Page,
  results: Vec<Utxo>,
  selection: Option<Selection>,
  status: Status,
  token: u64,
}

#[derive(Debug)]
pub struct LookupRequest {
  pub address: String,
  pub limit: u64,
  pub offset: u64,
  token: u64,
}

impl Explorer {
  pub fn new(address: String, limit: u64) -> Self {
    Self {
      address,
      page: Page::new(limit),
      results: Vec::new(),
      selection: None,
      status: Status::Idle,
      token: 0,
    }
  }

  pub fn set_address(&mut self, address: String) {
    self.address = address;
  }

  /// An empty address is still submitted; rejecting it is the lookup
  /// server's job.
  pub fn begin(&mut self, offset: u64) -> LookupRequest {
    self.token += 1;
    self.status = Status::Loading;
    self.results.clear();

    LookupRequest {
      address: self.address.clone(),
      limit: self.page.limit,
      offset,
      token: self.token,
    }
  }

  pub fn apply(&mut self, request: &LookupRequest, outcome: Result<UtxoPage, GatewayError>) {
    if request.token != self.token {
      return;
    }

    match outcome {
      Ok(page) => {
        self.results = page.results;
        self.page.offset = request.offset;
        self.page.total = page.total;
        self.status = Status::Success;
      }
      Err(err) => {
        log::warn!("address lookup failed: {err}");
        self.status = Status::Error(LOOKUP_ERROR.into());
      }
    }
  }

  pub async fn submit(&mut self, gateway: &impl Gateway, offset: u64) {
    let request = self.begin(offset);

    let outcome = gateway
      .ordinal_utxos(&request.address, request.limit, request.offset)
      .await;

    self.apply(&request, outcome);
  }

  pub async fn next_page(&mut self, gateway: &impl Gateway) {
    if self.page.has_next() {
      let offset = self.page.next_offset();
      self.submit(gateway, offset).await;
    }
  }

  pub async fn previous_page(&mut self, gateway: &impl Gateway) {
    if self.page.has_previous() {
      let offset = self.page.previous_offset();
      self.submit(gateway, offset).await;
    }
  }

  pub fn select_inscription(&mut self, inscription_id: String) {
    self.selection = Some(Selection {
      address: self.address.clone(),
      inscription_id,
    });
  }

  pub fn close_sidebar(&mut self) {
    self.selection = None;
  }

  pub fn address(&self) -> &str {
    &self.address
  }

  pub fn page(&self) -> Page {
    self.page
  }

  pub fn results(&self) -> &[Utxo] {
    &self.results
  }

  pub fn selection(&self) -> Option<&Selection> {
    self.selection.as_ref()
  }

  pub fn status(&self) -> &Status {
    &self.status
  }
}
