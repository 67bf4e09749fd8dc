use super::*;

pub(crate) const DETAIL_ERROR: &str = "Failed to fetch data. Please try again.";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Selection {
  pub address: String,
  pub inscription_id: String,
}

/// State machine behind the detail panel. One `Sidebar` exists per open
/// panel; closing the panel drops it, so a fetch that resolves after close
/// has nothing to write into. Reselecting re-keys the panel, and outcomes
/// are applied only if both their token and their selection still match.
#[derive(Debug)]
pub struct Sidebar {
  detail: Option<InscriptionDetail>,
  selection: Selection,
  status: Status,
  token: u64,
}

#[derive(Debug)]
pub struct DetailRequest {
  selection: Selection,
  token: u64,
}

impl Sidebar {
  pub fn open(selection: Selection) -> (Self, DetailRequest) {
    let mut sidebar = Self {
      detail: None,
      selection,
      status: Status::Loading,
      token: 0,
    };

    let request = sidebar.begin();

    (sidebar, request)
  }

  fn begin(&mut self) -> DetailRequest {
    self.token += 1;
    self.status = Status::Loading;
    self.detail = None;

    DetailRequest {
      selection: self.selection.clone(),
      token: self.token,
    }
  }

  pub fn reselect(&mut self, selection: Selection) -> DetailRequest {
    self.selection = selection;
    self.begin()
  }

  pub fn apply(&mut self, request: &DetailRequest, outcome: Result<InscriptionDetail, GatewayError>) {
    if request.token != self.token || request.selection != self.selection {
      return;
    }

    match outcome {
      Ok(detail) => {
        self.detail = Some(detail);
        self.status = Status::Success;
      }
      Err(err) => {
        log::warn!("inscription detail fetch failed: {err}");
        self.status = Status::Error(DETAIL_ERROR.into());
      }
    }
  }

  pub async fn fetch(&mut self, gateway: &impl Gateway, request: DetailRequest) {
    let outcome = gateway
      .inscription_detail(&request.selection.address, &request.selection.inscription_id)
      .await;

    self.apply(&request, outcome);
  }

  pub async fn load(selection: Selection, gateway: &impl Gateway) -> Self {
    let (mut sidebar, request) = Self::open(selection);

    sidebar.fetch(gateway, request).await;

    sidebar
  }

  pub fn detail(&self) -> Option<&InscriptionDetail> {
    self.detail.as_ref()
  }

  pub fn rendering(&self, content_base: &Url) -> Option<Rendering> {
    self
      .detail
      .as_ref()
      .map(|detail| Rendering::for_detail(detail, content_base))
  }

  pub fn selection(&self) -> &Selection {
    &self.selection
  }

  pub fn status(&self) -> &Status {
    &self.status
  }
}

/// Shortens identifiers of the form `prefix:suffix` for display. The prefix
/// keeps its first and last twelve characters; the suffix after the first
/// colon is appended unchanged. Inputs short enough to display whole are
/// returned as-is.
pub fn abbreviate(text: &str) -> String {
  let (prefix, suffix) = match text.split_once(':') {
    Some((prefix, suffix)) => (prefix, Some(suffix)),
    None => (text, None),
  };

  let chars = prefix.chars().collect::<Vec<char>>();

  let prefix = if chars.len() > 24 {
    format!(
      "{}...{}",
      chars[..12].iter().collect::<String>(),
      chars[chars.len() - 12..].iter().collect::<String>(),
    )
  } else {
    prefix.into()
  };

  match suffix {
    Some(suffix) => format!("{prefix}:{suffix}"),
    None => prefix,
  }
}
