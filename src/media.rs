use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Media {
  Iframe,
  Image,
  Text,
}

impl Media {
  /// Untyped content is assumed to be binary and rendered as an image
  /// reference, matching how the index serves inscriptions inscribed
  /// without a content type.
  pub fn from_content_type(content_type: Option<&str>) -> Self {
    match content_type {
      Some(content_type) if content_type.starts_with("image/") => Self::Image,
      Some(content_type) if content_type.starts_with("text/") => Self::Iframe,
      None | Some("") => Self::Image,
      Some(_) => Self::Text,
    }
  }
}

pub fn content_url(base: &Url, inscription_id: &str) -> String {
  format!(
    "{}/content/{}",
    base.as_str().trim_end_matches('/'),
    inscription_id
  )
}

/// How one inscription should be presented: a reference to its content for
/// images and embedded documents, or the raw `content` field for everything
/// else. Constructing a `Rendering` performs no fetch of its own.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rendering {
  Iframe { url: String },
  Image { url: String },
  Text { content: String },
}

impl Rendering {
  pub fn for_detail(detail: &InscriptionDetail, content_base: &Url) -> Self {
    match Media::from_content_type(detail.content_type.as_deref()) {
      Media::Iframe => Self::Iframe {
        url: content_url(content_base, &detail.id),
      },
      Media::Image => Self::Image {
        url: content_url(content_base, &detail.id),
      },
      Media::Text => Self::Text {
        content: detail.content.clone().unwrap_or_default(),
      },
    }
  }
}
