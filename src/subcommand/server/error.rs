use {super::*, serde_json::json};

#[derive(Debug)]
pub(super) enum ServerError {
  BadRequest(String),
  Upstream(Error),
}

pub(super) type ServerResult<T = Response> = Result<T, ServerError>;

impl IntoResponse for ServerError {
  fn into_response(self) -> Response {
    match self {
      Self::BadRequest(message) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message })),
      )
        .into_response(),
      Self::Upstream(error) => {
        log::warn!("error serving request: {error}");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": error.to_string() })),
        )
          .into_response()
      }
    }
  }
}

impl From<Error> for ServerError {
  fn from(error: Error) -> Self {
    Self::Upstream(error)
  }
}
