use {
  self::error::{ServerError, ServerResult},
  super::*,
  axum::{
    extract::{Extension, Query},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
  },
  axum_server::Handle,
  tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
  },
};

mod error;

#[derive(Debug, Deserialize)]
struct LookupQuery {
  address: Option<String>,
  limit: Option<u64>,
  offset: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailsQuery {
  address: Option<String>,
  inscription_id: Option<String>,
}

#[derive(Debug, Parser)]
pub struct Server {
  #[arg(
    long,
    default_value = "0.0.0.0",
    help = "Listen on <ADDRESS> for incoming requests."
  )]
  address: String,
  #[arg(
    long,
    default_value = "8080",
    help = "Listen on <HTTP_PORT> for incoming HTTP requests."
  )]
  http_port: u16,
}

impl Server {
  pub(crate) fn run(self, options: Options) -> Result {
    Runtime::new()?.block_on(async {
      let upstream = Arc::new(UpstreamClient::new(options.index_api_url.clone())?);

      let router = Router::new()
        .route("/api/inscription-details", get(Self::inscription_details))
        .route("/api/ordinal-lookup", get(Self::ordinal_lookup))
        .route("/status", get(Self::status))
        .layer(Extension(upstream))
        .layer(SetResponseHeaderLayer::if_not_present(
          header::CONTENT_SECURITY_POLICY,
          HeaderValue::from_static("default-src 'self'"),
        ))
        .layer(
          CorsLayer::new()
            .allow_methods([Method::GET])
            .allow_origin(Any),
        );

      let addr = (self.address.as_str(), self.http_port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| anyhow!("failed to get socket addrs"))?;

      let handle = Handle::new();

      LISTENERS.lock().unwrap().push(handle.clone());

      eprintln!("Listening on http://{addr}");

      axum_server::Server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

      Ok(())
    })
  }

  async fn status() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
  }

  async fn ordinal_lookup(
    Extension(upstream): Extension<Arc<UpstreamClient>>,
    Query(query): Query<LookupQuery>,
  ) -> ServerResult<Response> {
    let address = query.address.unwrap_or_default();

    if address.is_empty() {
      return Err(ServerError::BadRequest("Address is required".into()));
    }

    let utxos = upstream
      .ordinal_utxos(
        &address,
        query.limit.unwrap_or(5),
        query.offset.unwrap_or(0),
      )
      .await?;

    Ok(Json(utxos).into_response())
  }

  async fn inscription_details(
    Extension(upstream): Extension<Arc<UpstreamClient>>,
    Query(query): Query<DetailsQuery>,
  ) -> ServerResult<Response> {
    let detail = upstream
      .inscription_detail(
        &query.address.unwrap_or_default(),
        &query.inscription_id.unwrap_or_default(),
      )
      .await?;

    Ok(Json(detail).into_response())
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    axum::extract::{Path, RawQuery},
    serde_json::json,
    std::{
      net::TcpListener,
      sync::atomic::AtomicU64,
      thread,
    },
  };

  /// Stand-in for the upstream ordinal index: replays configured responses
  /// and records how it was called.
  #[derive(Clone)]
  struct Upstream {
    detail: Arc<Mutex<(u16, String)>>,
    detail_hits: Arc<AtomicU64>,
    utxo_query: Arc<Mutex<Option<String>>>,
    utxos: Arc<Mutex<(u16, String)>>,
    utxo_hits: Arc<AtomicU64>,
  }

  impl Upstream {
    fn spawn() -> (Self, Url) {
      let upstream = Self {
        detail: Arc::new(Mutex::new((200, "{}".into()))),
        detail_hits: Arc::new(AtomicU64::new(0)),
        utxo_query: Arc::new(Mutex::new(None)),
        utxos: Arc::new(Mutex::new((200, r#"{"results":[],"total":0}"#.into()))),
        utxo_hits: Arc::new(AtomicU64::new(0)),
      };

      let listener = TcpListener::bind("127.0.0.1:0").unwrap();
      let addr = listener.local_addr().unwrap();

      {
        let upstream = upstream.clone();
        thread::spawn(move || {
          Runtime::new().unwrap().block_on(async move {
            let router = Router::new()
              .route("/v1/address/{address}/ordinal-utxo", get(Self::utxos))
              .route(
                "/v1/address/{address}/ordinals/inscriptions/{inscription_id}",
                get(Self::detail),
              )
              .layer(Extension(upstream));

            axum_server::from_tcp(listener)
              .serve(router.into_make_service())
              .await
              .unwrap();
          });
        });
      }

      (upstream, Url::parse(&format!("http://{addr}")).unwrap())
    }

    async fn utxos(
      Extension(upstream): Extension<Upstream>,
      Path(_address): Path<String>,
      RawQuery(query): RawQuery,
    ) -> Response {
      upstream.utxo_hits.fetch_add(1, atomic::Ordering::Relaxed);
      *upstream.utxo_query.lock().unwrap() = query;

      let (status, body) = upstream.utxos.lock().unwrap().clone();

      Self::respond(status, body)
    }

    async fn detail(
      Extension(upstream): Extension<Upstream>,
      Path(_key): Path<(String, String)>,
    ) -> Response {
      upstream.detail_hits.fetch_add(1, atomic::Ordering::Relaxed);

      let (status, body) = upstream.detail.lock().unwrap().clone();

      Self::respond(status, body)
    }

    fn respond(status: u16, body: String) -> Response {
      (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
      )
        .into_response()
    }
  }

  struct TestServer {
    upstream: Upstream,
    url: Url,
  }

  impl TestServer {
    fn spawn() -> Self {
      let (upstream, upstream_url) = Upstream::spawn();

      let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

      let url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

      let options = Options {
        content_url: Url::parse("https://ord.xverse.app").unwrap(),
        index_api_url: upstream_url,
        server_url: url.clone(),
      };

      let server = Server {
        address: "127.0.0.1".into(),
        http_port: port,
      };

      thread::spawn(move || server.run(options).unwrap());

      for i in 0.. {
        match reqwest::blocking::get(url.join("status").unwrap()) {
          Ok(_) => break,
          Err(err) => {
            if i == 400 {
              panic!("server failed to start: {err}");
            }
          }
        }

        thread::sleep(Duration::from_millis(25));
      }

      Self { upstream, url }
    }

    fn get(&self, path: &str) -> reqwest::blocking::Response {
      reqwest::blocking::get(self.url.join(path).unwrap()).unwrap()
    }
  }

  #[test]
  fn missing_address_is_rejected_without_contacting_the_index() {
    let server = TestServer::spawn();

    let response = server.get("api/ordinal-lookup");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    pretty_assert_eq!(
      response.json::<Value>().unwrap(),
      json!({ "error": "Address is required" }),
    );
    assert_eq!(
      server.upstream.utxo_hits.load(atomic::Ordering::Relaxed),
      0
    );
  }

  #[test]
  fn empty_address_is_rejected_without_contacting_the_index() {
    let server = TestServer::spawn();

    let response = server.get("api/ordinal-lookup?address=");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      server.upstream.utxo_hits.load(atomic::Ordering::Relaxed),
      0
    );
  }

  #[test]
  fn lookup_passes_the_upstream_body_through_unmodified() {
    let server = TestServer::spawn();

    let body = json!({
      "limit": 5,
      "offset": 0,
      "results": [{
        "inscriptions": [{ "id": format!("{}i0", txid(1)) }],
        "txid": txid(1),
        "value": 546,
        "vout": 0,
      }],
      "total": 12,
    });

    *server.upstream.utxos.lock().unwrap() = (200, body.to_string());

    let response = server.get("api/ordinal-lookup?address=bc1qxyz");

    assert_eq!(response.status(), StatusCode::OK);
    pretty_assert_eq!(response.json::<Value>().unwrap(), body);
  }

  #[test]
  fn lookup_defaults_limit_and_offset_when_absent() {
    let server = TestServer::spawn();

    server.get("api/ordinal-lookup?address=bc1qxyz");

    assert_eq!(
      server.upstream.utxo_query.lock().unwrap().as_deref(),
      Some("limit=5&offset=0"),
    );

    server.get("api/ordinal-lookup?address=bc1qxyz&limit=10&offset=20");

    assert_eq!(
      server.upstream.utxo_query.lock().unwrap().as_deref(),
      Some("limit=10&offset=20"),
    );
  }

  #[test]
  fn upstream_failure_becomes_an_internal_error_with_the_cause() {
    let server = TestServer::spawn();

    *server.upstream.utxos.lock().unwrap() = (502, "bad gateway".into());

    let response = server.get("api/ordinal-lookup?address=bc1qxyz");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.json::<Value>().unwrap();

    assert!(body["error"].as_str().unwrap().contains("502"));
  }

  #[test]
  fn detail_passes_the_upstream_body_through_unmodified() {
    let server = TestServer::spawn();

    let body = json!({
      "address": "bc1qxyz",
      "content_length": 99,
      "content_type": "image/png",
      "genesis_tx_id": txid(1),
      "id": format!("{}i0", txid(1)),
      "location": format!("{}:0:0", txid(1)),
      "number": 21,
      "value": 546,
    });

    *server.upstream.detail.lock().unwrap() = (200, body.to_string());

    let response = server.get(&format!(
      "api/inscription-details?address=bc1qxyz&inscriptionId={}i0",
      txid(1),
    ));

    assert_eq!(response.status(), StatusCode::OK);
    pretty_assert_eq!(response.json::<Value>().unwrap(), body);
    assert_eq!(
      server.upstream.detail_hits.load(atomic::Ordering::Relaxed),
      1
    );
  }

  #[test]
  fn missing_detail_parameters_are_forwarded_not_rejected() {
    let server = TestServer::spawn();

    let response = server.get("api/inscription-details");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>().unwrap()["error"].is_string());
  }

  #[test]
  fn explorer_round_trip_through_the_gateway() {
    let server = TestServer::spawn();

    *server.upstream.utxos.lock().unwrap() = (
      200,
      json!({
        "results": [{ "inscriptions": [{ "id": format!("{}i0", txid(1)) }] }],
        "total": 12,
      })
      .to_string(),
    );

    block_on(async {
      let gateway = HttpGateway::new(server.url.clone()).unwrap();
      let mut explorer = Explorer::new("bc1qxyz".into(), 5);

      explorer.submit(&gateway, 0).await;

      assert_eq!(*explorer.status(), Status::Success);
      assert_eq!(explorer.results().len(), 1);
      assert_eq!(explorer.page().number(), 1);
      assert!(explorer.page().has_next());
      assert!(!explorer.page().has_previous());
    });
  }

  #[test]
  fn sidebar_round_trip_through_the_gateway() {
    let server = TestServer::spawn();

    *server.upstream.detail.lock().unwrap() = (
      200,
      json!({
        "address": "bc1qxyz",
        "content_length": 99,
        "content_type": "text/plain",
        "genesis_tx_id": txid(1),
        "id": format!("{}i0", txid(1)),
        "location": format!("{}:0:0", txid(1)),
        "number": 21,
        "value": 546,
      })
      .to_string(),
    );

    block_on(async {
      let gateway = HttpGateway::new(server.url.clone()).unwrap();

      let sidebar = Sidebar::load(
        Selection {
          address: "bc1qxyz".into(),
          inscription_id: format!("{}i0", txid(1)),
        },
        &gateway,
      )
      .await;

      assert_eq!(*sidebar.status(), Status::Success);
      assert_matches!(
        sidebar.rendering(&Url::parse("https://ord.xverse.app").unwrap()),
        Some(Rendering::Iframe { .. }),
      );
    });
  }

  #[test]
  fn malformed_upstream_results_surface_as_a_lookup_error() {
    let server = TestServer::spawn();

    *server.upstream.utxos.lock().unwrap() = (200, json!({ "total": 1 }).to_string());

    block_on(async {
      let gateway = HttpGateway::new(server.url.clone()).unwrap();
      let mut explorer = Explorer::new("bc1qxyz".into(), 5);

      explorer.submit(&gateway, 0).await;

      assert_matches!(explorer.status(), Status::Error(_));
      assert!(explorer.results().is_empty());
    });
  }
}
