use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  client: reqwest::Client,
}

impl Client {
  /// Posts the form fields `author` and `text`. The response must be JSON,
  /// but its contents are not used.
  pub(crate) async fn add_comment(
    &self,
    url: Url,
    author: &str,
    text: &str,
  ) -> Result<(), RequestError> {
    let response = self
      .client
      .post(url)
      .form(&[("author", author), ("text", text)])
      .send()
      .await?;

    let text = Self::check_status(&response)?;

    response
      .json::<Value>()
      .await
      .map_err(|source| RequestError::from(source).with_status_text(text))?;

    Ok(())
  }

  fn cache_buster() -> String {
    SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|elapsed| elapsed.as_millis())
      .unwrap_or_default()
      .to_string()
  }

  /// Fails on a non-success status. Either way the status text is returned,
  /// preferring the reason phrase the server sent over the standard one.
  fn check_status(
    response: &Response,
  ) -> Result<Option<String>, RequestError> {
    let status = response.status();

    let text = response
      .extensions()
      .get::<ReasonPhrase>()
      .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
      .or_else(|| status.canonical_reason().map(str::to_owned));

    if status.is_success() {
      Ok(text)
    } else {
      Err(RequestError::Status {
        code: status.as_u16(),
        text,
      })
    }
  }

  pub(crate) async fn fetch_comments(
    &self,
    url: Url,
    limit: usize,
  ) -> Result<Vec<Comment>, RequestError> {
    let response = self
      .client
      .get(url)
      .query(&[("limit", limit.to_string()), ("_", Self::cache_buster())])
      .send()
      .await?;

    let text = Self::check_status(&response)?;

    response
      .json::<Vec<Comment>>()
      .await
      .map_err(|source| RequestError::from(source).with_status_text(text))
  }

  /// Builds a client whose every request gives up after `timeout`.
  pub(crate) fn new(timeout: Duration) -> Result<Self> {
    Ok(Self {
      client: reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("could not build HTTP client")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    axum::{
      Form, Json, Router,
      extract::Query,
      http::StatusCode as AxumStatus,
      routing::{get, post},
    },
    std::{collections::HashMap, net::SocketAddr},
    tokio::{
      io::{AsyncReadExt, AsyncWriteExt},
      net::TcpListener,
    },
  };

  async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });

    address
  }

  fn url(address: SocketAddr, path: &str) -> Url {
    Url::parse(&format!("http://{address}{path}")).unwrap()
  }

  #[tokio::test]
  async fn fetch_comments_sends_limit_and_decodes_records() {
    let router = Router::new().route(
      "/comments",
      get(|Query(query): Query<HashMap<String, String>>| async move {
        let limit = query.get("limit").cloned().unwrap_or_default();
        let busted = query.contains_key("_");

        Json(serde_json::json!([
          {"author": "server", "text": format!("limit={limit}")},
          {"author": "cache", "text": format!("busted={busted}"), "id": 2},
        ]))
      }),
    );

    let address = serve(router).await;

    let client = Client::new(Duration::from_secs(5)).unwrap();

    let comments = client
      .fetch_comments(url(address, "/comments"), 7)
      .await
      .unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].author(), "server");
    assert_eq!(comments[0].text(), "limit=7");
    assert_eq!(comments[1].text(), "busted=true");
    assert_eq!(comments[1].field("id"), Some("2".to_string()));
  }

  #[tokio::test]
  async fn add_comment_posts_form_fields() {
    let router = Router::new().route(
      "/add",
      post(|Form(form): Form<HashMap<String, String>>| async move {
        if form.get("author").map(String::as_str) == Some("alice")
          && form.get("text").map(String::as_str) == Some("hello, world")
        {
          (AxumStatus::OK, Json(serde_json::json!({"ok": true})))
        } else {
          (AxumStatus::BAD_REQUEST, Json(serde_json::json!({})))
        }
      }),
    );

    let address = serve(router).await;

    let client = Client::new(Duration::from_secs(5)).unwrap();

    client
      .add_comment(url(address, "/add"), "alice", "hello, world")
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn error_status_carries_reason_phrase() {
    let router = Router::new().route(
      "/comments",
      get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
    );

    let address = serve(router).await;

    let client = Client::new(Duration::from_secs(5)).unwrap();

    let error = client
      .fetch_comments(url(address, "/comments"), 30)
      .await
      .unwrap_err();

    assert!(matches!(error, RequestError::Status { code: 500, .. }));
    assert_eq!(error.user_message(), "Internal Server Error");
  }

  #[tokio::test]
  async fn custom_reason_phrase_is_passed_through() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
      let (mut stream, _) = listener.accept().await.unwrap();

      let mut request = [0; 1024];
      let _ = stream.read(&mut request).await.unwrap();

      stream
        .write_all(
          b"HTTP/1.1 400 Comment Too Long\r\n\
            content-length: 0\r\n\
            connection: close\r\n\r\n",
        )
        .await
        .unwrap();
    });

    let client = Client::new(Duration::from_secs(5)).unwrap();

    let error = client
      .fetch_comments(url(address, "/comments"), 30)
      .await
      .unwrap_err();

    assert!(matches!(error, RequestError::Status { code: 400, .. }));
    assert_eq!(error.user_message(), "Comment Too Long");
  }

  #[tokio::test]
  async fn slow_server_times_out() {
    let router = Router::new().route(
      "/comments",
      get(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Json(serde_json::json!([]))
      }),
    );

    let address = serve(router).await;

    let client = Client::new(Duration::from_millis(100)).unwrap();

    let error = client
      .fetch_comments(url(address, "/comments"), 30)
      .await
      .unwrap_err();

    assert!(matches!(error, RequestError::Timeout));
    assert_eq!(error.user_message(), "Timeout Error");
  }

  #[tokio::test]
  async fn non_json_submit_response_is_a_failure() {
    let router = Router::new().route("/add", post(|| async { "saved" }));

    let address = serve(router).await;

    let client = Client::new(Duration::from_secs(5)).unwrap();

    let error = client
      .add_comment(url(address, "/add"), "a", "b")
      .await
      .unwrap_err();

    assert!(matches!(error, RequestError::Decode { .. }));
    assert_eq!(error.user_message(), "OK");
  }

  #[tokio::test]
  async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(Duration::from_secs(5)).unwrap();

    let error = client
      .fetch_comments(url(address, "/comments"), 30)
      .await
      .unwrap_err();

    assert!(matches!(error, RequestError::Transport { .. }));
    assert_eq!(error.user_message(), "Unknown Server Error");
  }
}
