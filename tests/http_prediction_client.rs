use stockdash::application::input_state::InputStateManager;
use stockdash::application::session::Session;
use stockdash::domain::errors::{NetworkError, SubmitError};
use stockdash::domain::features::{FeatureName, ValidatedPayload};
use stockdash::domain::ports::PredictionClient;
use stockdash::infrastructure::HttpPredictionClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

/// Serves exactly one canned HTTP response and hands back the request it received.
async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(request);
    });

    let url = Url::parse(&format!("http://{}/predict", addr)).unwrap();
    (url, rx)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

/// Direct connections only, whatever proxy the environment configures.
fn client_for(url: Url) -> HttpPredictionClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpPredictionClient::with_client(http, url)
}

fn filled_session() -> Session {
    let mut session = Session::default();
    let values = [
        "150.2", "149.5", "148.0", "149.8", "148.3", "0.5", "1.2", "1.5", "150.0", "149.7",
    ];
    for (feature, value) in FeatureName::ALL.into_iter().zip(values) {
        session.update_field(feature, value);
    }
    session
}

#[tokio::test]
async fn test_posts_all_features_and_reads_prediction() {
    let (url, request_rx) = serve_once("200 OK", r#"{"predicted_close": 152.34}"#).await;
    let client = client_for(url);
    let mut session = filled_session();

    let value = session.submit(&client).await.unwrap();
    assert_eq!(value, 152.34);
    assert_eq!(session.history().len(), 1);

    let request = request_rx.await.unwrap();
    assert!(request.starts_with("POST /predict"));
    let body = request.split("\r\n\r\n").nth(1).unwrap();
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 10);
    assert_eq!(obj["Close"], 150.2);
    assert_eq!(obj["SMA_7"], 149.5);
    assert_eq!(obj["Lag_2"], 149.7);
}

#[tokio::test]
async fn test_http_500_is_network_error() {
    let (url, _request_rx) =
        serve_once("500 Internal Server Error", r#"{"error": "model failed"}"#).await;
    let client = client_for(url);
    let mut session = filled_session();

    let result = session.submit(&client).await;

    match result {
        Err(SubmitError::Network(NetworkError::Status { status, body })) => {
            assert_eq!(status, 500);
            assert!(body.contains("model failed"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(session.current_prediction(), None);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_missing_field_is_network_error() {
    let (url, _request_rx) = serve_once("200 OK", r#"{"prediction": 152.34}"#).await;
    let client = client_for(url);
    let payload = filled_session_payload();

    assert_eq!(
        client.predict(&payload).await,
        Err(NetworkError::MissingPrediction)
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{}/predict", addr)).unwrap();
    let client = client_for(url);

    let result = client.predict(&filled_session_payload()).await;
    assert!(matches!(result, Err(NetworkError::Transport { .. })));
}

fn filled_session_payload() -> ValidatedPayload {
    let session = filled_session();
    let mut input = InputStateManager::new();
    for (feature, value) in session.features().iter() {
        input.update(feature, value);
    }
    input.to_validated_payload().unwrap()
}

#[tokio::test]
async fn test_health_check_returns_banner() {
    let (url, request_rx) = serve_once("200 OK", "Stock Price Prediction API is running!").await;
    let client = client_for(url);

    let banner = client.check_health().await.unwrap();
    assert_eq!(banner, "Stock Price Prediction API is running!");

    let request = request_rx.await.unwrap();
    assert!(request.starts_with("GET / "));
}
