use super::*;
use async_trait::async_trait;
use axum::{routing::post, Json, Router};
use serde_json::json;
use shared::{domain::RiskLevel, risk::map_risk};
use std::sync::Mutex;
use tokio::net::TcpListener;

struct FakeGateway {
    response: Result<Value, NetworkError>,
    calls: Mutex<Vec<(Endpoint, Option<Value>)>>,
}

impl FakeGateway {
    fn ok(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: NetworkError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(err),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(Endpoint, Option<Value>)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RequestGateway for FakeGateway {
    async fn send(&self, endpoint: &Endpoint, payload: Option<Value>) -> Result<Value, NetworkError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((endpoint.clone(), payload));
        self.response.clone()
    }
}

fn transport_error() -> NetworkError {
    NetworkError::Transport {
        endpoint: "asset",
        message: "connection refused".to_string(),
    }
}

#[tokio::test]
async fn analyze_sends_text_and_maps_risk() {
    let gateway = FakeGateway::ok(json!({"risk": "medium"}));
    let client = RiskClient::new(gateway.clone());

    let response = client
        .analyze(&AnalysisRequest::new("rough week").expect("valid"))
        .await
        .expect("analyze");

    assert_eq!(response.risk, RiskLevel::Medium);
    assert_eq!(
        gateway.calls(),
        vec![(Endpoint::Analyze, Some(json!({"text": "rough week"})))]
    );
}

#[tokio::test]
async fn analyze_tolerates_unexpected_body() {
    let client = RiskClient::new(FakeGateway::ok(Value::Null));
    let response = client
        .analyze(&AnalysisRequest::new("hello").expect("valid"))
        .await
        .expect("analyze");
    assert_eq!(response.risk, RiskLevel::Unknown);
    assert_eq!(response.raw_risk, None);
}

#[tokio::test]
async fn feedback_and_label_send_wire_shapes() {
    let gateway = FakeGateway::ok(Value::Null);
    let client = RiskClient::new(gateway.clone());

    client
        .submit_feedback(&FeedbackSubmission::from_form("5", " helpful ").expect("valid"))
        .await
        .expect("feedback");
    client
        .submit_label(&LabelSubmission::new("text", Some("suicide")).expect("valid"))
        .await
        .expect("label");

    assert_eq!(
        gateway.calls(),
        vec![
            (
                Endpoint::Feedback,
                Some(json!({"rating": 5, "comments": "helpful"}))
            ),
            (
                Endpoint::Label,
                Some(json!({"text": "text", "label": "suicide"}))
            ),
        ]
    );
}

#[tokio::test]
async fn feedback_propagates_network_errors() {
    let client = RiskClient::new(FakeGateway::failing(NetworkError::Status {
        endpoint: "feedback",
        status: 503,
    }));
    let err = client
        .submit_feedback(&FeedbackSubmission::from_form("2", "").expect("valid"))
        .await
        .expect_err("must fail");
    assert_eq!(
        err,
        NetworkError::Status {
            endpoint: "feedback",
            status: 503
        }
    );
}

#[tokio::test]
async fn image_fetch_decodes_payload() {
    let encoded = STANDARD.encode(b"\x89PNG-bytes");
    let gateway = FakeGateway::ok(json!({ "image_base64": encoded.clone() }));
    let client = RiskClient::new(gateway.clone());

    let image = client.fetch_image("CDD").await.expect("image");

    assert_eq!(image.bytes, b"\x89PNG-bytes".to_vec());
    assert_eq!(image.data_uri(), format!("data:image/png;base64,{encoded}"));
    assert_eq!(image.alt_text(), "Visualization: CDD");
    assert_eq!(
        gateway.calls(),
        vec![(
            Endpoint::Asset(AssetRequest {
                kind: AssetKind::Image,
                name: "CDD".to_string()
            }),
            None
        )]
    );
}

#[tokio::test]
async fn image_fetch_without_payload_is_asset_error() {
    for body in [json!({}), json!({"image_base64": ""}), json!({"image_base64": null}), Value::Null] {
        let client = RiskClient::new(FakeGateway::ok(body.clone()));
        let err = client.fetch_image("WC").await.expect_err("must fail");
        assert_eq!(
            err,
            AssetError::MissingImageData {
                name: "WC".to_string()
            },
            "{body}"
        );
    }
}

#[tokio::test]
async fn image_fetch_with_bad_base64_is_asset_error() {
    let client = RiskClient::new(FakeGateway::ok(json!({"image_base64": "***"})));
    let err = client.fetch_image("WF").await.expect_err("must fail");
    assert!(matches!(err, AssetError::InvalidImageData { .. }));
}

#[tokio::test]
async fn asset_transport_failures_keep_network_cause() {
    let client = RiskClient::new(FakeGateway::failing(transport_error()));
    let err = client.fetch_log("backend").await.expect_err("must fail");
    assert_eq!(err, AssetError::Network(transport_error()));
}

#[tokio::test]
async fn log_fetch_returns_verbatim_text() {
    let text = "2025-04-01 INFO start\n  indented line\n";
    let client = RiskClient::new(FakeGateway::ok(json!({ "log_text": text })));
    let log = client.fetch_log("frontend").await.expect("log");
    assert_eq!(log.text, text);
    assert_eq!(log.name, "frontend");
}

#[tokio::test]
async fn log_fetch_without_text_is_asset_error() {
    let client = RiskClient::new(FakeGateway::ok(json!({"error": "Failed to read log file"})));
    let err = client.fetch_log("frontend").await.expect_err("must fail");
    assert_eq!(
        err,
        AssetError::MissingLogText {
            name: "frontend".to_string()
        }
    );
}

#[tokio::test]
async fn analyze_round_trips_through_http_backend() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/backend/predict",
        post(|Json(body): Json<Value>| async move {
            let risk = if body["text"] == "I feel hopeless" {
                "high"
            } else {
                "low"
            };
            Json(json!({ "risk": risk }))
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = RiskClient::connect(&format!("http://{addr}/backend")).expect("client");
    let response = client
        .analyze(&AnalysisRequest::new("I feel hopeless").expect("valid"))
        .await
        .expect("analyze");

    assert_eq!(map_risk(&response), shared::domain::DisplayState::Concerning);
}

#[tokio::test]
async fn feedback_and_label_accept_any_success_body() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/backend/feedback", post(|| async { "OK" }))
        .route("/backend/diagnostic", post(|| async { "<html>saved</html>" }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = RiskClient::connect(&format!("http://{addr}/backend")).expect("client");
    client
        .submit_feedback(&FeedbackSubmission::from_form("5", "thanks").expect("valid"))
        .await
        .expect("plain-text 200 is a successful feedback submission");
    client
        .submit_label(&LabelSubmission::new("some text", Some("non-suicide")).expect("valid"))
        .await
        .expect("html 200 is a successful label submission");
}

#[test]
fn unserializable_request_body_is_an_encode_error() {
    let mut body = std::collections::BTreeMap::new();
    body.insert((1, 2), "not a string key");

    let err = to_payload(&Endpoint::Feedback, &body).expect_err("must fail");
    assert!(matches!(err, NetworkError::Encode { endpoint: "feedback", .. }));
    assert!(err.to_string().starts_with("feedback request body could not be encoded"));
    assert!(!err.is_transport());
}
