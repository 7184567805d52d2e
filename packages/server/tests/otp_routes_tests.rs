//! Router tests for `POST /send-otp` against a mock SMS gateway.

mod common;

use axum::http::StatusCode;
use common::ApiClient;
use serde_json::json;
use server_core::kernel::{MockSmsGateway, OtpCall, TestDependencies};
use server_core::server::build_app;
use server_core::ServiceVariant;

fn pj_client(deps: &TestDependencies) -> ApiClient {
    ApiClient::new(build_app(ServiceVariant::Pj, deps.server_deps()))
}

#[tokio::test]
async fn relays_gateway_reply_verbatim() {
    let reply = json!({
        "return": true,
        "request_id": "lwdtp7cjyqxvfe9",
        "message": ["SMS sent successfully."]
    });
    let deps = TestDependencies::new()
        .with_sms_gateway(MockSmsGateway::new().with_reply(reply.clone()));
    let api = pj_client(&deps);

    let response = api
        .post_json("/send-otp", json!({ "otp": "482913", "phone": "9999999999" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, reply);
    assert_eq!(
        deps.sms_gateway.calls(),
        vec![OtpCall {
            otp: "482913".to_string(),
            phone: "9999999999".to_string(),
        }]
    );
}

#[tokio::test]
async fn gateway_rejection_is_still_relayed() {
    let reply = json!({ "return": false, "status_code": 412, "message": "Invalid Authentication" });
    let deps = TestDependencies::new()
        .with_sms_gateway(MockSmsGateway::new().with_reply(reply.clone()));
    let api = pj_client(&deps);

    let response = api
        .post_json("/send-otp", json!({ "otp": "1", "phone": "2" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, reply);
}

#[tokio::test]
async fn values_are_forwarded_without_validation() {
    let deps = TestDependencies::new();
    let api = pj_client(&deps);

    api.post_json("/send-otp", json!({ "otp": 4821 })).await;
    api.post_json("/send-otp", json!({ "otp": "", "phone": "not-a-number" }))
        .await;

    assert_eq!(
        deps.sms_gateway.calls(),
        vec![
            OtpCall {
                otp: "4821".to_string(),
                phone: String::new(),
            },
            OtpCall {
                otp: String::new(),
                phone: "not-a-number".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn gateway_timeout_is_504() {
    let deps = TestDependencies::new().with_sms_gateway(MockSmsGateway::new().with_timeout());
    let api = pj_client(&deps);

    let response = api
        .post_json("/send-otp", json!({ "otp": "1", "phone": "2" }))
        .await;

    assert_eq!(response.status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.body, json!({ "error": "Gateway Timeout" }));
}

#[tokio::test]
async fn gateway_failure_is_generic_500() {
    let deps = TestDependencies::new()
        .with_sms_gateway(MockSmsGateway::new().with_failure("dns error: no such host"));
    let api = pj_client(&deps);

    let response = api
        .post_json("/send-otp", json!({ "otp": "1", "phone": "2" }))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({ "error": "Internal Server Error" }));
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn send_otp_is_not_mounted_on_pg() {
    let deps = TestDependencies::new();
    let api = ApiClient::new(build_app(ServiceVariant::Pg, deps.server_deps()));

    let response = api
        .post_json("/send-otp", json!({ "otp": "1", "phone": "2" }))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(deps.sms_gateway.calls().is_empty());
}
