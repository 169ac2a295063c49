use std::time::Duration;

use pretty_assertions::assert_eq;
use pricewatch_engine::{
    ClientSettings, FailureKind, ReqwestScheduleClient, ScheduleClient, ScheduleResponse,
    TaskRequest, DEFAULT_SCHEDULE_PATH,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rice() -> TaskRequest {
    TaskRequest {
        task_name: "DailyRiceBuilder".to_string(),
        task_key: "daily-rice-builder-3d".to_string(),
    }
}

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    }
}

#[tokio::test]
async fn posts_form_body_and_decodes_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEFAULT_SCHEDULE_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "taskName=DailyRiceBuilder&taskKey=daily-rice-builder-3d",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "succeeded": "2024/03/01 09:30:00",
            "nextTime": "2024/03/04 09:00:00",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestScheduleClient::new(settings_for(&server)).expect("client");
    let response = client.fetch_schedule(&rice()).await.expect("fetch ok");

    assert_eq!(
        response,
        ScheduleResponse {
            state: Some("SUCCESS".to_string()),
            succeeded: Some("2024/03/01 09:30:00".to_string()),
            next_time: Some("2024/03/04 09:00:00".to_string()),
            error: None,
        }
    );
}

#[tokio::test]
async fn echoes_csrf_cookie_in_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEFAULT_SCHEDULE_PATH))
        .and(header("x-csrftoken", "tok123"))
        .and(header("cookie", "csrftoken=tok123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"state": "STARTED", "succeeded": "2024/03/01 09:30:00"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = ClientSettings {
        cookies: vec![("csrftoken".to_string(), "tok123".to_string())],
        ..settings_for(&server)
    };
    let client = ReqwestScheduleClient::new(settings).expect("client");
    let response = client.fetch_schedule(&rice()).await.expect("fetch ok");

    assert_eq!(response.state.as_deref(), Some("STARTED"));
    assert_eq!(response.next_time, None);
}

#[tokio::test]
async fn application_error_is_a_successful_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "No data found"})))
        .mount(&server)
        .await;

    let client = ReqwestScheduleClient::new(settings_for(&server)).expect("client");
    let response = client.fetch_schedule(&rice()).await.expect("fetch ok");

    assert_eq!(response.error.as_deref(), Some("No data found"));
    assert_eq!(response.state, None);
}

#[tokio::test]
async fn fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = ReqwestScheduleClient::new(settings_for(&server)).expect("client");
    let err = client.fetch_schedule(&rice()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(403));
}

#[tokio::test]
async fn fails_on_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = ReqwestScheduleClient::new(settings_for(&server)).expect("client");
    let err = client.fetch_schedule(&rice()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"state": "STARTED"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let client = ReqwestScheduleClient::new(settings).expect("client");
    let err = client.fetch_schedule(&rice()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}
