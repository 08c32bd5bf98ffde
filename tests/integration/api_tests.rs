/// HTTP API tests driven through the router without opening a socket
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use habit_tracker_server::*;

fn test_server() -> HabitTrackerServer {
    HabitTrackerServer::with_storage(
        ServerConfig::new("unused"),
        Arc::new(MemoryStorage::new()),
    )
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, name: &str, daily_goal: Value) -> (StatusCode, Value) {
    let body = json!({"name": name, "daily_goal": daily_goal});
    send(app, Method::POST, "/habits", Some(body)).await
}

#[cfg(test)]
mod router_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_update_and_list_scenario() {
        let server = test_server();
        let app = server.router();

        let (status, body) = create(&app, "Read", json!(30)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["error"], Value::Null);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["name"], "Read");
        assert_eq!(body["data"]["daily_goal"], 30);
        assert!(body["data"]["daily_goal"].is_u64());
        assert_eq!(body["data"]["active"], true);

        let (status, body) = send(&app, Method::PUT, "/habits/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["habit_id"], 1);
        assert_eq!(body["data"]["status"], true);
        assert_eq!(body["data"]["date"], domain::today().to_string());

        let (status, body) = send(&app, Method::GET, "/habits", None).await;
        assert_eq!(status, StatusCode::OK);
        let habits = body["data"].as_array().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0]["id"], 1);
        assert_eq!(habits[0]["name"], "Read");
        assert_eq!(habits[0]["completed"], true);

        let incomplete = get_incomplete_habits(server.storage().as_ref()).unwrap();
        assert!(incomplete.is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_name_and_goal() {
        let app = test_server().router();

        for body in [
            json!({"daily_goal": 30}),
            json!({"name": "Read"}),
            json!({"name": "", "daily_goal": 30}),
            json!({"name": "Read", "daily_goal": 0}),
        ] {
            let (status, response) = send(&app, Method::POST, "/habits", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["status"], "error");
            assert_eq!(response["data"], Value::Null);
            assert_eq!(response["error"], "Name and daily_goal are required");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_body() {
        let app = test_server().router();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/habits")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_update_rejects_non_integer_id() {
        let app = test_server().router();
        let (status, body) = send(&app, Method::PUT, "/habits/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_update_twice_keeps_one_record() {
        let server = test_server();
        let app = server.router();
        create(&app, "Read", json!(30)).await;

        send(&app, Method::PUT, "/habits/1", None).await;
        send(&app, Method::PUT, "/habits/1", None).await;

        let records = server.storage().load_progress().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].status);
    }

    #[tokio::test]
    async fn test_update_unknown_habit_succeeds() {
        let server = test_server();
        let app = server.router();

        let (status, body) = send(&app, Method::PUT, "/habits/7", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["habit_id"], 7);
        assert!(server.storage().load_habits().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_weekly_report_shape() {
        let app = test_server().router();
        create(&app, "Read", json!(30)).await;
        create(&app, "Walk", json!(2)).await;
        send(&app, Method::PUT, "/habits/2", None).await;

        let (status, body) = send(&app, Method::GET, "/habits/report", None).await;
        assert_eq!(status, StatusCode::OK);

        let report = body["data"]["weekly_report"].as_array().unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0]["habit"], "Read");
        assert_eq!(
            report[0]["weekly_progress"],
            json!([false, false, false, false, false, false, false])
        );
        assert_eq!(report[1]["habit"], "Walk");
        assert_eq!(
            report[1]["weekly_progress"],
            json!([false, false, false, false, false, false, true])
        );
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let app = test_server().router();
        let (status, body) = send(&app, Method::GET, "/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_goal_is_echoed_as_sent() {
        let server = test_server();
        let app = server.router();

        create(&app, "Read", json!(30)).await;
        create(&app, "Walk", json!(2.5)).await;

        let (_, body) = send(&app, Method::GET, "/habits", None).await;
        assert_eq!(body["data"][0]["daily_goal"].to_string(), "30");
        assert_eq!(body["data"][1]["daily_goal"].to_string(), "2.5");
    }

    #[tokio::test]
    async fn test_wrong_method_uses_envelope() {
        let app = test_server().router();

        for (method, uri) in [
            (Method::DELETE, "/habits/1"),
            (Method::GET, "/habits/1"),
            (Method::PUT, "/habits/report"),
            (Method::DELETE, "/habits"),
        ] {
            let (status, body) = send(&app, method.clone(), uri, None).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
            assert_eq!(body["status"], "error");
            assert_eq!(body["data"], Value::Null);
            assert!(body["error"].as_str().unwrap().contains("not allowed"));
        }
    }

    #[tokio::test]
    async fn test_listener_path_requires_upgrade() {
        let app = test_server().router();
        let (status, _) = send(&app, Method::GET, "/ws", None).await;

        assert!(status.is_client_error());
    }
}
