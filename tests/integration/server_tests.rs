/// Server construction, persistence and live socket tests
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use habit_tracker_server::*;

/// Poll until the registry holds `expected` listeners
async fn wait_for_listeners(listeners: &ListenerRegistry, expected: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while listeners.len() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("Expected {} listeners, found {}", expected, listeners.len()));
}

/// Start a JSON-backed server with one habit on an ephemeral port
async fn start_server(dir: &TempDir) -> (String, ServerHandles) {
    let server = HabitTrackerServer::new(ServerConfig::new(dir.path()))
        .await
        .expect("Failed to create server");
    add_habit(server.storage().as_ref(), "Read".to_string(), 30).unwrap();

    let handles = ServerHandles {
        storage: server.storage().clone(),
        listeners: server.listeners().clone(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.serve(listener));

    (format!("ws://{}/ws", addr), handles)
}

struct ServerHandles {
    storage: std::sync::Arc<dyn HabitStorage>,
    listeners: ListenerRegistry,
}

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_json_backend_creates_empty_snapshots() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let server = HabitTrackerServer::new(ServerConfig::new(dir.path()))
            .await
            .expect("Failed to create server");

        assert_eq!(std::fs::read_to_string(dir.path().join("habits.json")).unwrap(), "[]");
        assert_eq!(std::fs::read_to_string(dir.path().join("progress.json")).unwrap(), "[]");
        assert!(server.storage().load_habits().unwrap().is_empty());
        assert!(server.listeners().is_empty());
    }

    #[tokio::test]
    async fn test_data_persists_across_restarts() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        for backend in [StorageBackend::Json, StorageBackend::Sqlite] {
            let config = ServerConfig::new(dir.path().join(format!("{:?}", backend)))
                .with_backend(backend);

            let first = HabitTrackerServer::new(config.clone())
                .await
                .expect("Failed to create first server");
            let habit = add_habit(first.storage().as_ref(), "Read".to_string(), 30).unwrap();
            update_habit_progress(first.storage().as_ref(), habit.id).unwrap();
            drop(first);

            let second = HabitTrackerServer::new(config)
                .await
                .expect("Failed to create second server");
            let statuses = get_habits(second.storage().as_ref()).unwrap();

            assert_eq!(statuses.len(), 1, "backend {:?}", backend);
            assert_eq!(statuses[0].id, HabitId(1));
            assert!(statuses[0].completed);
        }
    }

    #[tokio::test]
    async fn test_sqlite_backend_creates_database_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = ServerConfig::new(dir.path()).with_backend(StorageBackend::Sqlite);

        let _server = HabitTrackerServer::new(config).await.expect("Failed to create server");
        assert!(dir.path().join("habits.db").exists());
    }

    #[tokio::test]
    async fn test_serves_http_on_listener() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let server = HabitTrackerServer::new(ServerConfig::new(dir.path()))
            .await
            .expect("Failed to create server");
        add_habit(server.storage().as_ref(), "Read".to_string(), 30).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(server.serve(listener));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /habits HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut response))
            .await
            .expect("Timed out waiting for response")
            .unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"status\":\"success\""));
        assert!(response.contains("\"name\":\"Read\""));
        assert!(response.contains("\"completed\":false"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_websocket_listener_receives_reminder() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (url, handles) = start_server(&dir).await;

        let (mut socket, _) = connect_async(url).await.expect("Failed to connect");
        wait_for_listeners(&handles.listeners, 1).await;

        // Inbound text is logged, never answered
        socket.send(Message::Text("hello".to_string())).await.unwrap();
        let reply = tokio::time::timeout(Duration::from_millis(200), socket.next()).await;
        assert!(reply.is_err(), "Unexpected reply: {:?}", reply);

        let scheduler = ReminderScheduler::new(handles.storage.clone(), handles.listeners.clone());
        assert_eq!(
            scheduler.run_once().unwrap(),
            ReminderOutcome::Sent {
                recipients: 1,
                habits: vec!["Read".to_string()],
            }
        );

        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("Timed out waiting for reminder")
            .expect("Socket closed before reminder")
            .unwrap();
        let payload: Value = serde_json::from_str(frame.to_text().unwrap()).unwrap();
        assert_eq!(payload["type"], "reminder");
        assert_eq!(payload["message"], "You have incomplete habits for today!");
        assert_eq!(payload["habits"], serde_json::json!(["Read"]));

        socket.close(None).await.unwrap();
        wait_for_listeners(&handles.listeners, 0).await;
    }

    #[tokio::test]
    async fn test_dropped_websocket_leaves_registry() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (url, handles) = start_server(&dir).await;

        let (mut staying, _) = connect_async(url.clone()).await.expect("Failed to connect");
        let (leaving, _) = connect_async(url).await.expect("Failed to connect");
        wait_for_listeners(&handles.listeners, 2).await;

        // No close frame, the TCP connection just goes away
        drop(leaving);
        wait_for_listeners(&handles.listeners, 1).await;

        let scheduler = ReminderScheduler::new(handles.storage.clone(), handles.listeners.clone());
        match scheduler.run_once().unwrap() {
            ReminderOutcome::Sent { recipients, .. } => assert_eq!(recipients, 1),
            other => panic!("Expected a sent reminder, got {:?}", other),
        }

        let frame = tokio::time::timeout(Duration::from_secs(5), staying.next())
            .await
            .expect("Timed out waiting for reminder")
            .expect("Socket closed before reminder")
            .unwrap();
        assert!(frame.is_text());
    }
}
