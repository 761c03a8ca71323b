#![allow(dead_code)]

use axum_test::{TestServer, TestWebSocket, WsMessage};
use tokio::time::{Duration, timeout};

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect presenting the credential as `Authorization: Bearer <token>`
    pub async fn connect(server: &TestServer, token: &str) -> Self {
        let ws = server
            .get_websocket("/events")
            .add_header("Authorization", format!("Bearer {token}"))
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    /// Connect presenting the credential as `?token=<token>`
    pub async fn connect_with_query(server: &TestServer, token: &str) -> Self {
        let ws = server
            .get_websocket(&format!("/events?token={token}"))
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    pub async fn receive_text(&mut self) -> String {
        self.ws.receive_text().await
    }

    pub async fn receive_json(&mut self) -> serde_json::Value {
        serde_json::from_str(&self.receive_text().await).expect("frame is not JSON")
    }

    /// Next text frame, or `None` if nothing arrives within `wait`
    pub async fn try_receive_text(&mut self, wait: Duration) -> Option<String> {
        timeout(wait, self.ws.receive_text()).await.ok()
    }

    pub async fn receive_message(&mut self) -> WsMessage {
        self.ws.receive_message().await
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Connect `count` subscribers with the same credential
pub async fn create_clients(server: &TestServer, token: &str, count: usize) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(WsTestClient::connect(server, token).await);
    }
    clients
}
