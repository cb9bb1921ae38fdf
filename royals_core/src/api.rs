use async_trait::async_trait;
use log::debug;

use crate::{
    error::ApiError, game_state::GameState, play::ActionId, wire::RawGameState,
};

/// The three exchanges the game server offers. Each answers with a full
/// snapshot.
#[async_trait]
pub trait GameApi: Send + Sync + 'static {
    /// Starts a fresh game.
    async fn reset(&self) -> Result<GameState, ApiError>;

    /// Advances one automated turn.
    async fn step(&self) -> Result<GameState, ApiError>;

    /// Submits the human's move.
    async fn play(&self, action: ActionId) -> Result<GameState, ApiError>;
}

pub struct HttpGameApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGameApi {
    pub fn new(base_url: &str) -> Self {
        HttpGameApi {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<GameState, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.bytes().await?;
        let raw: RawGameState = serde_json::from_slice(&body)?;
        Ok(GameState::try_from(raw)?)
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn reset(&self) -> Result<GameState, ApiError> {
        self.fetch("reset").await
    }

    async fn step(&self) -> Result<GameState, ApiError> {
        self.fetch("step").await
    }

    async fn play(&self, action: ActionId) -> Result<GameState, ApiError> {
        self.fetch(&format!("step/{}", action)).await
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    };

    use crate::{
        api::{GameApi, HttpGameApi},
        card::Card,
        error::{ApiError, UnknownCard},
    };

    #[test]
    fn new_should_strip_trailing_slashes() {
        let api = HttpGameApi::new("http://localhost:5000/api/");

        assert_eq!(api.base_url, "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn step_should_report_a_non_success_status() {
        let (base_url, _) = serve_once("503 Service Unavailable", String::new()).await;

        let result = local_api(&base_url).step().await;

        match result {
            Err(ApiError::Status { status, url }) => {
                assert_eq!(status, 503);
                assert_eq!(url, format!("{base_url}/step"));
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn play_should_request_the_move_id_and_decode_the_snapshot() {
        let (base_url, request) = serve_once("200 OK", SNAPSHOT.to_string()).await;

        let game = local_api(&base_url).play(12).await.unwrap();

        assert_eq!(request.await.unwrap(), "GET /api/step/12 HTTP/1.1");
        assert_eq!(game.cards_remaining, 5);
        assert_eq!(game.hand, vec![Card::Priest]);
        assert_eq!(game.current_player, None);
    }

    #[tokio::test]
    async fn reset_should_reject_an_unknown_rank() {
        let body = SNAPSHOT.replace("\"hand\": [2]", "\"hand\": [9]");
        let (base_url, _) = serve_once("200 OK", body).await;

        let result = local_api(&base_url).reset().await;

        assert!(matches!(result, Err(ApiError::Card(UnknownCard(9)))));
    }

    #[tokio::test]
    async fn reset_should_reject_a_malformed_body() {
        let (base_url, _) = serve_once("200 OK", "{\"cardsRemaining\": ".to_string()).await;

        let result = local_api(&base_url).reset().await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    // Infra ----------------------------------------------------------------

    const SNAPSHOT: &str = r#"{
        "cardsRemaining": 5,
        "currentPlayer": null,
        "discard": [],
        "gameOver": false,
        "hand": [2],
        "players": [{"active": true, "name": "You", "position": 0, "safe": false}],
        "plays": [],
        "priestInfo": {},
        "validActions": [],
        "winners": []
    }"#;

    fn local_api(base_url: &str) -> HttpGameApi {
        HttpGameApi {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.to_string(),
        }
    }

    /// Answers a single request with `status` and `body`, handing back the
    /// request line it received.
    async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let read = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..read]);
            let _ = sender.send(request.lines().next().unwrap_or_default().to_string());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        (format!("http://{addr}/api"), receiver)
    }
}
