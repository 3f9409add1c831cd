//! Wire-level tests of the HTTP clients against a local stub server

use std::sync::{Arc, Mutex};
use std::time::Duration;

use courier_zone_briefing::news::{FeedPage, HeadlineFeed, HeadlineQuery, NewsApiFeed};
use courier_zone_briefing::{
    Location, NewsProvider, NewsSource, OpenWeatherClient, WeatherError, WeatherSource,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one canned response per connection and records each request line
struct StubServer {
    base_url: String,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let request_lines = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&request_lines);
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                let head = String::from_utf8_lossy(&head);
                let line = head.lines().next().unwrap_or_default().to_string();
                recorded.lock().unwrap().push(line);

                let reason = match status {
                    200 => "OK",
                    401 => "Unauthorized",
                    404 => "Not Found",
                    _ => "Internal Server Error",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        Self {
            base_url,
            request_lines,
        }
    }

    fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}

const BARCELONA_WEATHER: &str = r#"{
    "coord": {"lon": 2.159, "lat": 41.3888},
    "weather": [{"description": "scattered clouds", "icon": "03d"}],
    "main": {"temp": 24.1, "humidity": 57},
    "wind": {"speed": 3.6}
}"#;

fn barcelona() -> Location {
    Location::new("Barcelona", "es").unwrap()
}

fn weather_client(server: &StubServer) -> OpenWeatherClient {
    OpenWeatherClient::new(&server.base_url, " k ", Duration::from_secs(5)).unwrap()
}

fn news_feed(server: &StubServer) -> NewsApiFeed {
    NewsApiFeed::new(&server.base_url, "k", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_weather_request_and_success() {
    let server = StubServer::start(vec![(200, BARCELONA_WEATHER)]).await;

    let report = weather_client(&server)
        .current_weather(&barcelona())
        .await
        .unwrap();

    assert_eq!(report.description, "Scattered clouds");
    assert_eq!(report.humidity_percent, 57);
    assert_eq!(
        server.request_lines(),
        vec!["GET /data/2.5/weather?q=Barcelona&appid=k&units=metric HTTP/1.1"]
    );
}

#[tokio::test]
async fn test_weather_status_errors() {
    let server = StubServer::start(vec![
        (404, r#"{"cod":"404","message":"city not found"}"#),
        (401, r#"{"cod":401,"message":"Invalid API key"}"#),
        (500, "{}"),
    ])
    .await;
    let client = weather_client(&server);

    assert_eq!(
        client.current_weather(&barcelona()).await,
        Err(WeatherError::NotFound {
            location: "Barcelona".to_string()
        })
    );
    assert_eq!(
        client.current_weather(&barcelona()).await,
        Err(WeatherError::Auth)
    );
    assert_eq!(
        client.current_weather(&barcelona()).await,
        Err(WeatherError::Api { status: 500 })
    );
}

#[tokio::test]
async fn test_weather_malformed_body_is_decode_error() {
    let server = StubServer::start(vec![(200, r#"{"weather":[]}"#)]).await;

    let result = weather_client(&server).current_weather(&barcelona()).await;
    assert!(
        matches!(result, Err(WeatherError::Decode { .. })),
        "got {result:?}"
    );
}

#[tokio::test]
async fn test_weather_unreachable_host_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = OpenWeatherClient::new(&base_url, "k", Duration::from_secs(5)).unwrap();
    let result = client.current_weather(&barcelona()).await;
    assert!(
        matches!(result, Err(WeatherError::Network { .. })),
        "got {result:?}"
    );
}

#[tokio::test]
async fn test_news_fallback_request_lines() {
    let server = StubServer::start(vec![
        (200, r#"{"articles": []}"#),
        (
            200,
            r#"{"articles": [{"title": "Port strike ends", "url": "https://news.example/port", "source": {"name": "El Periodico"}}]}"#,
        ),
    ])
    .await;
    let provider = NewsProvider::new(news_feed(&server));

    let items = provider.headlines(&barcelona()).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Port strike ends");
    assert_eq!(items[0].source, "El Periodico");
    assert_eq!(
        server.request_lines(),
        vec![
            "GET /api/top-headlines?country=es&q=Barcelona&apiKey=k HTTP/1.1",
            "GET /api/top-headlines?country=es&category=general&apiKey=k HTTP/1.1",
        ]
    );
}

#[tokio::test]
async fn test_news_error_status_gives_empty_page() {
    let server = StubServer::start(vec![(401, r#"{"status":"error"}"#)]).await;

    let page: FeedPage = news_feed(&server)
        .top_headlines(&HeadlineQuery::zone(&barcelona()))
        .await
        .unwrap();

    assert_eq!(page.status, 401);
    assert!(page.articles.is_empty());
}

#[tokio::test]
async fn test_news_malformed_body_is_hard_error() {
    let server = StubServer::start(vec![(200, "not json")]).await;
    let provider = NewsProvider::new(news_feed(&server));

    let err = provider.headlines(&barcelona()).await.unwrap_err();
    assert_eq!(err.as_item().source, "Error");
    assert_eq!(server.request_lines().len(), 1);
}
