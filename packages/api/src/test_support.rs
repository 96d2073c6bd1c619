//! Mock backend helpers for client tests.

use std::time::Duration;

use flood_viz_api_models::ApiConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::default_config;

/// How long a stalled route waits before answering.
const STALL: Duration = Duration::from_secs(5);

/// Starts a mock backend answering GET `(path, status, body)` routes.
/// Unknown paths get an empty 404.
pub async fn serve(routes: Vec<(&str, u16, &str)>) -> MockServer {
    let server = MockServer::start().await;
    for (route, status, body) in routes {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status)
                    .insert_header("Content-Type", "application/json")
                    .set_body_string(body),
            )
            .mount(&server)
            .await;
    }
    server
}

/// Mounts a route that only answers after [`STALL`], long enough for
/// [`impatient_client`] to give up on it.
pub async fn stall(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_delay(STALL))
        .mount(server)
        .await;
}

/// An HTTP client whose requests time out well before [`STALL`].
pub fn impatient_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap()
}

/// Request targets (path plus query) received so far, in order.
pub async fn hits(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| match request.url.query() {
            Some(query) => format!("{}?{query}", request.url.path()),
            None => request.url.path().to_owned(),
        })
        .collect()
}

/// The default endpoint table pointed at `server`.
pub fn config_for(server: &MockServer) -> ApiConfig {
    let mut config = default_config().unwrap();
    config.origin = server.uri();
    config
}
