use once_cell::sync::Lazy;
use wiremock::MockServer;

use portfolio_contact::config::get_configuration;
use portfolio_contact::startup::AppServer;
use portfolio_contact::telemetry::{get_subscriber, init_subscriber};

// Both the relay and the store are replaced by mock servers, so requests
// never leave the machine.
pub const COMMIT_PATH: &str = "/v1/projects/portfolio/databases/(default)/documents:commit";
pub const SEND_PATH: &str = "/api/v1.0/email/send";

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink,
        ));
    }
});

pub struct TestApp {
    pub addr: String,
    pub port: u16,
    pub email_server: MockServer,
    pub store_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/contact", &self.addr))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_page<Body>(&self, body: &Body) -> (u16, serde_json::Value)
    where
        Body: serde::Serialize,
    {
        let response = self.post_contact(body).await;
        let status = response.status().as_u16();
        let page = response
            .json()
            .await
            .expect("Failed to parse the contact page state.");
        (status, page)
    }
}

pub fn contact_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Ursula Le Guin",
        "email": "ursula_le_guin@gmail.com",
        "subject": "Commission",
        "message": "Would you build me a website?",
    })
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let store_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("should load configuration");
        c.email_relay.base_url = email_server.uri();
        c.message_store.base_url = store_server.uri();
        c.app.port = 0;
        c
    };

    let server = AppServer::build(configuration)
        .await
        .expect("should have created server");
    let port = server.port();
    let addr = format!("http://{}", server.to_server_address());
    let _ = tokio::spawn(server.run_until_stopped());

    TestApp {
        addr,
        port,
        email_server,
        store_server,
        api_client: reqwest::Client::new(),
    }
}
