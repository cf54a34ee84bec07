use std::net::TcpListener;

use actix_web::dev::Server;
use anyhow::Context;

use crate::config::Configuration;
use crate::coordinator::{SubmissionCoordinator, SubmissionSettings};
use crate::mail::EmailJsClient;
use crate::run::run;
use crate::store::FirestoreStore;

pub struct AppServer {
    port: u16,
    address: String,
    server: Server,
}

impl AppServer {
    pub async fn build(configuration: Configuration) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.app.host, configuration.app.port
        ))
        .context("Failed to bind the application listener")?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            "Starting service on address: {}:{}",
            configuration.app.host,
            port
        );

        let relay = EmailJsClient::new(configuration.email_relay.clone())
            .context("Failed to build the email relay client")?;
        let store = FirestoreStore::new(configuration.message_store.clone())
            .context("Failed to build the document store client")?;
        let coordinator = SubmissionCoordinator::new(
            relay,
            store,
            SubmissionSettings::from(&configuration.email_relay),
        );

        let server = run(listener, coordinator, configuration.notification.timing())?;

        Ok(Self {
            port,
            address: configuration.app.host,
            server,
        })
    }

    pub fn to_server_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn address(&self) -> String {
        self.address.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
