//! src/store/firestore.rs

use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::MessageStoreSettings;
use crate::store::{MessageRecord, MessageStore, StoreError};

/// Field stamped by the store with its own clock.
const SERVER_TIMESTAMP_FIELD: &str = "timestamp";

/// Writes message records through the Firestore REST API.
pub struct FirestoreStore {
    http_client: Client,
    settings: MessageStoreSettings,
}

impl FirestoreStore {
    pub fn new(settings: MessageStoreSettings) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            http_client,
            settings,
        })
    }

    fn database_path(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.settings.project_id
        )
    }

    fn commit_request(&self, record: &MessageRecord, document_id: &str) -> Value {
        json!({
            "writes": [{
                "update": {
                    "name": format!(
                        "{}/{}/{}",
                        self.database_path(),
                        self.settings.collection,
                        document_id,
                    ),
                    "fields": document_fields(record),
                },
                "updateTransforms": [{
                    "fieldPath": SERVER_TIMESTAMP_FIELD,
                    "setToServerValue": "REQUEST_TIME",
                }],
                "currentDocument": { "exists": false },
            }]
        })
    }
}

/// Firestore wants every value wrapped in a typed envelope.
fn document_fields(record: &MessageRecord) -> Value {
    json!({
        "name": { "stringValue": record.name },
        "email": { "stringValue": record.email },
        "subject": { "stringValue": record.subject },
        "message": { "stringValue": record.message },
        "status": { "stringValue": record.status.as_str() },
        "dateCreated": { "stringValue": record.date_created },
        "emailSent": { "booleanValue": record.email_sent },
    })
}

#[async_trait::async_trait]
impl MessageStore for FirestoreStore {
    #[tracing::instrument(name = "Saving contact message to the document store", skip(self, record))]
    async fn insert(&self, record: &MessageRecord) -> Result<String, StoreError> {
        // Same shape as the ids the Firestore SDKs pick for `add()`.
        let document_id = Uuid::new_v4().to_simple().to_string();
        let url = format!(
            "{}/v1/{}:commit",
            self.settings.base_url,
            self.database_path()
        );

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.settings.api_key.expose_secret())])
            .json(&self.commit_request(record, &document_id))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Document store could not be reached: {:?}", e);
                StoreError::Transport(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let error = StoreError::Rejected {
                status: status.as_u16(),
                detail,
            };
            tracing::error!("Document store rejected the write: {:?}", error);
            return Err(error);
        }

        tracing::info!(%document_id, "Contact message saved");
        Ok(document_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use claim::{assert_err, assert_ok};
    use secrecy::Secret;
    use wiremock::matchers::{any, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use crate::config::MessageStoreSettings;
    use crate::domain::{ContactEmail, ContactSubmission};
    use crate::store::{MessageRecord, MessageStore, StoreError};

    use super::FirestoreStore;

    struct CommitBodyMatcher;

    impl wiremock::Match for CommitBodyMatcher {
        fn matches(&self, request: &Request) -> bool {
            let result: Result<serde_json::Value, _> = serde_json::from_slice(&request.body);
            if let Ok(body) = result {
                let write = &body["writes"][0];
                let fields = &write["update"]["fields"];
                let name = write["update"]["name"].as_str().unwrap_or_default();
                return name.starts_with("projects/portfolio/databases/(default)/documents/messages/")
                    && fields["status"]["stringValue"] == "unread"
                    && fields["emailSent"]["booleanValue"] == true
                    && fields["email"]["stringValue"] == "ursula@example.com"
                    && write["updateTransforms"][0]["fieldPath"] == "timestamp"
                    && write["updateTransforms"][0]["setToServerValue"] == "REQUEST_TIME"
                    && write["currentDocument"]["exists"] == false;
            }
            false
        }
    }

    fn record() -> MessageRecord {
        let submission = ContactSubmission {
            name: "Ursula".into(),
            email: ContactEmail::parse("ursula@example.com".into()).unwrap(),
            subject: "Hello".into(),
            message: "A message".into(),
        };
        MessageRecord::delivered(&submission, Utc::now())
    }

    fn store(server_uri: String) -> FirestoreStore {
        FirestoreStore::new(MessageStoreSettings {
            base_url: server_uri,
            project_id: "portfolio".into(),
            api_key: Secret::new("api-key".into()),
            collection: "messages".into(),
            write_timeout_ms: 200,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn insert_commits_a_new_document_with_a_server_timestamp() {
        let mock_server = MockServer::start().await;
        let store = store(mock_server.uri());

        Mock::given(path(
            "/v1/projects/portfolio/databases/(default)/documents:commit",
        ))
        .and(method("POST"))
        .and(query_param("key", "api-key"))
        .and(CommitBodyMatcher)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "writeResults": [{ "updateTime": "2026-10-18T07:04:05.000000Z" }],
            "commitTime": "2026-10-18T07:04:05.000000Z",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

        let outcome = store.insert(&record()).await;

        assert_ok!(&outcome);
        assert_eq!(outcome.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn insert_fails_when_the_store_rejects_the_write() {
        let mock_server = MockServer::start().await;
        let store = store(mock_server.uri());

        Mock::given(any())
            .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = store.insert(&record()).await;

        assert!(matches!(
            outcome,
            Err(StoreError::Rejected { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn insert_times_out_if_the_store_takes_too_long() {
        let mock_server = MockServer::start().await;
        let store = store(mock_server.uri());

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(180)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = store.insert(&record()).await;

        assert_err!(&outcome);
        assert!(matches!(outcome, Err(StoreError::Transport(_))));
    }
}
