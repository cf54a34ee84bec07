mod firestore;
mod message_store;

pub use firestore::FirestoreStore;
pub use message_store::{MessageRecord, MessageStatus, MessageStore, StoreError};
