use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::dog_cache::DogCaches;

/// The default channel name for ingestion notifications
pub const DEFAULT_INGESTION_CHANNEL: &str = "dog_ingestion";

/// The table whose changes invalidate the dog caches
pub const DOG_TABLE: &str = "dog";

/// Notification payload sent by the ingestion trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionNotification {
    /// The table name that was modified
    pub table: String,
    /// The action performed: "insert", "update", "delete" or "truncate"
    pub action: String,
    /// Optional primary key of the affected row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Clears the dog caches whenever the record store changes.
///
/// Breed listings never expire on their own, so this is how a re-ingested store
/// becomes visible without a restart.
pub struct CacheInvalidationListener {
    caches: Arc<DogCaches>,
    channel: String,
}

impl CacheInvalidationListener {
    /// Create a new listener with the default channel
    pub fn new(caches: Arc<DogCaches>) -> Self {
        Self::with_channel(caches, DEFAULT_INGESTION_CHANNEL.to_string())
    }

    /// Create a new listener with a custom channel name
    pub fn with_channel(caches: Arc<DogCaches>, channel: String) -> Self {
        Self { caches, channel }
    }

    /// Get the channel name this listener is using
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Process a single notification payload.
    ///
    /// Returns true when the caches were cleared.
    pub fn process_notification(&self, payload: &str) -> bool {
        let notification = match serde_json::from_str::<IngestionNotification>(payload) {
            Ok(notification) => notification,
            Err(e) => {
                error!("Failed to parse notification payload: {}", e);
                debug!("Payload was: {}", payload);
                return false;
            }
        };

        if notification.table != DOG_TABLE {
            debug!("Ignoring notification for table '{}'", notification.table);
            return false;
        }

        match notification.action.as_str() {
            "insert" | "update" | "delete" | "truncate" => {
                debug!(
                    "Invalidating caches after {} on '{}' (id={:?})",
                    notification.action, notification.table, notification.id
                );
                self.caches.clear_all();
                true
            }
            other => {
                warn!("Unknown action '{}' for table '{}'", other, notification.table);
                false
            }
        }
    }

    /// Listens on the configured channel and invalidates the caches on every
    /// dog notification. Reconnects after receive errors; meant for a background task.
    ///
    /// # Errors
    ///
    /// Returns an error if the first connection fails or re-listening after a
    /// reconnect fails.
    #[cfg(feature = "postgres-storage")]
    pub async fn listen(&self, pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
        let mut listener = sqlx::postgres::PgListener::connect_with(pool).await?;
        listener.listen(&self.channel).await?;
        debug!("Started listening on channel '{}'", self.channel);

        loop {
            match listener.recv().await {
                Ok(notification) => {
                    self.process_notification(notification.payload());
                }
                Err(e) => {
                    error!("Error receiving notification: {}", e);
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;

                    match sqlx::postgres::PgListener::connect_with(pool).await {
                        Ok(new_listener) => {
                            listener = new_listener;
                            if let Err(listen_err) = listener.listen(&self.channel).await {
                                error!(
                                    "Failed to re-listen on channel '{}': {}",
                                    self.channel, listen_err
                                );
                                return Err(listen_err);
                            }
                            // Anything ingested while disconnected was missed
                            self.caches.clear_all();
                            debug!("Reconnected and listening on channel '{}'", self.channel);
                        }
                        Err(connect_err) => {
                            error!("Failed to reconnect to database: {}", connect_err);
                        }
                    }
                }
            }
        }
    }
}
