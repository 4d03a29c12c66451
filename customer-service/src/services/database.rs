use crate::models::{Customer, CUSTOMER_COLLECTION};
use mongodb::{bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

/// Shared MongoDB handle, created once at start-up and cloned into every
/// store that needs it.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Build the client. The driver connects lazily, so this only fails on
    /// an invalid URI; reachability is reported by [`MongoDb::spawn_connection_probe`].
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB URI {}: {}", uri, e);
            AppError::from(e)
        })?;
        options.app_name = Some("customer-service".to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client for {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    /// Ping the server in the background and log the outcome.
    ///
    /// A failure is logged only; requests keep being served and store-backed
    /// routes fail individually.
    pub fn spawn_connection_probe(&self) -> tokio::task::JoinHandle<()> {
        let db = self.clone();
        tokio::spawn(async move {
            match db.health_check().await {
                Ok(()) => tracing::info!(
                    database = %db.db.name(),
                    "Successfully connected to MongoDB database"
                ),
                Err(e) => tracing::error!(error = %e, "MongoDB is not reachable"),
            }
        })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn customers(&self) -> Collection<Customer> {
        self.db.collection(CUSTOMER_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
