use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{ClientOptions, FindOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::models::trip::TripRecord;
use crate::models::user::UserRecord;

const DEFAULT_DATABASE: &str = "TripPlanner";
const DEFAULT_TRIPS_COLLECTION: &str = "AITrips";
const DEFAULT_USERS_COLLECTION: &str = "Users";

/// Where trip and user documents live.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSource {
    pub database: String,
    pub trips_collection: String,
    pub users_collection: String,
}

impl Default for DataSource {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            trips_collection: DEFAULT_TRIPS_COLLECTION.to_string(),
            users_collection: DEFAULT_USERS_COLLECTION.to_string(),
        }
    }
}

impl DataSource {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: String| {
            std::env::var(key)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
        };

        Self {
            database: read("TRIPS_DATABASE", defaults.database),
            trips_collection: read("TRIPS_COLLECTION", defaults.trips_collection),
            users_collection: read("USERS_COLLECTION", defaults.users_collection),
        }
    }

    fn trips(&self, client: &Client) -> Collection<Document> {
        client
            .database(&self.database)
            .collection(&self.trips_collection)
    }

    fn users(&self, client: &Client) -> Collection<Document> {
        client
            .database(&self.database)
            .collection(&self.users_collection)
    }
}

pub async fn create_mongo_client(uri: &str) -> mongodb::error::Result<Arc<Client>> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // A failed ping is not fatal; requests report datastore errors themselves
    if let Err(e) = ping(&client).await {
        log::warn!("Connected to MongoDB but ping test failed: {}", e);
    } else {
        log::info!("Successfully connected to MongoDB and verified with ping command");
    }

    Ok(Arc::new(client))
}

pub async fn ping(client: &Client) -> mongodb::error::Result<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Documents are handed to the engine as relaxed extended JSON, so ObjectIds
/// read as `{"$oid": ..}` and dates as `{"$date": ..}`.
pub fn document_to_value(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

/// Matches a trip by ObjectId when `id` parses as one, by plain string id
/// otherwise.
pub fn trip_id_filter(id: &str) -> Document {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "_id": oid },
        Err(_) => doc! { "_id": id },
    }
}

pub async fn fetch_trips(
    client: &Client,
    source: &DataSource,
    filter: Document,
    limit: Option<i64>,
) -> mongodb::error::Result<Vec<TripRecord>> {
    let mut options = FindOptions::default();
    options.limit = limit;

    let documents: Vec<Document> = source
        .trips(client)
        .find(filter)
        .with_options(options)
        .await?
        .try_collect()
        .await?;

    log::debug!("Fetched {} trip documents", documents.len());
    Ok(documents
        .into_iter()
        .map(|document| TripRecord::new(document_to_value(document)))
        .collect())
}

pub async fn fetch_users(
    client: &Client,
    source: &DataSource,
) -> mongodb::error::Result<Vec<UserRecord>> {
    let documents: Vec<Document> = source.users(client).find(doc! {}).await?.try_collect().await?;

    log::debug!("Fetched {} user documents", documents.len());
    Ok(documents
        .into_iter()
        .map(|document| UserRecord::new(document_to_value(document)))
        .collect())
}

pub async fn find_trip(
    client: &Client,
    source: &DataSource,
    id: &str,
) -> mongodb::error::Result<Option<TripRecord>> {
    let document = source.trips(client).find_one(trip_id_filter(id)).await?;
    Ok(document.map(|document| TripRecord::new(document_to_value(document))))
}
