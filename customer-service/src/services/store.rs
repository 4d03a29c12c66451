use crate::dtos::{CustomerPayload, DeleteOutcome};
use crate::error::CustomerError;
use crate::models::Customer;
use crate::services::MongoDb;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

/// Data access for customer records.
///
/// Lookups by `id` are not unique: when several records share an `id`,
/// delete and update act on the first match in store-native order.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Every customer, unfiltered and unsorted.
    async fn list(&self) -> Result<Vec<Customer>, CustomerError>;

    /// Insert a new record without checking for an existing `id`.
    async fn create(&self, payload: CustomerPayload) -> Result<Customer, CustomerError>;

    /// Delete at most one record. Zero matches is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, CustomerError>;

    /// Apply the supplied fields to one record and return it as it is after
    /// the update, or `None` when no record matched.
    async fn update_by_id(
        &self,
        id: &str,
        payload: CustomerPayload,
    ) -> Result<Option<Customer>, CustomerError>;

    async fn health_check(&self) -> Result<(), CustomerError>;
}

#[derive(Clone)]
pub struct MongoCustomerStore {
    db: MongoDb,
}

impl MongoCustomerStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerStore for MongoCustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        let cursor = self.db.customers().find(None, None).await?;
        let customers: Vec<Customer> = cursor.try_collect().await?;
        tracing::debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    async fn create(&self, payload: CustomerPayload) -> Result<Customer, CustomerError> {
        let mut customer = Customer::from_fields(payload.cast()?);

        let result = self.db.customers().insert_one(&customer, None).await?;
        customer.object_id = result.inserted_id.as_object_id();

        tracing::info!(
            object_id = ?customer.object_id,
            customer_id = ?customer.id,
            "Customer created"
        );
        Ok(customer)
    }

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, CustomerError> {
        let result = self
            .db
            .customers()
            .delete_one(doc! { "id": id }, None)
            .await?;

        tracing::info!(
            customer_id = %id,
            deleted = result.deleted_count,
            "Customer delete processed"
        );
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn update_by_id(
        &self,
        id: &str,
        payload: CustomerPayload,
    ) -> Result<Option<Customer>, CustomerError> {
        let fields = payload.cast()?;
        let filter = doc! { "id": id };

        // An empty `$set` is rejected by the server; nothing to write anyway.
        if fields.is_empty() {
            return Ok(self.db.customers().find_one(filter, None).await?);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .db
            .customers()
            .find_one_and_update(filter, doc! { "$set": fields.to_set_document() }, options)
            .await?;

        tracing::info!(
            customer_id = %id,
            matched = updated.is_some(),
            "Customer update processed"
        );
        Ok(updated)
    }

    async fn health_check(&self) -> Result<(), CustomerError> {
        self.db
            .health_check()
            .await
            .map_err(|e| CustomerError::Unavailable(e.to_string()))
    }
}
