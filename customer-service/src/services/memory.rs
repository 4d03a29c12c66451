use super::CustomerStore;
use crate::dtos::{CustomerPayload, DeleteOutcome};
use crate::error::CustomerError;
use crate::models::Customer;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

/// In-process customer store with the same semantics as the MongoDB one.
///
/// Records keep insertion order, which is what "first match" means here.
pub struct InMemoryCustomerStore {
    records: RwLock<Vec<Customer>>,
    available: bool,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            available: true,
        }
    }

    /// A store whose every call fails as if the database were unreachable.
    pub fn unavailable() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            available: false,
        }
    }

    fn ensure_available(&self) -> Result<(), CustomerError> {
        if self.available {
            Ok(())
        } else {
            Err(CustomerError::Unavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        self.ensure_available()?;
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, payload: CustomerPayload) -> Result<Customer, CustomerError> {
        self.ensure_available()?;
        let mut customer = Customer::from_fields(payload.cast()?);
        customer.object_id = Some(ObjectId::new());

        self.records.write().await.push(customer.clone());
        Ok(customer)
    }

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, CustomerError> {
        self.ensure_available()?;
        let mut records = self.records.write().await;

        let deleted_count = match records.iter().position(|c| c.id.as_deref() == Some(id)) {
            Some(index) => {
                records.remove(index);
                1
            }
            None => 0,
        };

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn update_by_id(
        &self,
        id: &str,
        payload: CustomerPayload,
    ) -> Result<Option<Customer>, CustomerError> {
        self.ensure_available()?;
        let fields = payload.cast()?;
        let mut records = self.records.write().await;

        Ok(records
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
            .map(|customer| {
                customer.apply(&fields);
                customer.clone()
            }))
    }

    async fn health_check(&self) -> Result<(), CustomerError> {
        self.ensure_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn payload(value: Value) -> CustomerPayload {
        match value {
            Value::Object(map) => CustomerPayload(map),
            _ => panic!("payload must be an object"),
        }
    }

    #[tokio::test]
    async fn create_assigns_object_id_and_keeps_order() {
        let store = InMemoryCustomerStore::new();
        store.create(payload(json!({ "id": "1" }))).await.unwrap();
        let second = store.create(payload(json!({ "id": "2" }))).await.unwrap();

        assert!(second.object_id.is_some());
        let ids: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_first_duplicate() {
        let store = InMemoryCustomerStore::new();
        store
            .create(payload(json!({ "id": "1", "userName": "first" })))
            .await
            .unwrap();
        store
            .create(payload(json!({ "id": "1", "userName": "second" })))
            .await
            .unwrap();

        let outcome = store.delete_by_id("1").await.unwrap();
        assert_eq!(outcome.deleted_count, 1);

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_name.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_reports_zero() {
        let store = InMemoryCustomerStore::new();
        let outcome = store.delete_by_id("missing").await.unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome {
                acknowledged: true,
                deleted_count: 0
            }
        );
    }

    #[tokio::test]
    async fn update_returns_record_after_update() {
        let store = InMemoryCustomerStore::new();
        store
            .create(payload(json!({ "id": "1", "userName": "alice", "age": 30 })))
            .await
            .unwrap();

        let updated = store
            .update_by_id("1", payload(json!({ "age": "31" })))
            .await
            .unwrap()
            .expect("record should match");

        assert_eq!(updated.user_name.as_deref(), Some("alice"));
        assert_eq!(updated.age, Some(31.0));
    }

    #[tokio::test]
    async fn update_of_unknown_id_returns_none() {
        let store = InMemoryCustomerStore::new();
        let updated = store
            .update_by_id("missing", payload(json!({ "userName": "x" })))
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn negative_age_is_not_stored() {
        let store = InMemoryCustomerStore::new();
        assert!(store
            .create(payload(json!({ "id": "1", "age": -5 })))
            .await
            .is_err());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryCustomerStore::unavailable();
        assert!(store.list().await.is_err());
        assert!(store.create(CustomerPayload::default()).await.is_err());
        assert!(store.delete_by_id("1").await.is_err());
        assert!(store
            .update_by_id("1", CustomerPayload::default())
            .await
            .is_err());
        assert!(store.health_check().await.is_err());
    }
}
