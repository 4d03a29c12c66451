use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Collection the customer documents live in.
pub const CUSTOMER_COLLECTION: &str = "users";

/// A customer document as stored in MongoDB.
///
/// Every business field is optional: the store keeps whatever subset the
/// caller supplied. `id` is caller-owned and not unique.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "userName", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
}

impl Customer {
    pub fn from_fields(fields: CustomerFields) -> Self {
        Self {
            object_id: None,
            id: fields.id,
            user_name: fields.user_name,
            age: fields.age,
        }
    }

    /// Overwrite the fields present in `fields`, keeping the others.
    pub fn apply(&mut self, fields: &CustomerFields) {
        if let Some(id) = &fields.id {
            self.id = Some(id.clone());
        }
        if let Some(user_name) = &fields.user_name {
            self.user_name = Some(user_name.clone());
        }
        if let Some(age) = fields.age {
            self.age = Some(age);
        }
    }
}

/// Schema-cast customer fields, ready to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFields {
    pub id: Option<String>,
    pub user_name: Option<String>,
    pub age: Option<f64>,
}

impl CustomerFields {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.user_name.is_none() && self.age.is_none()
    }

    /// The `$set` body for a partial update.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(id) = &self.id {
            set.insert("id", id.clone());
        }
        if let Some(user_name) = &self.user_name {
            set.insert("userName", user_name.clone());
        }
        if let Some(age) = self.age {
            set.insert("age", age);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, to_document};

    #[test]
    fn absent_fields_are_not_stored() {
        let customer = Customer::from_fields(CustomerFields {
            id: Some("1".to_string()),
            ..Default::default()
        });

        let stored = to_document(&customer).unwrap();
        assert_eq!(stored, doc! { "id": "1" });
    }

    #[test]
    fn set_document_only_contains_supplied_fields() {
        let fields = CustomerFields {
            user_name: Some("alice2".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.to_set_document(), doc! { "userName": "alice2" });
    }

    #[test]
    fn apply_keeps_unsupplied_fields() {
        let mut customer = Customer {
            object_id: None,
            id: Some("1".to_string()),
            user_name: Some("alice".to_string()),
            age: Some(30.0),
        };
        customer.apply(&CustomerFields {
            user_name: Some("alice2".to_string()),
            ..Default::default()
        });

        assert_eq!(customer.id.as_deref(), Some("1"));
        assert_eq!(customer.user_name.as_deref(), Some("alice2"));
        assert_eq!(customer.age, Some(30.0));
    }
}
