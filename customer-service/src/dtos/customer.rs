use crate::error::CustomerError;
use crate::models::{Customer, CustomerFields};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

/// Raw request body: whatever keys the caller sent, before schema casting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPayload(pub Map<String, Value>);

impl CustomerPayload {
    /// Cast the payload through the customer schema.
    ///
    /// Unknown keys are dropped, scalar values are coerced to the field type
    /// and `null` counts as absent. The cast result is then validated.
    pub fn cast(&self) -> Result<CustomerFields, CustomerError> {
        let request = CustomerRequest {
            id: self.string_field("id")?,
            user_name: self.string_field("userName")?,
            age: self.number_field("age")?,
        };
        request.validate()?;
        Ok(request.into())
    }

    fn string_field(&self, field: &'static str) -> Result<Option<String>, CustomerError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(CustomerError::Cast {
                field,
                expected: "String",
            }),
        }
    }

    fn number_field(&self, field: &'static str) -> Result<Option<f64>, CustomerError> {
        let cast_error = || CustomerError::Cast {
            field,
            expected: "Number",
        };

        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(cast_error),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Some)
                    .ok_or_else(cast_error)
            }
            Some(Value::Bool(b)) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(cast_error()),
        }
    }
}

/// Customer fields accepted by the create and update routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomerRequest {
    /// Caller-supplied identifier, not required to be unique
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "1")]
    pub id: Option<String>,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    #[schema(example = "alice")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    #[schema(example = 30)]
    pub age: Option<f64>,
}

impl From<CustomerRequest> for CustomerFields {
    fn from(req: CustomerRequest) -> Self {
        Self {
            id: req.id,
            user_name: req.user_name,
            age: req.age,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerResponse {
    /// Store-assigned document identity
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(example = "6523f0c2a1b2c3d4e5f60718")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "1")]
    pub id: Option<String>,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    #[schema(example = "alice")]
    pub user_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_age"
    )]
    #[schema(example = 30)]
    pub age: Option<f64>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            object_id: customer.object_id.map(|oid| oid.to_hex()),
            id: customer.id,
            user_name: customer.user_name,
            age: customer.age,
        }
    }
}

// Whole numbers go out as JSON integers (`30`, not `30.0`).
fn serialize_age<S: Serializer>(age: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    match age {
        Some(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
            serializer.serialize_i64(*v as i64)
        }
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

/// Result of a delete-by-id call. `deletedCount` is 0 when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    #[schema(example = 1)]
    pub deleted_count: u64,
}
