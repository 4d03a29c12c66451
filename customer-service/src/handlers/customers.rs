use crate::dtos::{CustomerPayload, CustomerRequest, CustomerResponse, DeleteOutcome};
use crate::error::CustomerError;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Use to request all customers
#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "A successful response", body = [CustomerResponse]),
        (status = 400, description = "Return an error", body = String, content_type = "text/plain")
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CustomerError> {
    let customers = state.customers.list().await?;
    let body: Vec<CustomerResponse> = customers.into_iter().map(CustomerResponse::from).collect();
    Ok(Json(body))
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "/new-customer",
    request_body(
        content = CustomerRequest,
        description = "Customer fields; JSON or URL-encoded",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "A successful response", body = CustomerResponse),
        (status = 400, description = "Return an error", body = String, content_type = "text/plain")
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    payload: CustomerPayload,
) -> Result<impl IntoResponse, CustomerError> {
    let customer = state.customers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// Used to delete a customer based on one id
///
/// When several customers share the id, only the first stored match is removed.
#[utoipa::path(
    delete,
    path = "/delte-customer/{id}",
    params(
        ("id" = String, Path, description = "id of customer")
    ),
    responses(
        (status = 202, description = "A successful delete", body = DeleteOutcome),
        (status = 400, description = "An error ocurred", body = String, content_type = "text/plain")
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CustomerError> {
    let outcome = state.customers.delete_by_id(&id).await?;
    Ok((StatusCode::ACCEPTED, Json(outcome)))
}

/// Use to modify an existing customer
///
/// Only the supplied fields change. The body is the customer after the
/// update, or `null` when no customer has the id.
#[utoipa::path(
    put,
    path = "/update-customer/{id}",
    params(
        ("id" = String, Path, description = "id of customer")
    ),
    request_body(
        content = CustomerRequest,
        description = "Fields to change; JSON or URL-encoded",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Successfully response; `null` when no customer matched", body = CustomerResponse),
        (status = 400, description = "An error ocurred", body = String, content_type = "text/plain")
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: CustomerPayload,
) -> Result<impl IntoResponse, CustomerError> {
    let updated = state.customers.update_by_id(&id, payload).await?;
    Ok(Json(updated.map(CustomerResponse::from)))
}
