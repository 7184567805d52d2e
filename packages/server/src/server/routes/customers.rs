use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::ListShape;
use crate::domains::customers::{
    AddCustomerRequest, AddCustomerResponse, CheckPhoneRequest, PhoneExistsResponse,
};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::extract::{JsonBody, JsonOrForm};

/// `GET /`: every row, or just the row count, depending on the deployment.
pub async fn list_customers_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Response, ApiError> {
    let customers = &state.deps.customers;

    let response = match state.variant.list_shape() {
        ListShape::Rows => Json(customers.list_all().await?).into_response(),
        ListShape::Count => Json(customers.count().await?).into_response(),
    };

    Ok(response)
}

/// `POST /add-customer`
pub async fn add_customer_handler(
    Extension(state): Extension<AxumAppState>,
    JsonOrForm(request): JsonOrForm<AddCustomerRequest>,
) -> Result<(StatusCode, Json<AddCustomerResponse>), ApiError> {
    let input = request.validate()?;
    let customer = state.deps.customers.insert(input).await?;

    tracing::info!(
        customer_id = customer.id,
        table = %state.variant.table(),
        "Customer added"
    );

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// `POST /check-phone`
pub async fn check_phone_handler(
    Extension(state): Extension<AxumAppState>,
    JsonBody(request): JsonBody<CheckPhoneRequest>,
) -> Result<Json<PhoneExistsResponse>, ApiError> {
    let phone = request.phone();
    let exists = state.deps.customers.phone_exists(phone.as_deref()).await?;

    Ok(Json(PhoneExistsResponse { exists }))
}
