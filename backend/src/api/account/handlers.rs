//! Handler functions for the admin-only account endpoints.

use crate::api::common::{
    ApiResponse, PaginatedData, PaginationFilter, PaginationMeta, service_error_to_http,
    validation_error_response,
};
use crate::auth::models::AccountInfo;
use crate::errors::ServiceError;
use crate::repositories::account_repository::AccountRepository;
use crate::state::AppState;
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use validator::Validate;

/// List all accounts, paginated. Admin only.
#[axum::debug_handler]
pub async fn list_accounts(
    Extension(state): Extension<AppState>,
    Query(filter): Query<PaginationFilter>,
) -> Result<ResponseJson<ApiResponse<PaginatedData<AccountInfo>>>, (StatusCode, String)> {
    if let Err(errors) = filter.validate() {
        return Err(validation_error_response(errors));
    }

    let repo = AccountRepository::new(&state.pool);

    let total = repo
        .count_accounts()
        .await
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?;

    let accounts = repo
        .list_accounts(filter.limit(), filter.offset())
        .await
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?;

    let items: Vec<AccountInfo> = accounts.iter().map(AccountInfo::from).collect();
    let pagination = PaginationMeta::from_filter(&filter, total);

    Ok(ResponseJson(ApiResponse::paginated(
        PaginatedData::new(items, total),
        pagination,
        "Accounts retrieved successfully",
    )))
}
