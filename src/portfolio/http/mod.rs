use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{
    http_err::{ApiError, ApiResponse, ErrorRep},
    server::AppState,
};

use super::services::{CreateAccountError, PortfolioService, RecordTransactionError};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/:account_id/transactions",
            get(list_account_transactions).post(create_transaction),
        )
        .route(
            "/transactions/:transaction_id",
            get(get_transaction).delete(delete_transaction),
        )
}

pub enum CreateAccountResponse {
    Created(reps::Account),
    BadRequest(reps::AccountValidationError),
}

impl IntoResponse for CreateAccountResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(account) => (StatusCode::CREATED, Json(account)).into_response(),
            Self::BadRequest(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
        }
    }
}

async fn create_account(
    State(portfolio_service): State<PortfolioService>,
    Json(new_account): Json<reps::NewAccountRequest>,
) -> ApiResponse<CreateAccountResponse> {
    match portfolio_service.create_account(new_account.into()).await {
        Ok(account) => Ok(CreateAccountResponse::Created((&account).into())),
        Err(CreateAccountError::InvalidAccount(context)) => {
            Ok(CreateAccountResponse::BadRequest(context.into()))
        }
        Err(error) => {
            error!(?error, "Failed to create account.");

            Err(ApiError::InternalServerError)
        }
    }
}

#[derive(Deserialize)]
struct ListAccountsParams {
    user_id: Uuid,
}

async fn list_accounts(
    State(portfolio_service): State<PortfolioService>,
    Query(params): Query<ListAccountsParams>,
) -> ApiResponse<Json<Vec<reps::Account>>> {
    match portfolio_service.list_accounts(params.user_id).await {
        Ok(accounts) => Ok(Json(accounts.iter().map(Into::into).collect())),
        Err(error) => {
            error!(?error, user_id = %params.user_id, "Failed to list accounts.");

            Err(ApiError::InternalServerError)
        }
    }
}

pub enum CreateTransactionResponse {
    Created(reps::Transaction),
    BadRequest(reps::TransactionValidationError),
    NotFound(ErrorRep),
}

impl IntoResponse for CreateTransactionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(transaction) => {
                (StatusCode::CREATED, Json(transaction)).into_response()
            }
            Self::BadRequest(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::NotFound(error) => (StatusCode::NOT_FOUND, Json(error)).into_response(),
        }
    }
}

async fn create_transaction(
    State(portfolio_service): State<PortfolioService>,
    Path(account_id): Path<Uuid>,
    Json(new_transaction): Json<reps::NewTransactionRequest>,
) -> ApiResponse<CreateTransactionResponse> {
    match portfolio_service
        .record_transaction(account_id, new_transaction.into())
        .await
    {
        Ok(transaction) => Ok(CreateTransactionResponse::Created((&transaction).into())),
        Err(RecordTransactionError::InvalidTransaction(context)) => {
            Ok(CreateTransactionResponse::BadRequest(context.into()))
        }
        Err(RecordTransactionError::UnknownAccount(_)) => {
            Ok(CreateTransactionResponse::NotFound(ErrorRep {
                message: "No account found with the provided ID.".to_owned(),
            }))
        }
        Err(error) => {
            error!(?error, %account_id, "Failed to record transaction.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn list_account_transactions(
    State(portfolio_service): State<PortfolioService>,
    Path(account_id): Path<Uuid>,
) -> ApiResponse<Json<Vec<reps::Transaction>>> {
    match portfolio_service.list_transactions(account_id).await {
        Ok(transactions) => Ok(Json(transactions.iter().map(Into::into).collect())),
        Err(error) => {
            error!(?error, %account_id, "Failed to list transactions.");

            Err(ApiError::InternalServerError)
        }
    }
}

pub enum GetTransactionResponse {
    Ok(reps::Transaction),
    NotFound(ErrorRep),
}

impl IntoResponse for GetTransactionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
            Self::NotFound(error) => (StatusCode::NOT_FOUND, Json(error)).into_response(),
        }
    }
}

async fn get_transaction(
    State(portfolio_service): State<PortfolioService>,
    Path(transaction_id): Path<Uuid>,
) -> ApiResponse<GetTransactionResponse> {
    match portfolio_service.get_transaction(transaction_id).await {
        Ok(Some(transaction)) => Ok(GetTransactionResponse::Ok((&transaction).into())),
        Ok(None) => Ok(GetTransactionResponse::NotFound(ErrorRep {
            message: "Transaction not found.".to_owned(),
        })),
        Err(error) => {
            error!(?error, %transaction_id, "Failed to query for transaction.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn delete_transaction(
    State(portfolio_service): State<PortfolioService>,
    Path(transaction_id): Path<Uuid>,
) -> ApiResponse<StatusCode> {
    match portfolio_service.delete_transaction(transaction_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => {
            error!(?error, %transaction_id, "Failed to delete transaction.");

            Err(ApiError::InternalServerError)
        }
    }
}
