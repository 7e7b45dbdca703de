/*
 * Responsibility
 * - /calculations 系 CRUD handler (BREAD)
 * - Path/Json を extractor で受け、DTO validation → 評価 → repo
 * - owner は常に認証済みユーザー。他人の calculation は 404
 */
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::calculations::{
            CalculationResponse, CreateCalculationRequest, UpdateCalculationRequest,
            check_divisors,
        },
        extractors::ActiveUser,
    },
    error::AppError,
    repos::NewCalculation,
    services::calc::{Calculation, CalculationType},
    state::AppState,
};

const RESOURCE: &str = "Calculation";

pub async fn list_calculations(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
) -> Result<Json<Vec<CalculationResponse>>, AppError> {
    let rows = state.calculations.list_by_user(user.id).await?;
    Ok(Json(rows.into_iter().map(CalculationResponse::from).collect()))
}

pub async fn create_calculation(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    payload: Result<Json<CreateCalculationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CalculationResponse>), AppError> {
    let Json(req) = payload?;
    let calculation = req.validate(user.id).map_err(AppError::validation)?;
    let result = calculation.get_result()?;

    let row = state
        .calculations
        .create(NewCalculation {
            user_id: calculation.user_id,
            kind: calculation.kind,
            inputs: calculation.inputs,
            result,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_calculation(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CalculationResponse>, AppError> {
    let Path(id) = id?;
    let row = state
        .calculations
        .get(user.id, id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok(Json(row.into()))
}

pub async fn update_calculation(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>, AppError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let new_inputs = req.validate().map_err(AppError::validation)?;

    let current = state
        .calculations
        .get(user.id, id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    let kind: CalculationType = current.calc_type.parse().map_err(|e| {
        tracing::error!(error = %e, calculation_id = %id, "stored calculation has unknown type");
        AppError::Internal
    })?;
    let inputs = new_inputs.unwrap_or(current.inputs.0);
    let calculation = Calculation::new(kind, user.id, inputs);
    check_divisors(&calculation).map_err(AppError::validation)?;
    let result = calculation.get_result()?;

    let row = state
        .calculations
        .update_inputs(user.id, id, &calculation.inputs, result)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok(Json(row.into()))
}

pub async fn delete_calculation(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;

    if state.calculations.delete(user.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(RESOURCE))
    }
}
