/*
 * Responsibility
 * - Calculations の request/response DTO
 * - validate() で形式チェック (type / inputs の形)。評価時のエラーは service 側
 * - type / inputs は Value で受け、形の誤りも独自メッセージで 422 にする
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::repos::CalculationRow;
use crate::services::calc::{Calculation, CalculationType};

const NOT_A_LIST: &str = "Input should be a valid list";
const NOT_A_NUMBER: &str = "Inputs must contain only numbers";
const TOO_FEW_FOR_UPDATE: &str = "At least two numbers are required for calculation";

#[derive(Debug, Deserialize)]
pub struct CreateCalculationRequest {
    #[serde(rename = "type", default)]
    pub calc_type: Value,
    #[serde(default)]
    pub inputs: Value,
}

impl CreateCalculationRequest {
    /// Shape check, then build the domain value owned by `user_id`.
    pub fn validate(&self, user_id: Uuid) -> Result<Calculation, String> {
        let invalid_type = || format!("Type must be one of: {}", CalculationType::allowed_list());

        let tag = self.calc_type.as_str().ok_or_else(invalid_type)?;
        let inputs = numeric_list(&self.inputs)?;

        if inputs.is_empty() {
            return Err("Inputs must contain at least one number".to_string());
        }

        let calculation = Calculation::create(tag, user_id, inputs).map_err(|_| invalid_type())?;

        check_divisors(&calculation)?;
        Ok(calculation)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCalculationRequest {
    // None: inputs を変更しない (result は再計算)
    #[serde(default)]
    pub inputs: Option<Value>,
}

impl UpdateCalculationRequest {
    pub fn validate(&self) -> Result<Option<Vec<f64>>, String> {
        let Some(raw) = self.inputs.as_ref().filter(|v| !v.is_null()) else {
            return Ok(None);
        };
        let inputs = numeric_list(raw)?;
        if inputs.len() < 2 {
            return Err(TOO_FEW_FOR_UPDATE.to_string());
        }
        Ok(Some(inputs))
    }
}

/// create / update 共通: divisor には 0 を許さない (先頭は被除数)
pub fn check_divisors(calculation: &Calculation) -> Result<(), String> {
    if calculation.kind == CalculationType::Division
        && calculation.inputs.iter().skip(1).any(|&x| x == 0.0)
    {
        return Err("Cannot divide by zero".to_string());
    }
    Ok(())
}

fn numeric_list(value: &Value) -> Result<Vec<f64>, String> {
    let items = value.as_array().ok_or_else(|| NOT_A_LIST.to_string())?;
    items
        .iter()
        .map(|v| v.as_f64().ok_or_else(|| NOT_A_NUMBER.to_string()))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub calc_type: String,
    pub inputs: Vec<f64>,
    pub result: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CalculationRow> for CalculationResponse {
    fn from(row: CalculationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            calc_type: row.calc_type,
            inputs: row.inputs.0,
            result: row.result,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
