use serde::{Deserialize, Serialize};

use crate::pricing::report::{ColumnHeader, QuoteReport};
use crate::pricing::{Quote, QuoteEdit};

#[derive(Debug, Deserialize)]
pub struct EditQuoteRequest {
    #[serde(default)]
    pub quote: Quote,
    pub edit: QuoteEdit,
}

#[derive(Debug, Serialize)]
pub struct EditQuoteResponse {
    pub quote: Quote,
    pub report: QuoteReport,
}

#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    #[serde(default)]
    pub quote: Quote,
    pub column: String,
}

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub column: String,
    pub value: Option<f64>,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub columns: Vec<ColumnHeader>,
    pub credit_card_fee_rate: f64,
}
