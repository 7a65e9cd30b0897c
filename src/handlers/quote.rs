use axum::{extract::State, Json};
use tracing::{debug, instrument};

use crate::dtos::quote::{
    AggregateRequest, AggregateResponse, ColumnsResponse, EditQuoteRequest, EditQuoteResponse,
};
use crate::error::AppError;
use crate::pricing::report::ColumnHeader;
use crate::pricing::{aggregate, format_value, table_columns, Column, Quote, QuoteReport, Variant};
use crate::state::AppState;

// POST /quotes/calculate - full table for a quote
#[instrument(skip_all)]
pub async fn calculate_quote(
    State(state): State<AppState>,
    Json(quote): Json<Quote>,
) -> Result<Json<QuoteReport>, AppError> {
    debug!(products = quote.products.len(), "Calculating quote");
    quote.validate()?;
    Ok(Json(QuoteReport::build(&quote, &state.config.pricing)))
}

// POST /quotes/edit - apply one edit, return the new quote and its table
#[instrument(skip_all)]
pub async fn edit_quote(
    State(state): State<AppState>,
    Json(req): Json<EditQuoteRequest>,
) -> Result<Json<EditQuoteResponse>, AppError> {
    debug!(edit = ?req.edit, "Applying quote edit");
    req.quote.validate()?;
    let quote = req.quote.apply(req.edit)?;
    let report = QuoteReport::build(&quote, &state.config.pricing);
    Ok(Json(EditQuoteResponse { quote, report }))
}

// POST /quotes/aggregate - one column rolled up
pub async fn aggregate_column(
    State(state): State<AppState>,
    Json(req): Json<AggregateRequest>,
) -> Result<Json<AggregateResponse>, AppError> {
    let column: Column = req.column.parse()?;
    req.quote.validate()?;
    let value = aggregate(&req.quote.products, &column, &state.config.pricing);
    let display = format_value(value, column.variant().unwrap_or(Variant::Number));
    Ok(Json(AggregateResponse { column: column.id(), value, display }))
}

// GET /quotes/columns - fixed columns of an empty quote
pub async fn list_columns(State(state): State<AppState>) -> Json<ColumnsResponse> {
    Json(ColumnsResponse {
        columns: table_columns(&[]).iter().map(ColumnHeader::from).collect(),
        credit_card_fee_rate: state.config.pricing.credit_card_fee_rate,
    })
}
