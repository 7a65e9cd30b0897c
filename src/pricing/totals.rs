// src/pricing/totals.rs
//
// The totals table shows two prices side by side: one back-computed from a
// target contribution percent and one typed in by the user. Both share the
// aggregate variable costs and hours of the quote.
use serde::Serialize;

use super::aggregate::{aggregate, footer_value};
use super::calculations::{ratio, PricingConfig};
use super::columns::{dynamic_cost_names, Column};
use super::quote::Quote;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceColumn {
    pub total_selling_price: Option<f64>,
    pub contribution: Option<f64>,
    pub contribution_margin: Option<f64>,
    pub contribution_per_hour: Option<f64>,
}

impl PriceColumn {
    fn derive(total_selling_price: Option<f64>, total_variable_costs: f64, hours: f64) -> Self {
        let contribution = total_selling_price.map(|tsp| tsp - total_variable_costs);
        Self {
            total_selling_price,
            contribution,
            contribution_margin: contribution
                .zip(total_selling_price)
                .and_then(|(c, tsp)| ratio(c, tsp)),
            contribution_per_hour: contribution.and_then(|c| ratio(c, hours)),
        }
    }
}

/// A row whose value is the same under both price columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedRow {
    pub column: Column,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    /// Percent (0-100) driving the target column.
    pub target_contribution_percent: f64,
    pub target: PriceColumn,
    pub manual: PriceColumn,
    /// Dynamic costs, credit card fee, total variable costs, estimated hours.
    pub shared: Vec<SharedRow>,
}

/// Price that leaves `percent` of itself as contribution after the given
/// variable costs. `None` at 100%.
pub fn target_total_selling_price(total_variable_costs: f64, percent: f64) -> Option<f64> {
    ratio(total_variable_costs, (100.0 - percent) / 100.0)
}

pub fn reconcile(quote: &Quote, config: &PricingConfig) -> Totals {
    let products = &quote.products;
    let total_variable_costs =
        aggregate(products, &Column::TotalVariableCosts, config).unwrap_or(0.0);
    let hours = aggregate(products, &Column::EstimatedHours, config).unwrap_or(0.0);

    let percent = quote.manual_contribution_percent.unwrap_or(0.0);
    let target_price = target_total_selling_price(total_variable_costs, percent);
    let manual_price = quote.manual_total_selling_price.unwrap_or(0.0);

    let shared = dynamic_cost_names(products)
        .into_iter()
        .map(Column::DynamicCost)
        .chain([Column::CreditCardFee, Column::TotalVariableCosts, Column::EstimatedHours])
        .map(|column| SharedRow {
            value: footer_value(products, &column, config),
            column,
        })
        .collect();

    Totals {
        target_contribution_percent: percent,
        target: PriceColumn::derive(target_price, total_variable_costs, hours),
        manual: PriceColumn::derive(Some(manual_price), total_variable_costs, hours),
        shared,
    }
}
