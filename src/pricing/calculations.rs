// src/pricing/calculations.rs
//
// Per-product derived figures. Every function here is pure; a division with
// a zero denominator yields `None` rather than NaN or infinity.
use serde::{Deserialize, Serialize};

use super::quote::Product;

pub const DEFAULT_CREDIT_CARD_FEE_RATE: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fraction of total selling price charged as card fee (0.03 = 3%).
    pub credit_card_fee_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self { credit_card_fee_rate: DEFAULT_CREDIT_CARD_FEE_RATE }
    }
}

/// `numerator / denominator`, or `None` when the denominator is zero or the
/// result is not finite.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

pub fn total_selling_price(product: &Product) -> f64 {
    product
        .total_selling_price
        .unwrap_or(product.quantity * product.selling_price_per_unit)
}

pub fn credit_card_fee(product: &Product, config: &PricingConfig) -> f64 {
    total_selling_price(product) * config.credit_card_fee_rate
}

/// Applicable amount of the named cost; zero when the product lacks it.
pub fn dynamic_cost(product: &Product, name: &str) -> f64 {
    product
        .dynamic_costs
        .get(name)
        .map(|cost| cost.applied_to(total_selling_price(product)))
        .unwrap_or(0.0)
}

pub fn total_variable_costs(product: &Product, config: &PricingConfig) -> f64 {
    let tsp = total_selling_price(product);
    let dynamic: f64 = product.dynamic_costs.values().map(|c| c.applied_to(tsp)).sum();
    credit_card_fee(product, config) + dynamic
}

pub fn contribution(product: &Product, config: &PricingConfig) -> f64 {
    total_selling_price(product) - total_variable_costs(product, config)
}

pub fn contribution_margin(product: &Product, config: &PricingConfig) -> Option<f64> {
    ratio(contribution(product, config), total_selling_price(product))
}

pub fn contribution_per_hour(product: &Product, config: &PricingConfig) -> Option<f64> {
    ratio(contribution(product, config), product.estimated_hours)
}
