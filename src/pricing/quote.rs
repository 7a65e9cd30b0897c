// src/pricing/quote.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A user-defined expense on one product. Either part may be absent; both
/// absent is a zero cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicCost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Percent (0-100) of the product's total selling price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl DynamicCost {
    pub fn flat(amount: f64) -> Self {
        Self { amount: Some(amount), percentage: None }
    }

    pub fn percent(percentage: f64) -> Self {
        Self { amount: None, percentage: Some(percentage) }
    }

    /// Amount this cost adds for a product selling at `total_selling_price`.
    pub fn applied_to(&self, total_selling_price: f64) -> f64 {
        let flat = self.amount.unwrap_or(0.0);
        let share = self
            .percentage
            .map(|pct| total_selling_price * pct / 100.0)
            .unwrap_or(0.0);
        flat + share
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub selling_price_per_unit: f64,
    /// Overrides `quantity * selling_price_per_unit` when set.
    #[serde(default)]
    pub total_selling_price: Option<f64>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub dynamic_costs: IndexMap<String, DynamicCost>,
}

impl Product {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub manual_contribution_percent: Option<f64>,
    #[serde(default)]
    pub manual_total_selling_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Quantity,
    SellingPricePerUnit,
    TotalSellingPrice,
    EstimatedHours,
}

/// One user edit. Applying it yields a new `Quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuoteEdit {
    AddProduct { name: String },
    RemoveProduct { index: usize },
    RenameProduct { index: usize, name: String },
    SetProductField {
        index: usize,
        field: ProductField,
        #[serde(default)]
        value: Option<f64>,
    },
    AddDynamicCost { index: usize, name: String, cost: DynamicCost },
    RemoveDynamicCost { index: usize, name: String },
    SetManualContributionPercent { value: f64 },
    SetManualTotalSellingPrice { value: f64 },
}

impl Quote {
    pub fn apply(&self, edit: QuoteEdit) -> Result<Quote, AppError> {
        let mut next = self.clone();

        match edit {
            QuoteEdit::AddProduct { name } => {
                next.products.push(Product::named(required_name(name, "Product name")?));
            }
            QuoteEdit::RemoveProduct { index } => {
                next.product_mut(index)?;
                next.products.remove(index);
            }
            QuoteEdit::RenameProduct { index, name } => {
                next.product_mut(index)?.name = required_name(name, "Product name")?;
            }
            QuoteEdit::SetProductField { index, field, value } => {
                let product = next.product_mut(index)?;
                match (field, value) {
                    (ProductField::TotalSellingPrice, value) => {
                        product.total_selling_price = value.map(finite).transpose()?;
                    }
                    (_, None) => {
                        return Err(AppError::validation("A value is required for this field"));
                    }
                    (ProductField::Quantity, Some(v)) => {
                        product.quantity = non_negative(v, "Quantity")?;
                    }
                    (ProductField::SellingPricePerUnit, Some(v)) => {
                        product.selling_price_per_unit = finite(v)?;
                    }
                    (ProductField::EstimatedHours, Some(v)) => {
                        product.estimated_hours = non_negative(v, "Estimated hours")?;
                    }
                }
            }
            QuoteEdit::AddDynamicCost { index, name, cost } => {
                let name = required_name(name, "Cost name")?;
                validate_cost(&cost)?;
                let product = next.product_mut(index)?;
                if product.dynamic_costs.contains_key(&name) {
                    return Err(AppError::validation(format!(
                        "Cost '{name}' already exists on this product"
                    )));
                }
                product.dynamic_costs.insert(name, cost);
            }
            QuoteEdit::RemoveDynamicCost { index, name } => {
                let product = next.product_mut(index)?;
                if product.dynamic_costs.shift_remove(&name).is_none() {
                    return Err(AppError::not_found(format!("Cost '{name}' not found")));
                }
            }
            QuoteEdit::SetManualContributionPercent { value } => {
                next.manual_contribution_percent = Some(contribution_percent(value)?);
            }
            QuoteEdit::SetManualTotalSellingPrice { value } => {
                next.manual_total_selling_price = Some(finite(value)?);
            }
        }

        Ok(next)
    }

    /// Checks a client-supplied quote against the data-model ranges.
    pub fn validate(&self) -> Result<(), AppError> {
        for product in &self.products {
            non_negative(product.quantity, "Quantity")?;
            non_negative(product.estimated_hours, "Estimated hours")?;
            finite(product.selling_price_per_unit)?;
            if let Some(total) = product.total_selling_price {
                finite(total)?;
            }
            for cost in product.dynamic_costs.values() {
                validate_cost(cost)?;
            }
        }
        if let Some(pct) = self.manual_contribution_percent {
            contribution_percent(pct)?;
        }
        if let Some(total) = self.manual_total_selling_price {
            finite(total)?;
        }
        Ok(())
    }

    fn product_mut(&mut self, index: usize) -> Result<&mut Product, AppError> {
        self.products
            .get_mut(index)
            .ok_or_else(|| AppError::not_found(format!("Product {index} not found")))
    }
}

fn required_name(name: String, what: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{what} required")));
    }
    Ok(trimmed.to_string())
}

fn finite(value: f64) -> Result<f64, AppError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::validation("Value must be a finite number"))
    }
}

fn non_negative(value: f64, what: &str) -> Result<f64, AppError> {
    let value = finite(value)?;
    if value < 0.0 {
        return Err(AppError::validation(format!("{what} cannot be negative")));
    }
    Ok(value)
}

fn contribution_percent(value: f64) -> Result<f64, AppError> {
    let value = finite(value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::validation("Contribution percent must be between 0 and 100"));
    }
    Ok(value)
}

fn validate_cost(cost: &DynamicCost) -> Result<(), AppError> {
    if let Some(amount) = cost.amount {
        finite(amount)?;
    }
    if let Some(pct) = cost.percentage {
        if !(0.0..=100.0).contains(&finite(pct)?) {
            return Err(AppError::validation("Cost percentage must be between 0 and 100"));
        }
    }
    Ok(())
}
