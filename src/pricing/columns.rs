// src/pricing/columns.rs
use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::Serialize;

use super::calculations::{self as calc, PricingConfig};
use super::format::Variant;
use super::quote::Product;
use crate::error::AppError;

pub const DYNAMIC_COST_PREFIX: &str = "dynamic-cost-";

/// Every column the pricing table can show. Dynamic cost columns are
/// discovered from the products of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Quantity,
    SellingPricePerUnit,
    TotalSellingPrice,
    DynamicCost(String),
    CreditCardFee,
    TotalVariableCosts,
    EstimatedHours,
    Contribution,
    ContributionMargin,
    ContributionPerHour,
}

/// How a column rolls up into the footer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterRule {
    Label(&'static str),
    Sum,
    /// Total contribution over total selling price.
    ContributionMargin,
    /// Total contribution over total estimated hours.
    ContributionPerHour,
    Empty,
}

impl Column {
    pub fn id(&self) -> String {
        match self {
            Column::Name => "name".into(),
            Column::Quantity => "quantity".into(),
            Column::SellingPricePerUnit => "selling_price_per_unit".into(),
            Column::TotalSellingPrice => "total_selling_price".into(),
            Column::DynamicCost(name) => format!("{DYNAMIC_COST_PREFIX}{name}"),
            Column::CreditCardFee => "creditCardFee".into(),
            Column::TotalVariableCosts => "totalVariableCosts".into(),
            Column::EstimatedHours => "estimated_hours".into(),
            Column::Contribution => "contributionDollars".into(),
            Column::ContributionMargin => "contributionMargin".into(),
            Column::ContributionPerHour => "contributionPerHour".into(),
        }
    }

    pub fn header(&self) -> String {
        match self {
            Column::Name => "Product Name".into(),
            Column::Quantity => "Quantity".into(),
            Column::SellingPricePerUnit => "Selling Price".into(),
            Column::TotalSellingPrice => "Total Selling Price".into(),
            Column::DynamicCost(name) => name.clone(),
            Column::CreditCardFee => "Credit Card Fee".into(),
            Column::TotalVariableCosts => "Total Variable Costs".into(),
            Column::EstimatedHours => "Estimated Hours".into(),
            Column::Contribution => "Contribution $".into(),
            Column::ContributionMargin => "Contribution %".into(),
            Column::ContributionPerHour => "Contribution / Hour".into(),
        }
    }

    /// `None` for the text-only name column.
    pub fn variant(&self) -> Option<Variant> {
        match self {
            Column::Name => None,
            Column::Quantity | Column::EstimatedHours => Some(Variant::Number),
            Column::ContributionMargin => Some(Variant::Percent),
            Column::SellingPricePerUnit
            | Column::TotalSellingPrice
            | Column::DynamicCost(_)
            | Column::CreditCardFee
            | Column::TotalVariableCosts
            | Column::Contribution
            | Column::ContributionPerHour => Some(Variant::Currency),
        }
    }

    pub fn editable(&self) -> bool {
        matches!(
            self,
            Column::Name
                | Column::Quantity
                | Column::SellingPricePerUnit
                | Column::TotalSellingPrice
                | Column::EstimatedHours
        )
    }

    pub fn footer_rule(&self) -> FooterRule {
        match self {
            Column::Name => FooterRule::Label("Total"),
            Column::SellingPricePerUnit => FooterRule::Empty,
            Column::ContributionMargin => FooterRule::ContributionMargin,
            Column::ContributionPerHour => FooterRule::ContributionPerHour,
            _ => FooterRule::Sum,
        }
    }

    /// The cell value of this column for one product.
    pub fn value(&self, product: &Product, config: &PricingConfig) -> Option<f64> {
        match self {
            Column::Name => None,
            Column::Quantity => Some(product.quantity),
            Column::SellingPricePerUnit => Some(product.selling_price_per_unit),
            Column::TotalSellingPrice => Some(calc::total_selling_price(product)),
            Column::DynamicCost(name) => Some(calc::dynamic_cost(product, name)),
            Column::CreditCardFee => Some(calc::credit_card_fee(product, config)),
            Column::TotalVariableCosts => Some(calc::total_variable_costs(product, config)),
            Column::EstimatedHours => Some(product.estimated_hours),
            Column::Contribution => Some(calc::contribution(product, config)),
            Column::ContributionMargin => calc::contribution_margin(product, config),
            Column::ContributionPerHour => calc::contribution_per_hour(product, config),
        }
        .filter(|v| v.is_finite())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for Column {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(DYNAMIC_COST_PREFIX) {
            if name.is_empty() {
                return Err(AppError::validation("Dynamic cost column needs a name"));
            }
            return Ok(Column::DynamicCost(name.to_string()));
        }
        let column = match s {
            "name" => Column::Name,
            "quantity" => Column::Quantity,
            "selling_price_per_unit" => Column::SellingPricePerUnit,
            "total_selling_price" => Column::TotalSellingPrice,
            "creditCardFee" => Column::CreditCardFee,
            "totalVariableCosts" => Column::TotalVariableCosts,
            "estimated_hours" => Column::EstimatedHours,
            "contributionDollars" => Column::Contribution,
            "contributionMargin" => Column::ContributionMargin,
            "contributionPerHour" => Column::ContributionPerHour,
            other => return Err(AppError::validation(format!("Unknown column '{other}'"))),
        };
        Ok(column)
    }
}

impl Serialize for Column {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id())
    }
}

/// Union of all dynamic cost names across products, first-seen order.
pub fn dynamic_cost_names(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .flat_map(|p| p.dynamic_costs.keys().cloned())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Table layout: fixed leading columns, discovered cost columns, then the
/// calculated ones.
pub fn table_columns(products: &[Product]) -> Vec<Column> {
    let mut columns = vec![
        Column::Name,
        Column::Quantity,
        Column::SellingPricePerUnit,
        Column::TotalSellingPrice,
    ];
    columns.extend(dynamic_cost_names(products).into_iter().map(Column::DynamicCost));
    columns.extend([
        Column::CreditCardFee,
        Column::TotalVariableCosts,
        Column::EstimatedHours,
        Column::Contribution,
        Column::ContributionMargin,
        Column::ContributionPerHour,
    ]);
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::quote::DynamicCost;

    fn with_costs(names: &[&str]) -> Product {
        let mut p = Product::named("p");
        for name in names {
            p.dynamic_costs.insert(name.to_string(), DynamicCost::flat(1.0));
        }
        p
    }

    #[test]
    fn cost_names_are_deduplicated_in_first_seen_order() {
        let products = vec![with_costs(&["A", "B"]), with_costs(&["B", "C"])];
        assert_eq!(dynamic_cost_names(&products), vec!["A", "B", "C"]);
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for column in table_columns(&[with_costs(&["Shipping"])]) {
            assert_eq!(column.id().parse::<Column>().unwrap(), column);
        }
        assert!("bogus".parse::<Column>().is_err());
        assert!("dynamic-cost-".parse::<Column>().is_err());
    }

    #[test]
    fn cost_columns_sit_between_total_price_and_card_fee() {
        let columns = table_columns(&[with_costs(&["X"])]);
        let ids: Vec<String> = columns.iter().map(Column::id).collect();
        let x = ids.iter().position(|id| id == "dynamic-cost-X").unwrap();
        assert_eq!(ids[x - 1], "total_selling_price");
        assert_eq!(ids[x + 1], "creditCardFee");
        assert_eq!(ids.len(), 11);
    }
}
