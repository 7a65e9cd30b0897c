// src/pricing/aggregate.rs
use super::calculations::{ratio, PricingConfig};
use super::columns::{Column, FooterRule};
use super::quote::Product;

/// Sum of a column over all products.
///
/// An empty product list gives `None`, which is distinct from a list whose
/// values sum to zero. Rows without a value are skipped.
pub fn aggregate(products: &[Product], column: &Column, config: &PricingConfig) -> Option<f64> {
    if products.is_empty() || column.variant().is_none() {
        return None;
    }
    let total: f64 = products.iter().filter_map(|p| column.value(p, config)).sum();
    total.is_finite().then_some(total)
}

/// Footer value of a numeric column. Label and empty footers have no value.
pub fn footer_value(products: &[Product], column: &Column, config: &PricingConfig) -> Option<f64> {
    match column.footer_rule() {
        FooterRule::Sum => aggregate(products, column, config),
        FooterRule::ContributionMargin => {
            let contribution = aggregate(products, &Column::Contribution, config)?;
            let price = aggregate(products, &Column::TotalSellingPrice, config)?;
            ratio(contribution, price)
        }
        FooterRule::ContributionPerHour => {
            let contribution = aggregate(products, &Column::Contribution, config)?;
            let hours = aggregate(products, &Column::EstimatedHours, config)?;
            ratio(contribution, hours)
        }
        FooterRule::Label(_) | FooterRule::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::quote::DynamicCost;

    fn product(qty: f64, price: f64, hours: f64) -> Product {
        Product {
            name: "p".into(),
            quantity: qty,
            selling_price_per_unit: price,
            estimated_hours: hours,
            ..Product::default()
        }
    }

    #[test]
    fn empty_list_has_no_value_but_zero_sum_does() {
        let cfg = PricingConfig::default();
        assert_eq!(aggregate(&[], &Column::Quantity, &cfg), None);
        assert_eq!(aggregate(&[product(0.0, 10.0, 0.0)], &Column::Quantity, &cfg), Some(0.0));
    }

    #[test]
    fn missing_dynamic_cost_counts_as_zero() {
        let cfg = PricingConfig::default();
        let mut with_cost = product(1.0, 10.0, 1.0);
        with_cost.dynamic_costs.insert("Shipping".into(), DynamicCost::flat(7.0));
        let products = vec![with_cost, product(1.0, 10.0, 1.0)];

        let column = Column::DynamicCost("Shipping".into());
        assert_eq!(aggregate(&products, &column, &cfg), Some(7.0));
    }

    #[test]
    fn margin_footer_is_ratio_of_totals() {
        let cfg = PricingConfig { credit_card_fee_rate: 0.0 };
        let mut a = product(1.0, 100.0, 2.0);
        a.dynamic_costs.insert("Materials".into(), DynamicCost::flat(50.0));
        let b = product(1.0, 300.0, 2.0);
        let products = vec![a, b];

        // (50 + 300) / 400
        assert_eq!(footer_value(&products, &Column::ContributionMargin, &cfg), Some(0.875));
        // 350 / 4
        assert_eq!(footer_value(&products, &Column::ContributionPerHour, &cfg), Some(87.5));
    }

    #[test]
    fn footers_guard_zero_denominators() {
        let cfg = PricingConfig::default();
        let products = vec![product(0.0, 0.0, 0.0)];
        assert_eq!(footer_value(&products, &Column::ContributionMargin, &cfg), None);
        assert_eq!(footer_value(&products, &Column::ContributionPerHour, &cfg), None);
        assert_eq!(footer_value(&products, &Column::Name, &cfg), None);
    }
}
