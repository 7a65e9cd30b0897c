//! Cost-and-pricing engine: quotes, per-product derivations, column
//! rollups, the target/manual totals table and value formatting.

pub mod aggregate;
pub mod calculations;
pub mod columns;
pub mod format;
pub mod quote;
pub mod report;
pub mod totals;

pub use aggregate::{aggregate, footer_value};
pub use calculations::PricingConfig;
pub use columns::{dynamic_cost_names, table_columns, Column};
pub use format::{format_value, Variant};
pub use quote::{DynamicCost, Product, ProductField, Quote, QuoteEdit};
pub use report::QuoteReport;
pub use totals::{reconcile, Totals};
