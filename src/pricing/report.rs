// src/pricing/report.rs
use serde::Serialize;

use super::aggregate::footer_value;
use super::calculations::PricingConfig;
use super::columns::{table_columns, Column, FooterRule};
use super::format::{format_value, Variant, NO_VALUE};
use super::quote::Quote;
use super::totals::{reconcile, PriceColumn, Totals};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub value: Option<f64>,
    pub display: String,
}

impl Cell {
    fn number(value: Option<f64>, variant: Variant) -> Self {
        Self { value, display: format_value(value, variant) }
    }

    fn text(display: impl Into<String>) -> Self {
        Self { value: None, display: display.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub id: Column,
    pub header: String,
    pub variant: Option<Variant>,
    pub editable: bool,
}

impl From<&Column> for ColumnHeader {
    fn from(column: &Column) -> Self {
        Self {
            id: column.clone(),
            header: column.header(),
            variant: column.variant(),
            editable: column.editable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub index: usize,
    /// One cell per entry of `QuoteReport::columns`.
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsRow {
    pub id: String,
    pub label: String,
    pub target: Cell,
    pub manual: Cell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteReport {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<ReportRow>,
    pub footer: Vec<Cell>,
    pub totals: Vec<TotalsRow>,
    pub summary: Totals,
}

impl QuoteReport {
    pub fn build(quote: &Quote, config: &PricingConfig) -> Self {
        let products = &quote.products;
        let columns = table_columns(products);

        let rows = products
            .iter()
            .enumerate()
            .map(|(index, product)| ReportRow {
                index,
                cells: columns
                    .iter()
                    .map(|column| match column.variant() {
                        None => Cell::text(product.name.clone()),
                        Some(variant) => Cell::number(column.value(product, config), variant),
                    })
                    .collect(),
            })
            .collect();

        let footer = columns
            .iter()
            .map(|column| match (column.footer_rule(), column.variant()) {
                (FooterRule::Label(label), _) => Cell::text(label),
                (_, Some(variant)) => {
                    Cell::number(footer_value(products, column, config), variant)
                }
                (_, None) => Cell::text(NO_VALUE),
            })
            .collect();

        let summary = reconcile(quote, config);
        let totals = totals_rows(&summary);

        Self {
            columns: columns.iter().map(ColumnHeader::from).collect(),
            rows,
            footer,
            totals,
            summary,
        }
    }
}

fn totals_rows(totals: &Totals) -> Vec<TotalsRow> {
    let price_row = |id: &str, label: &str, pick: fn(&PriceColumn) -> Option<f64>, variant| {
        TotalsRow {
            id: id.to_string(),
            label: label.to_string(),
            target: Cell::number(pick(&totals.target), variant),
            manual: Cell::number(pick(&totals.manual), variant),
        }
    };

    let mut rows = vec![price_row(
        "total_selling_price",
        "Total Selling Price",
        |c| c.total_selling_price,
        Variant::Currency,
    )];

    rows.extend(totals.shared.iter().map(|row| {
        let variant = row.column.variant().unwrap_or(Variant::Currency);
        TotalsRow {
            id: row.column.id(),
            label: row.column.header(),
            target: Cell::number(row.value, variant),
            manual: Cell::number(row.value, variant),
        }
    }));

    rows.push(price_row(
        "contribution",
        "Contribution",
        |c| c.contribution,
        Variant::Currency,
    ));
    // The target side shows the percent that drives it.
    rows.push(TotalsRow {
        id: "contribution_margin".into(),
        label: "Contribution %".into(),
        target: Cell::number(Some(totals.target_contribution_percent / 100.0), Variant::Percent),
        manual: Cell::number(totals.manual.contribution_margin, Variant::Percent),
    });
    rows.push(price_row(
        "contribution_per_hour",
        "Contribution / Hour",
        |c| c.contribution_per_hour,
        Variant::Currency,
    ));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::quote::{DynamicCost, Product};

    #[test]
    fn rows_align_with_columns() {
        let mut a = Product {
            name: "Cabinet".into(),
            quantity: 2.0,
            selling_price_per_unit: 50.0,
            estimated_hours: 0.0,
            ..Product::default()
        };
        a.dynamic_costs.insert("Shipping".into(), DynamicCost::flat(10.0));
        let quote = Quote { products: vec![a, Product::named("Empty")], ..Quote::default() };

        let report = QuoteReport::build(&quote, &PricingConfig::default());
        assert_eq!(report.rows.len(), 2);
        for row in &report.rows {
            assert_eq!(row.cells.len(), report.columns.len());
        }
        assert_eq!(report.footer.len(), report.columns.len());
        assert_eq!(report.rows[0].cells[0].display, "Cabinet");
        assert_eq!(report.footer[0].display, "Total");

        let per_hour = report
            .columns
            .iter()
            .position(|c| c.id == Column::ContributionPerHour)
            .unwrap();
        assert_eq!(report.rows[0].cells[per_hour].display, "");
        assert_eq!(report.rows[0].cells[per_hour].value, None);
    }

    #[test]
    fn totals_rows_follow_table_order() {
        let mut p = Product::named("Job");
        p.dynamic_costs.insert("Fuel".into(), DynamicCost::flat(5.0));
        let quote = Quote {
            products: vec![p],
            manual_contribution_percent: Some(100.0),
            manual_total_selling_price: None,
        };

        let report = QuoteReport::build(&quote, &PricingConfig::default());
        let labels: Vec<&str> = report.totals.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Total Selling Price",
                "Fuel",
                "Credit Card Fee",
                "Total Variable Costs",
                "Estimated Hours",
                "Contribution",
                "Contribution %",
                "Contribution / Hour",
            ]
        );
        assert_eq!(report.totals[0].target.display, "");
        assert_eq!(report.totals[0].manual.display, "$0.00");
        assert_eq!(report.totals[6].target.display, "100.00%");
    }
}
