//! Plain-text dashboard report.
//!
//! One section per aggregate, mirroring the chart layout of the web
//! dashboard this replaces: KPIs on top, then branch/city/product revenue,
//! customer breakdowns, the rating histogram, the monthly trend and the
//! top-N product ranking.

use chrono::Local;
use dashboard_core::formatting::{format_currency, format_number, percentage};
use dashboard_data::aggregator::{GroupBreakdown, SalesAggregator};
use dashboard_data::table::Table;

use crate::bar::BarChart;

/// Presentation options for the report.
pub struct ReportOptions {
    /// Number of entries in the top-products ranking.
    pub top_products: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { top_products: 5 }
    }
}

/// Render the full dashboard for `table`.
pub fn render_dashboard(table: &Table, options: &ReportOptions) -> String {
    let mut out = String::new();

    out.push_str("SUPERMARKET SALES DASHBOARD\n");
    out.push_str(&format!(
        "Generated {}\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));

    if table.row_count() == 0 {
        out.push_str("\nNo valid rows in the dataset; nothing to report.\n");
        return out;
    }

    render_kpis(&mut out, table);
    render_revenue_charts(&mut out, table);
    render_customers(&mut out, table);
    render_ratings(&mut out, table);
    render_trend(&mut out, table);
    render_top_products(&mut out, table, options.top_products);
    render_footer(&mut out, table);

    out
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"─".repeat(title.len().max(24)));
    out.push('\n');
}

fn render_kpis(out: &mut String, table: &Table) {
    let kpis = SalesAggregator::kpis(table);

    section(out, "Key metrics");
    out.push_str(&format!(
        "  Total revenue        {}\n",
        format_currency(kpis.total_revenue)
    ));
    out.push_str(&format!(
        "  Transactions         {}\n",
        format_number(kpis.total_transactions as f64, 0)
    ));
    out.push_str(&format!(
        "  Average transaction  {}\n",
        format_currency(kpis.average_transaction)
    ));
    out.push_str(&format!(
        "  Items sold           {}\n",
        format_number(kpis.total_items_sold, 0)
    ));
    out.push_str(&format!(
        "  Average rating       {}\n",
        format_number(kpis.average_rating, 1)
    ));
    out.push_str(&format!(
        "  Largest transaction  {}\n",
        format_currency(kpis.max_transaction)
    ));
    out.push_str(&format!(
        "  Smallest transaction {}\n",
        format_currency(kpis.min_transaction)
    ));
    out.push_str(&format!(
        "  Average basket size  {} items\n",
        format_number(SalesAggregator::average_basket_size(table), 1)
    ));
}

fn render_revenue_charts(out: &mut String, table: &Table) {
    for (title, result) in [
        ("Sales by branch", SalesAggregator::sales_by_branch(table)),
        ("Sales by city", SalesAggregator::sales_by_city(table)),
        (
            "Sales by product line",
            SalesAggregator::sales_by_product_line(table),
        ),
    ] {
        section(out, title);
        for line in BarChart::new(&result.labels, &result.values).to_lines(format_currency) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }

    let payments = SalesAggregator::payment_method_distribution(table);
    section(out, "Payment methods");
    let total_rows = table.row_count() as f64;
    for (label, count) in payments.labels.iter().zip(&payments.values) {
        out.push_str(&format!(
            "  {label}: {} ({}%)\n",
            format_number(*count, 0),
            format_number(percentage(*count, total_rows, 1), 1)
        ));
    }
}

fn render_customers(out: &mut String, table: &Table) {
    section(out, "Customer types");
    render_breakdown(out, &SalesAggregator::customer_type_analysis(table));

    section(out, "Gender");
    render_breakdown(out, &SalesAggregator::gender_analysis(table));
}

fn render_breakdown(out: &mut String, breakdown: &GroupBreakdown) {
    for i in 0..breakdown.labels.len() {
        out.push_str(&format!(
            "  {}: {} across {} transactions\n",
            breakdown.labels[i],
            format_currency(breakdown.totals[i]),
            format_number(breakdown.counts[i] as f64, 0)
        ));
    }
}

fn render_ratings(out: &mut String, table: &Table) {
    let hist = SalesAggregator::rating_distribution(table);

    section(out, "Rating distribution");
    let labels: Vec<String> = hist
        .edges
        .windows(2)
        .map(|pair| format!("{:.1}-{:.1}", pair[0], pair[1]))
        .collect();
    let counts: Vec<f64> = hist.counts.iter().map(|c| *c as f64).collect();
    for line in BarChart::new(&labels, &counts).to_lines(|v| format_number(v, 0)) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
}

fn render_trend(out: &mut String, table: &Table) {
    let trend = SalesAggregator::monthly_sales_trend(table);

    section(out, "Monthly sales trend");
    if trend.labels.is_empty() {
        out.push_str("  No parsable dates in the dataset.\n");
        return;
    }
    for line in BarChart::new(&trend.labels, &trend.values).to_lines(format_currency) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
}

fn render_top_products(out: &mut String, table: &Table, n: usize) {
    let top = SalesAggregator::top_products(table, n);

    section(out, &format!("Top {n} product lines"));
    for (rank, (label, value)) in top.labels.iter().zip(&top.values).enumerate() {
        out.push_str(&format!(
            "  {}. {label}: {}\n",
            rank + 1,
            format_currency(*value)
        ));
    }
}

fn render_footer(out: &mut String, table: &Table) {
    let summary = table.summary();

    out.push('\n');
    out.push_str(&format!(
        "{} rows · {} branches · {} cities · {} product lines\n",
        format_number(summary.rows as f64, 0),
        summary.branches,
        summary.cities,
        summary.product_lines
    ));
    if table.coerced_values() > 0 {
        out.push_str(&format!(
            "Note: {} numeric values could not be parsed and were counted as 0.\n",
            table.coerced_values()
        ));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::schema::CoercionPolicy;

    const HEADER: &str = "Branch,City,Customer type,Gender,Product line,Unit price,Quantity,Total,Date,Payment,Rating";

    fn scenario_table() -> Table {
        let raw = format!(
            "{HEADER}\n\
             A,Yangon,Member,Female,Health,10,2,20,1/5/2019,Cash,9\n\
             B,Naypyitaw,Normal,Male,Food,5,1,5,1/6/2019,Cash,,\n\
             A,Yangon,Normal,Male,Health,10,1,10,2/1/2019,Ewallet,7"
        );
        Table::load(&raw, CoercionPolicy::SilentZero).expect("load")
    }

    #[test]
    fn test_report_contains_all_sections() {
        let report = render_dashboard(&scenario_table(), &ReportOptions::default());

        for title in [
            "Key metrics",
            "Sales by branch",
            "Sales by city",
            "Sales by product line",
            "Payment methods",
            "Customer types",
            "Gender",
            "Rating distribution",
            "Monthly sales trend",
            "Top 5 product lines",
        ] {
            assert!(report.contains(title), "missing section: {title}");
        }
    }

    #[test]
    fn test_report_shows_scenario_numbers() {
        let report = render_dashboard(&scenario_table(), &ReportOptions::default());

        // Revenue of the two surviving rows.
        assert!(report.contains("$30.00"));
        // Trend months from the Date column.
        assert!(report.contains("January"));
        assert!(report.contains("February"));
        // The dropped row's branch must not appear as a group label.
        assert!(!report.contains("Naypyitaw"));
    }

    #[test]
    fn test_report_empty_table_has_no_nan() {
        let table = Table::load(HEADER, CoercionPolicy::SilentZero).expect("load");
        let report = render_dashboard(&table, &ReportOptions::default());

        assert!(report.contains("No valid rows"));
        assert!(!report.contains("NaN"));
    }

    #[test]
    fn test_report_mentions_coerced_values() {
        let raw = format!("{HEADER}\nA,Yangon,Member,Female,Health,oops,2,20,1/5/2019,Cash,9");
        let table = Table::load(&raw, CoercionPolicy::SilentZero).expect("load");
        let report = render_dashboard(&table, &ReportOptions::default());

        assert!(report.contains("could not be parsed"));
    }

    #[test]
    fn test_report_top_products_respects_n() {
        let report = render_dashboard(&scenario_table(), &ReportOptions { top_products: 1 });
        assert!(report.contains("Top 1 product lines"));
        assert!(report.contains("1. Health"));
        assert!(!report.contains("2. "));
    }
}
