//! Plain-text renderings of the pages.

use tradeboard_api::to_date_input;
use tradeboard_metrics::{
    LineChartData, TrendSummary, format_currency, format_int, format_number, format_percent,
};
use tradeboard_views::{DashboardPage, ForecastsPage, Pagination, ProductsPage, PurchasesPage};

/// Cards, monthly table and best sellers.
#[must_use]
pub fn render_dashboard(page: &DashboardPage) -> String {
    let mut out = vec![format!("Dashboard {}", page.year()), String::new()];

    out.push(card("Sales", &page.sales_summary()));
    out.push(card("Purchases", &page.purchases_summary()));
    let profit = page.profit();
    out.push(format!(
        "{:<10} {:>16}  {}",
        "Profit",
        format_currency(profit.profit),
        profit.margin_label()
    ));
    out.push(format!(
        "{:<10} {:>16}",
        "Products",
        format_int(page.product_count().data as f64)
    ));

    out.push(String::new());
    out.extend(monthly_table(&page.line_chart(), &page.growth_chart()));

    let donut = page.top_products_donut();
    if !donut.is_empty() {
        out.push(String::new());
        out.push("Top products".to_string());
        for ((label, amount), share) in donut.labels.iter().zip(&donut.amounts).zip(&donut.values) {
            out.push(format!(
                "  {label:<24} {:>16} {:>7}",
                format_currency(*amount),
                format_percent(*share)
            ));
        }
    }

    errors(&mut out, page.errors());
    out.join("\n")
}

/// Stock counters and one page of products.
#[must_use]
pub fn render_products(page: &ProductsPage) -> String {
    let stock = page.stock();
    let mut out = vec![
        format!(
            "Products: {} total, {} in stock, {} below {}",
            stock.total, stock.con_stock, stock.low_stock, stock.umbral
        ),
        String::new(),
        format!("{:>6}  {:<32} {:>8}", "ID", "Name", "Stock"),
    ];

    let list = page.list();
    for product in &list.data.items {
        out.push(format!(
            "{:>6}  {:<32} {:>8}",
            product.id,
            product.nombre,
            format_int(product.stock_cantidad as f64)
        ));
    }
    if list.data.is_empty() {
        out.push("  (no products)".to_string());
    }

    out.push(pager(page.pagination()));
    errors(&mut out, list.error.into_iter().chain(page.stats().error));
    out.join("\n")
}

/// Purchase counters and one page of purchases.
#[must_use]
pub fn render_purchases(page: &PurchasesPage) -> String {
    let totals = page.totals();
    let mut out = vec![
        format!(
            "Purchases: {} for {}",
            format_int(totals.data.count as f64),
            format_currency(totals.data.amount)
        ),
        String::new(),
        format!(
            "{:>6}  {:<11} {:>5}  {:<24} {:>10} {:>14} {:>16}",
            "ID", "Month", "Year", "Product", "Qty", "Unit", "Total"
        ),
    ];

    let list = page.list();
    for purchase in &list.data.items {
        let product = page
            .product_name(purchase.id_producto)
            .unwrap_or_else(|| format!("#{}", purchase.id_producto));
        out.push(format!(
            "{:>6}  {:<11} {:>5}  {:<24} {:>10} {:>14} {:>16}",
            purchase.id,
            purchase.mes,
            purchase.anio,
            product,
            format_number(purchase.cantidad),
            format_currency(purchase.precio_unitario),
            format_currency(purchase.precio_total)
        ));
    }
    if list.data.is_empty() {
        out.push("  (no purchases)".to_string());
    }

    out.push(pager(page.pagination()));
    errors(&mut out, list.error.into_iter().chain(totals.error));
    out.join("\n")
}

/// The current page of stored forecasts.
#[must_use]
pub fn render_forecasts(page: &ForecastsPage) -> String {
    let mut out = vec![format!(
        "{:<24}  {:<28} {:<5} {:>8} {:>10}  {:<10}",
        "ID", "Name", "Freq", "Periods", "Points", "Created"
    )];

    for forecast in page.visible() {
        out.push(format!(
            "{:<24}  {:<28} {:<5} {:>8} {:>10}  {:<10}",
            forecast.id(),
            forecast.nombre.as_deref().unwrap_or("-"),
            forecast.frecuencia.as_deref().unwrap_or("-"),
            forecast
                .periodos
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
            forecast.predicciones.len(),
            forecast.creado_en.as_deref().map(to_date_input).unwrap_or_default()
        ));
    }
    let list = page.list();
    if list.data.is_empty() {
        out.push("  (no forecasts)".to_string());
    }

    out.push(pager(page.pagination()));
    errors(&mut out, list.error);
    out.join("\n")
}

fn card(title: &str, summary: &TrendSummary) -> String {
    format!(
        "{title:<10} {:>16}  {} {} vs previous month",
        format_currency(summary.total),
        summary.trend.as_str(),
        format_percent(summary.change_pct)
    )
}

fn monthly_table(line: &LineChartData, growth: &LineChartData) -> Vec<String> {
    let column = |chart: &LineChartData, label: &str, i: usize| {
        chart
            .dataset(label)
            .and_then(|d| d.data.get(i).copied().flatten())
    };

    let mut rows = vec![format!(
        "{:<5} {:>16} {:>16} {:>12}",
        "Mes", "Ventas", "Compras", "Crecimiento"
    )];
    for (i, month) in line.labels.iter().enumerate() {
        let amount = |label| column(line, label, i).map_or_else(String::new, format_currency);
        rows.push(format!(
            "{month:<5} {:>16} {:>16} {:>12}",
            amount("Ventas"),
            amount("Compras"),
            column(growth, "Crecimiento (%)", i).map_or_else(String::new, format_percent)
        ));
    }
    rows
}

fn pager(pagination: &Pagination) -> String {
    format!(
        "\nShowing {}-{} of {} (page {}/{})",
        pagination.from(),
        pagination.to(),
        pagination.total(),
        pagination.page(),
        pagination.total_pages()
    )
}

fn errors(out: &mut Vec<String>, errors: impl IntoIterator<Item = String>) {
    for error in errors {
        out.push(format!("error: {error}"));
    }
}
