//! Pages driven against scripted backends.

use serde_json::json;
use std::sync::Arc;
use tradeboard_api::testing::{Reply, ScriptedTransport};
use tradeboard_api::{BackendProfile, Method};
use tradeboard_metrics::Trend;
use tradeboard_resources::Forecast;
use tradeboard_views::{
    DashboardPage, ForecastsPage, Level, ModalMode, NotificationLog, ProductsPage, PurchasesPage,
};

fn primary() -> Arc<ScriptedTransport> {
    Arc::new(ScriptedTransport::default())
}

fn notifications() -> Arc<NotificationLog> {
    Arc::new(NotificationLog::new())
}

fn product_rows(total: u64) -> serde_json::Value {
    json!({
        "data": [
            { "id": 1, "nombre": "Arroz", "stock_cantidad": 30 },
            { "id": 2, "nombre": "Sal", "stock_cantidad": 0 }
        ],
        "total": total
    })
}

#[tokio::test]
async fn products_create_refreshes_list_and_stats() {
    let backend = primary();
    backend.on_get("/api/productos", product_rows(47));
    backend.on_get(
        "/api/productos/stats",
        json!({ "total": 47, "con_stock": 40, "low_stock": 6, "umbral": 20 }),
    );
    backend.on(Method::POST, "/api/productos", Reply::Json(json!({ "id": 3 })));
    let log = notifications();
    let mut page = ProductsPage::new(backend.clone(), log.clone());

    page.sync().await;
    assert_eq!(page.pagination().total_pages(), 5);
    assert_eq!(page.stock().low_stock, 6);
    assert_eq!(backend.count(&Method::GET, "/api/productos"), 1);

    // Nothing changed, nothing is fetched.
    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/productos"), 1);

    page.crud_mut().open_create();
    page.submit(json!({ "nombre": "Te", "stock_cantidad": 4 }))
        .await
        .unwrap();
    assert!(!page.crud().modal().is_open());
    assert_eq!(log.last().unwrap().message, "Product created");

    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/productos"), 2);
    assert_eq!(backend.count(&Method::GET, "/api/productos/stats"), 2);
}

#[tokio::test]
async fn failed_product_save_keeps_form_and_list() {
    let backend = primary();
    backend.on_get("/api/productos", product_rows(2));
    backend.on_get("/api/productos/stats", json!({ "total": 2, "con_stock": 1 }));
    backend.on(
        Method::PUT,
        "/api/productos/1",
        Reply::Status(400, Some(json!({ "message": "nombre requerido" }))),
    );
    let log = notifications();
    let mut page = ProductsPage::new(backend.clone(), log.clone());
    page.sync().await;

    let product = page.list().data.items[0].clone();
    page.crud_mut().open_edit(product);
    let err = page.submit(json!({ "nombre": "" })).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(page.crud().modal().is_open());
    assert_eq!(page.crud().modal().mode(), ModalMode::Edit);
    assert_eq!(log.count(Level::Error), 1);

    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/productos"), 1);
    assert_eq!(page.list().data.items.len(), 2);
}

#[tokio::test]
async fn product_search_returns_to_first_page() {
    let backend = primary();
    backend.on_get("/api/productos", product_rows(47));
    backend.on_get("/api/productos/stats", json!({}));
    let mut page = ProductsPage::new(backend.clone(), notifications());
    page.sync().await;

    page.pagination_mut().go_to(3);
    page.sync().await;
    let call = backend.last_call("/api/productos").unwrap();
    assert_eq!(call.query_param("page"), Some("3".to_string()));

    page.set_search("  arroz");
    assert_eq!(page.search(), "arroz");
    assert_eq!(page.pagination().page(), 1);
    page.sync().await;

    let call = backend.last_call("/api/productos").unwrap();
    assert_eq!(call.query_param("page"), Some("1".to_string()));
    assert_eq!(call.query_param("q"), Some("arroz".to_string()));
}

#[tokio::test]
async fn deleting_last_row_of_last_page_moves_back() {
    let backend = primary();
    backend.on_get("/api/productos", product_rows(11));
    backend.on_get("/api/productos/stats", json!({ "total": 11, "con_stock": 11 }));
    backend.on(Method::DELETE, "/api/productos/11", Reply::Empty);
    let mut page = ProductsPage::new(backend.clone(), notifications());
    page.sync().await;

    page.pagination_mut().last();
    page.sync().await;
    assert_eq!(page.pagination().page(), 2);

    page.crud_mut().request_delete("11");
    assert_eq!(page.confirm_delete().await.unwrap().as_deref(), Some("11"));
    backend.on_get("/api/productos", product_rows(10));
    page.sync().await;

    let pagination = page.pagination();
    assert_eq!(pagination.page(), 1);
    assert_eq!(pagination.total_pages(), 1);
    assert!(pagination.from() <= pagination.to());

    page.sync().await;
    let call = backend.last_call("/api/productos").unwrap();
    assert_eq!(call.query_param("page"), Some("1".to_string()));
}

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let backend = primary();
    let mut page = ProductsPage::new(backend.clone(), notifications());

    page.crud_mut().request_delete("2");
    assert!(page.crud().confirmation().is_open());
    page.crud_mut().cancel_delete();

    assert_eq!(page.confirm_delete().await.unwrap(), None);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn purchase_filters_reset_page_and_clear() {
    let backend = primary();
    backend.on_get("/api/compras", json!({ "data": [], "total": 120 }));
    backend.on_get("/api/compras/totales", json!({ "totalCompras": 120, "totalIngresos": 5400 }));
    backend.on_get("/api/productos/all", json!([{ "id": 3, "nombre": "Arroz" }]));
    let mut page = PurchasesPage::new(backend.clone(), notifications());
    page.sync().await;

    assert_eq!(page.product_name(3).as_deref(), Some("Arroz"));
    assert_eq!(page.totals().data.count, 120);

    page.pagination_mut().go_to(4);
    page.set_month(Some(" marzo "));
    page.set_product(Some(3));
    assert_eq!(page.pagination().page(), 1);
    page.sync().await;

    let call = backend.last_call("/api/compras").unwrap();
    assert_eq!(call.query_param("mes"), Some("MARZO".to_string()));
    assert_eq!(call.query_param("id_producto"), Some("3".to_string()));
    assert_eq!(call.query_param("page"), Some("1".to_string()));

    page.clear_filters();
    assert!(!page.filter().is_filtered());
    page.sync().await;
    let call = backend.last_call("/api/compras").unwrap();
    assert_eq!(call.query_param("mes"), None);

    // Filters never refetch the counters or the catalog.
    assert_eq!(backend.count(&Method::GET, "/api/compras/totales"), 1);
    assert_eq!(backend.count(&Method::GET, "/api/productos/all"), 1);
}

#[tokio::test]
async fn purchase_delete_refreshes_list_and_counters() {
    let backend = primary();
    backend.on_get("/api/compras", json!({ "data": [{ "id": 8 }], "total": 1 }));
    backend.on_get("/api/compras/totales", json!({}));
    backend.on_get("/api/productos/all", json!([]));
    backend.on(Method::DELETE, "/api/compras/8", Reply::Empty);
    let log = notifications();
    let mut page = PurchasesPage::new(backend.clone(), log.clone());
    page.sync().await;

    page.crud_mut().request_delete("8");
    assert_eq!(page.confirm_delete().await.unwrap().as_deref(), Some("8"));
    assert!(!page.crud().confirmation().is_open());
    assert_eq!(log.count(Level::Success), 1);

    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/compras"), 2);
    assert_eq!(backend.count(&Method::GET, "/api/compras/totales"), 2);
    assert_eq!(backend.count(&Method::GET, "/api/productos/all"), 1);
}

#[tokio::test]
async fn dashboard_derives_cards_and_charts() {
    let backend = primary();
    backend.on_get(
        "/api/reportes/mensual",
        json!({ "labels": [], "compras": [50, 60], "ventas": [100, 150, 0] }),
    );
    backend.on_get(
        "/api/reportes/totales",
        json!({ "total_compras": 800, "total_ventas": 1000 }),
    );
    backend.on_get("/api/reportes/total-productos", json!({ "total_productos": 31 }));
    backend.on_get(
        "/api/reportes/top-productos",
        json!([{ "nombre": "Arroz", "total_bs": 250 }, { "nombre": "Sal", "total_bs": 50 }]),
    );
    let mut page = DashboardPage::new(backend.clone());

    page.sync().await;
    assert!(!page.is_loading());
    assert!(page.errors().is_empty());
    assert_eq!(page.product_count().data, 31);

    let profit = page.profit();
    assert_eq!(profit.profit, 200.0);
    assert_eq!(profit.margin_label(), "+20.0% margin");
    assert_eq!(profit.trend, Trend::Up);

    let sales = page.sales_summary();
    assert_eq!(sales.total, 250.0);
    assert_eq!(sales.change_pct, 50.0);

    let donut = page.top_products_donut();
    assert_eq!(donut.values, vec![25.0, 5.0]);

    let growth = page.growth_chart();
    assert_eq!(growth.labels.len(), 12);
    let rate = growth.dataset("Crecimiento (%)").unwrap();
    assert_eq!(rate.data[1], Some(50.0));

    let line = page.line_chart();
    assert_eq!(line.dataset("Compras").unwrap().data, vec![Some(50.0), Some(60.0)]);

    let call = backend.last_call("/api/reportes/mensual").unwrap();
    assert_eq!(call.query_param("anio"), Some("2025".to_string()));

    // Only the monthly report depends on the year.
    page.set_year(2023);
    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/reportes/mensual"), 2);
    assert_eq!(backend.count(&Method::GET, "/api/reportes/totales"), 1);
}

#[tokio::test]
async fn dashboard_section_failure_is_isolated() {
    let backend = primary();
    backend.on(
        Method::GET,
        "/api/reportes/mensual",
        Reply::Status(500, Some(json!({ "message": "report failed" }))),
    );
    backend.on_get("/api/reportes/totales", json!({ "total_ventas": 10 }));
    backend.on_get("/api/reportes/total-productos", json!({}));
    backend.on_get("/api/reportes/top-productos", json!([]));
    let page = DashboardPage::new(backend.clone());

    page.sync().await;
    assert_eq!(page.errors(), vec!["report failed".to_string()]);
    assert_eq!(page.totals().data.total_ventas, 10.0);
    assert!(page.top_products_donut().is_empty());
}

fn forecast_rows(count: usize) -> serde_json::Value {
    let rows: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "_id": format!("65f0c2aa65f0c2aa65f0c2{i:02x}"),
                "nombre": format!("Run {i}"),
                "predicciones": [{ "fecha": "2026-03-01T00:00:00Z", "pronostico": 12 }]
            })
        })
        .collect();
    serde_json::Value::Array(rows)
}

fn forecast_backend(count: usize) -> Arc<ScriptedTransport> {
    let backend = Arc::new(ScriptedTransport::new(BackendProfile::FORECAST));
    backend.on_get("/api/predecir", forecast_rows(count));
    backend
}

#[tokio::test]
async fn forecasts_paginate_locally() {
    let backend = forecast_backend(12);
    let mut page = ForecastsPage::new(backend.clone(), notifications());
    page.sync().await;

    assert_eq!(page.pagination().total(), 12);
    assert_eq!(page.visible().len(), 10);
    page.pagination_mut().next();
    let rest = page.visible();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].nombre.as_deref(), Some("Run 10"));

    // Paging never hits the backend.
    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/predecir"), 1);

    page.set_range(Some("2026-01-01"), Some(" "));
    page.search();
    assert_eq!(page.pagination().page(), 1);
    page.sync().await;
    let call = backend.last_call("/api/predecir").unwrap();
    assert_eq!(call.query_param("desde"), Some("2026-01-01".to_string()));
    assert_eq!(call.query_param("hasta"), None);
}

#[tokio::test]
async fn forecast_chart_toggles() {
    let backend = forecast_backend(2);
    let mut page = ForecastsPage::new(backend, notifications());
    page.sync().await;
    let first: Forecast = page.visible()[0].clone();

    page.toggle_chart(&first);
    assert_eq!(page.chart_year(), Some(2026));
    assert_eq!(page.chart_years(), vec![2026]);
    let chart = page.chart().unwrap();
    assert_eq!(chart.datasets[0].data[2], Some(12.0));

    page.toggle_chart(&first);
    assert!(page.chart().is_none());
}

#[tokio::test]
async fn regenerate_puts_normalized_body_and_closes_chart() {
    let backend = forecast_backend(1);
    let id = "65f0c2aa65f0c2aa65f0c200";
    let path = format!("/api/predecir/{id}");
    backend.on(Method::PUT, &path, Reply::Json(json!({ "ok": true })));
    let log = notifications();
    let mut page = ForecastsPage::new(backend.clone(), log.clone());
    page.sync().await;

    let forecast = page.visible()[0].clone();
    page.toggle_chart(&forecast);
    page.crud_mut().open_regenerate(forecast);
    page.submit(json!({ "nombre": "Run 0", "regenerar": { "periodos": 6 } }))
        .await
        .unwrap();

    let call = backend.last_call(&path).unwrap();
    assert_eq!(call.method, Method::PUT);
    assert_eq!(
        call.body,
        Some(json!({
            "nombre": "Run 0",
            "regenerar": { "frecuencia": "MS", "regresores": [], "periodos": 6 }
        }))
    );
    assert!(page.chart().is_none());
    assert_eq!(log.last().unwrap().message, "Forecast updated");

    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/predecir"), 2);
}

#[tokio::test]
async fn deleting_the_charted_forecast_closes_the_chart() {
    let backend = forecast_backend(2);
    let id = "65f0c2aa65f0c2aa65f0c200";
    backend.on(Method::DELETE, &format!("/api/predecir/{id}"), Reply::Empty);
    let mut page = ForecastsPage::new(backend, notifications());
    page.sync().await;

    let forecast = page.visible()[0].clone();
    page.toggle_chart(&forecast);
    page.crud_mut().request_delete(forecast.id());

    assert_eq!(page.confirm_delete().await.unwrap().as_deref(), Some(id));
    assert!(page.chart().is_none());
}

#[tokio::test]
async fn failed_forecast_delete_keeps_dialog_open() {
    let backend = forecast_backend(1);
    let id = "65f0c2aa65f0c2aa65f0c200";
    backend.on(
        Method::DELETE,
        &format!("/api/predecir/{id}"),
        Reply::Status(500, Some(json!({ "mensaje": "bloqueado" }))),
    );
    let log = notifications();
    let mut page = ForecastsPage::new(backend.clone(), log.clone());
    page.sync().await;

    page.crud_mut().request_delete(id);
    assert!(page.confirm_delete().await.is_err());
    assert!(page.crud().confirmation().is_open());
    assert_eq!(log.last().unwrap().message, "Could not delete the forecast");

    page.sync().await;
    assert_eq!(backend.count(&Method::GET, "/api/predecir"), 1);
}
