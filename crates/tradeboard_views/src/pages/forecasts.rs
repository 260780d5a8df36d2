use chrono::{Datelike, Utc};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::sync::Arc;
use tradeboard_api::{Transport, is_object_id, parse_utc_date};
use tradeboard_metrics::{Dataset, LineChartData, MONTHS};
use tradeboard_resources::{DateRange, FORECASTS_PATH, Forecast, ForecastList};
use tradeboard_sync::{RequestState, ResourceHook};

use super::run;
use crate::crud::{CrudController, Messages, MutationError};
use crate::modal::ModalMode;
use crate::notify::Notifier;
use crate::pagination::Pagination;

const MESSAGES: Messages = Messages {
    created: "Forecast created",
    updated: "Forecast updated",
    deleted: "Forecast deleted",
    save_failed: "Could not save the forecast",
    delete_failed: "Could not delete the forecast",
    confirm_delete: "Delete this forecast? This cannot be undone.",
};

/// Frequency sent when the form leaves it out (month start).
const DEFAULT_FREQUENCY: &str = "MS";

// ─────────────────────────────────────────────────────────────────────────────
// Chart Derivation
// ─────────────────────────────────────────────────────────────────────────────

/// Distinct UTC years covered by a forecast's points, ascending.
#[must_use]
pub fn forecast_years(forecast: &Forecast) -> Vec<i32> {
    forecast
        .predicciones
        .iter()
        .filter_map(|point| parse_utc_date(&point.fecha))
        .map(|date| date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Prediction and confidence band of one year, one slot per month.
///
/// Months without a point are gaps.
#[must_use]
pub fn forecast_chart(forecast: &Forecast, year: i32) -> LineChartData {
    let mut predicted = vec![None; MONTHS];
    let mut lower = vec![None; MONTHS];
    let mut upper = vec![None; MONTHS];

    for point in &forecast.predicciones {
        let Some(date) = parse_utc_date(&point.fecha) else {
            continue;
        };
        if date.year() != year {
            continue;
        }
        let month = date.month0() as usize;
        predicted[month] = point.pronostico;
        lower[month] = point.limite_inferior;
        upper[month] = point.limite_superior;
    }

    LineChartData::with_labels(&[])
        .push(Dataset::sparse("Predicción", predicted, "#2563eb"))
        .push(Dataset::sparse("Límite inferior", lower, "#16a34a"))
        .push(Dataset::sparse("Límite superior", upper, "#ef4444"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Regeneration
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a regenerate request built from the form payload.
///
/// Keeps `nombre` and `notas`, defaults `regenerar.frecuencia` to `MS` and
/// `regenerar.regresores` to an empty list, and forwards `periodos` only when
/// it is a number.
#[must_use]
pub fn regenerate_body(payload: &Value) -> Value {
    let present = |pointer: &str| payload.pointer(pointer).filter(|v| !v.is_null()).cloned();

    let mut regenerate = Map::new();
    regenerate.insert(
        "frecuencia".into(),
        present("/regenerar/frecuencia").unwrap_or_else(|| json!(DEFAULT_FREQUENCY)),
    );
    regenerate.insert(
        "regresores".into(),
        present("/regenerar/regresores")
            .filter(Value::is_array)
            .unwrap_or_else(|| json!([])),
    );
    for key in ["desde", "hasta"] {
        if let Some(value) = present(format!("/regenerar/{key}").as_str()) {
            regenerate.insert(key.into(), value);
        }
    }
    if let Some(periods) = present("/regenerar/periodos").filter(Value::is_number) {
        regenerate.insert("periodos".into(), periods);
    }

    let mut body = Map::new();
    for key in ["nombre", "notas"] {
        if let Some(value) = present(format!("/{key}").as_str()) {
            body.insert(key.into(), value);
        }
    }
    body.insert("regenerar".into(), Value::Object(regenerate));
    Value::Object(body)
}

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

/// Stored forecasts on the forecast backend, paginated client-side.
pub struct ForecastsPage {
    transport: Arc<dyn Transport>,
    list: ResourceHook<ForecastList>,
    draft: DateRange,
    applied: DateRange,
    pagination: Pagination,
    crud: CrudController<Forecast>,
    chart: Option<(Forecast, i32)>,
}

impl ForecastsPage {
    /// Creates the page over the forecast backend's transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            list: ResourceHook::new(ForecastList),
            draft: DateRange::default(),
            applied: DateRange::default(),
            pagination: Pagination::default(),
            crud: CrudController::new(FORECASTS_PATH, MESSAGES, notifier),
            chart: None,
        }
    }

    /// Fetches the list if the applied range or the refresh token changed.
    pub async fn sync(&mut self) {
        let pending = self.list.observe(&self.applied, self.crud.refresh());
        run(pending, &*self.transport).await;
        self.pagination
            .set_total(self.list.read(|s| s.data.len() as u64));
    }

    /// Edits the date inputs without searching.
    pub fn set_range(&mut self, from: Option<&str>, to: Option<&str>) {
        let date = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        self.draft = DateRange {
            from: date(from),
            to: date(to),
        };
    }

    /// Applies the date inputs, returns to the first page and fetches again.
    pub fn search(&mut self) {
        self.applied = self.draft.clone();
        self.pagination.reset();
        self.crud.invalidate();
    }

    /// Clears the date inputs and the applied range.
    pub fn clear(&mut self) {
        self.draft = DateRange::default();
        self.search();
    }

    /// Fetches the same range again.
    pub fn reload(&mut self) {
        self.crud.invalidate();
    }

    /// Range the list was fetched with.
    #[must_use]
    pub fn applied_range(&self) -> &DateRange {
        &self.applied
    }

    /// List state, every forecast in the range.
    #[must_use]
    pub fn list(&self) -> RequestState<Vec<Forecast>> {
        self.list.state()
    }

    /// Forecasts on the current page.
    #[must_use]
    pub fn visible(&self) -> Vec<Forecast> {
        self.list.read(|s| self.pagination.slice(&s.data).to_vec())
    }

    /// Pagination state.
    #[must_use]
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Pagination controls.
    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    /// Form and delete flows.
    #[must_use]
    pub fn crud(&self) -> &CrudController<Forecast> {
        &self.crud
    }

    /// Form and delete flows.
    pub fn crud_mut(&mut self) -> &mut CrudController<Forecast> {
        &mut self.crud
    }

    /// Submits the open form: a create posts `payload` as is, a regenerate
    /// puts [`regenerate_body`] of it. A success closes the chart.
    ///
    /// # Errors
    ///
    /// See [`CrudController::submit`].
    pub async fn submit(&mut self, payload: Value) -> Result<(), MutationError> {
        let body = if self.crud.modal().mode() == ModalMode::Regenerate {
            if let Some(forecast) = self.crud.modal().current() {
                let id = forecast.id();
                if !is_object_id(&id) {
                    tracing::warn!(%id, "forecast id is not an object id");
                }
            }
            regenerate_body(&payload)
        } else {
            payload
        };

        self.crud.submit(&*self.transport, body).await?;
        self.close_chart();
        Ok(())
    }

    /// Deletes the forecast awaiting confirmation, closing its chart.
    ///
    /// # Errors
    ///
    /// See [`CrudController::confirm_delete`].
    pub async fn confirm_delete(&mut self) -> Result<Option<String>, MutationError> {
        let deleted = self.crud.confirm_delete(&*self.transport).await?;
        if deleted.is_some() && self.chart_id() == deleted {
            self.close_chart();
        }
        Ok(deleted)
    }

    /// Opens the chart of `forecast` on its first year, or closes it if it
    /// is already showing.
    pub fn toggle_chart(&mut self, forecast: &Forecast) {
        if self.chart_id() == Some(forecast.id()) {
            self.close_chart();
            return;
        }
        let year = forecast_years(forecast)
            .first()
            .copied()
            .unwrap_or_else(|| Utc::now().year());
        self.chart = Some((forecast.clone(), year));
    }

    /// Hides the chart.
    pub fn close_chart(&mut self) {
        self.chart = None;
    }

    /// Switches the chart to another year.
    pub fn set_chart_year(&mut self, year: i32) {
        if let Some((_, shown)) = self.chart.as_mut() {
            *shown = year;
        }
    }

    /// Year shown in the chart.
    #[must_use]
    pub fn chart_year(&self) -> Option<i32> {
        self.chart.as_ref().map(|(_, year)| *year)
    }

    /// Years the charted forecast covers.
    #[must_use]
    pub fn chart_years(&self) -> Vec<i32> {
        self.chart
            .as_ref()
            .map(|(forecast, _)| forecast_years(forecast))
            .unwrap_or_default()
    }

    /// Chart payload of the selected forecast and year.
    #[must_use]
    pub fn chart(&self) -> Option<LineChartData> {
        self.chart
            .as_ref()
            .map(|(forecast, year)| forecast_chart(forecast, *year))
    }

    fn chart_id(&self) -> Option<String> {
        self.chart.as_ref().map(|(forecast, _)| forecast.id())
    }
}

impl core::fmt::Debug for ForecastsPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ForecastsPage")
            .field("applied", &self.applied)
            .field("pagination", &self.pagination)
            .field("chart", &self.chart_id())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast() -> Forecast {
        serde_json::from_value(json!({
            "_id": "65f0c2aa65f0c2aa65f0c2aa",
            "predicciones": [
                { "fecha": "2025-12-01T00:00:00Z", "pronostico": 9.0 },
                { "fecha": "2025-01-01T00:00:00Z", "pronostico": 10.0,
                  "limite_inferior": 8.0, "limite_superior": 12.0 },
                { "fecha": "2024-11-01T00:00:00.000Z", "pronostico": 7.0 },
                { "fecha": "not a date", "pronostico": 1.0 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn years_are_sorted_and_distinct() {
        assert_eq!(forecast_years(&forecast()), vec![2024, 2025]);
    }

    #[test]
    fn chart_has_twelve_slots_with_gaps() {
        let chart = forecast_chart(&forecast(), 2025);
        assert_eq!(chart.labels.len(), 12);

        let predicted = &chart.datasets[0].data;
        assert_eq!(predicted.len(), 12);
        assert_eq!(predicted[0], Some(10.0));
        assert_eq!(predicted[1], None);
        assert_eq!(predicted[11], Some(9.0));
        assert_eq!(chart.datasets[1].data[0], Some(8.0));
        assert_eq!(chart.datasets[2].data[11], None);
    }

    #[test]
    fn regenerate_defaults() {
        let body = regenerate_body(&json!({
            "nombre": "Ventas",
            "regenerar": { "desde": "2020-01-01", "hasta": "2024-12-01", "periodos": "12" }
        }));
        assert_eq!(
            body,
            json!({
                "nombre": "Ventas",
                "regenerar": {
                    "frecuencia": "MS",
                    "regresores": [],
                    "desde": "2020-01-01",
                    "hasta": "2024-12-01"
                }
            })
        );
    }

    #[test]
    fn regenerate_keeps_explicit_settings() {
        let body = regenerate_body(&json!({
            "nombre": "Ventas",
            "notas": "",
            "regenerar": { "frecuencia": "W", "regresores": ["precio"], "periodos": 6 }
        }));
        assert_eq!(body["notas"], json!(""));
        assert_eq!(body["regenerar"]["frecuencia"], json!("W"));
        assert_eq!(body["regenerar"]["regresores"], json!(["precio"]));
        assert_eq!(body["regenerar"]["periodos"], json!(6));
    }
}
