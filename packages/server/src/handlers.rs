//! HTTP handler functions for the EV demand API.

use actix_web::{HttpResponse, web};
use ev_demand_dataset::CorrelationMatrix;
use ev_demand_server_models::{
    ApiCity, ApiCityBar, ApiCorrelation, ApiError, ApiHealth, ApiLinePoint, ApiView,
    CitiesResponse, CityQueryParams, InsightsResponse, PredictResponse,
};
use ev_demand_station_models::{
    EV_VEHICLE_DENSITY_SLIDER, POPULATION_DENSITY_SLIDER, PredictionInput,
};

use crate::AppState;

/// Number of cities in the top-cities bar chart.
const TOP_CITIES_CHART_SIZE: usize = 10;

/// Number of cities in the station count line chart.
const LINE_CHART_SIZE: usize = 20;

fn error_body(message: impl Into<String>) -> ApiError {
    ApiError {
        error: message.into(),
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len(),
    })
}

/// `GET /api/views`
///
/// Returns the dashboard pages in navigation order.
pub async fn views() -> HttpResponse {
    let views: Vec<ApiView> = crate::views::all_views()
        .into_iter()
        .map(ApiView::from)
        .collect();
    HttpResponse::Ok().json(views)
}

/// `GET /api/cities`
///
/// Returns dataset rows, optionally filtered by state, sorted by station
/// count, and limited.
pub async fn cities(
    state: web::Data<AppState>,
    params: web::Query<CityQueryParams>,
) -> HttpResponse {
    let dataset = &state.dataset;

    let by_stations = match params.sort.as_deref() {
        None | Some("file") => false,
        Some("stations") => true,
        Some(other) => {
            return HttpResponse::BadRequest().json(error_body(format!(
                "unknown sort '{other}': expected 'file' or 'stations'"
            )));
        }
    };

    let rows = dataset.query(params.state.as_deref(), by_stations, params.limit);

    HttpResponse::Ok().json(CitiesResponse {
        cities: rows.into_iter().map(ApiCity::from).collect(),
        total_records: dataset.len(),
    })
}

/// `GET /api/insights`
///
/// Returns the data behind the correlation heatmap, the top-cities bar
/// chart, and the station count line chart.
pub async fn insights(state: web::Data<AppState>) -> HttpResponse {
    let dataset = &state.dataset;

    let top_cities = dataset
        .top_by_station_count(TOP_CITIES_CHART_SIZE)
        .into_iter()
        .map(|r| ApiCityBar {
            city: r.city.clone(),
            state: r.state.clone(),
            station_count: r.station_count,
        })
        .collect();

    let station_counts = dataset
        .top_by_station_count(LINE_CHART_SIZE)
        .into_iter()
        .map(|r| ApiLinePoint {
            city: r.city.clone(),
            station_count: r.station_count,
        })
        .collect();

    HttpResponse::Ok().json(InsightsResponse {
        correlation: to_api_correlation(&dataset.correlation_matrix()),
        top_cities,
        station_counts,
    })
}

/// `GET /api/predict/sliders`
///
/// Returns the bounds and step sizes the prediction form must use.
pub async fn sliders() -> HttpResponse {
    HttpResponse::Ok().json([POPULATION_DENSITY_SLIDER, EV_VEHICLE_DENSITY_SLIDER])
}

/// `POST /api/predict`
///
/// Validates the submitted slider positions, then estimates station demand.
pub async fn predict(
    state: web::Data<AppState>,
    input: web::Json<PredictionInput>,
) -> HttpResponse {
    let input = input.into_inner();

    if let Err(e) = input.validate() {
        return HttpResponse::BadRequest().json(error_body(e.to_string()));
    }

    match ev_demand_predict::estimate_demand(
        state.model.as_ref(),
        input.population_density,
        input.ev_vehicle_density,
    ) {
        Ok(result) => HttpResponse::Ok().json(PredictResponse::from(result)),
        Err(e) => {
            log::error!("Failed to estimate demand: {e}");
            HttpResponse::InternalServerError().json(error_body("Failed to estimate demand"))
        }
    }
}

fn to_api_correlation(matrix: &CorrelationMatrix) -> ApiCorrelation {
    ApiCorrelation {
        columns: matrix.columns.iter().map(ToString::to_string).collect(),
        values: matrix.values.iter().map(|row| row.to_vec()).collect(),
    }
}
