//! HTTP handler functions for the flood risk API.

use actix_web::{HttpResponse, web};
use flood_risk_engine::EngineError;
use flood_risk_server_models::{ApiError, ApiHealth, ApiMapWard, ApiWardDetail, ApiWardSummary};

use crate::AppState;

/// `GET /health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        rainfall_rows: state.dataset.rainfall().len(),
        drainage_rows: state.dataset.drainage().len(),
        centroid_rows: state.dataset.centroids().len(),
    })
}

/// `GET /wards`
///
/// Lists every ward with rainfall observations.
pub async fn wards(state: web::Data<AppState>) -> HttpResponse {
    let wards: Vec<ApiWardSummary> = state
        .engine()
        .list_wards()
        .into_iter()
        .map(ApiWardSummary::from)
        .collect();

    HttpResponse::Ok().json(wards)
}

/// `GET /ward/{ward_id}`
///
/// Returns drainage attributes, rainfall history, and a risk explanation for
/// one ward.
pub async fn ward_detail(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let ward_id = path.into_inner();

    match state.engine().ward_detail(&ward_id) {
        Ok(detail) => HttpResponse::Ok().json(ApiWardDetail::from(detail)),
        Err(EngineError::WardNotFound(_)) => {
            HttpResponse::NotFound().json(ApiError::new("Ward not found"))
        }
        Err(e @ EngineError::MalformedData { .. }) => {
            log::warn!("Refusing to derive ward detail: {e}");
            HttpResponse::UnprocessableEntity().json(ApiError::new(e.to_string()))
        }
    }
}

/// `GET /map-data`
///
/// Lists wards that can be placed on the map.
pub async fn map_data(state: web::Data<AppState>) -> HttpResponse {
    let wards: Vec<ApiMapWard> = state
        .engine()
        .map_data()
        .into_iter()
        .map(ApiMapWard::from)
        .collect();

    HttpResponse::Ok().json(wards)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use flood_risk_dataset::csv_source::{read_centroids, read_drainage, read_rainfall};
    use flood_risk_dataset::{DatasetContext, DatasetPaths};
    use flood_risk_ward::WardDirectory;
    use flood_risk_ward_models::RiskLevel;

    use super::*;
    use crate::configure;

    fn sample_state() -> web::Data<AppState> {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        web::Data::new(AppState::new(
            DatasetContext::load(&DatasetPaths::in_dir(dir)),
            WardDirectory::builtin(),
        ))
    }

    #[actix_web::test]
    async fn health_reports_row_counts() {
        let app =
            test::init_service(App::new().app_data(sample_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["healthy"], true);
        assert_eq!(body["rainfallRows"], 112);
        assert_eq!(body["drainageRows"], 14);
        assert_eq!(body["centroidRows"], 14);
    }

    #[actix_web::test]
    async fn wards_lists_rainfall_wards() {
        let app =
            test::init_service(App::new().app_data(sample_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/wards").to_request();
        let wards: Vec<ApiWardSummary> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(wards.len(), 14);
        assert_eq!(wards[0].ward_id.as_str(), "Ward_1");
        assert_eq!(wards[0].ward_name, "Connaught Place");
        assert!(wards.iter().all(|w| w.preparedness_score <= 100));
    }

    #[actix_web::test]
    async fn ward_detail_returns_documented_shape() {
        let app =
            test::init_service(App::new().app_data(sample_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/ward/Ward_9").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["ward_id"], "Ward_9");
        assert_eq!(body["average_rainfall_intensity"], 62.5);
        assert_eq!(body["drain_capacity"], 50.0);
        assert_eq!(body["risk_level"], "High");
        assert_eq!(body["preparedness_score"], 75);
        assert_eq!(body["drainage_info"]["condition"], "Fair");
        assert_eq!(body["rainfall_history"].as_array().unwrap().len(), 8);
        assert_eq!(body["rainfall_history"][0]["time"], "2024-07-01");
        assert_eq!(
            body["risk_explanation"],
            "Rainfall intensity (62.5 mm/hr) exceeds drain capacity (50.0 mm/hr)."
        );
    }

    #[actix_web::test]
    async fn unknown_ward_is_404() {
        let app =
            test::init_service(App::new().app_data(sample_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/ward/Ward_404").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body, ApiError::new("Ward not found"));
    }

    #[actix_web::test]
    async fn malformed_ward_is_422() {
        let dataset = DatasetContext::new(
            read_rainfall("ward_id,rainfall_intensity_mm_per_hr,rainfall_mm\nWard_1,-3,0\n".as_bytes())
                .unwrap(),
            read_drainage("ward_id,drain_capacity_mm_per_hr\nWard_2,40\n".as_bytes()).unwrap(),
            read_centroids("ward_id,latitude,longitude\n".as_bytes()).unwrap(),
        );
        let state = web::Data::new(AppState::new(dataset, WardDirectory::builtin()));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/ward/Ward_1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::get().uri("/ward/Ward_2").to_request();
        let detail: ApiWardDetail = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail.summary.risk_level, RiskLevel::Low);
        assert!(detail.rainfall_history.is_empty());
    }

    #[actix_web::test]
    async fn map_data_renames_display_name() {
        let app =
            test::init_service(App::new().app_data(sample_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/map-data").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let wards = body.as_array().unwrap();
        assert_eq!(wards.len(), 13);
        assert_eq!(wards[0]["ward_name"], "Connaught Place");
        assert!(wards[0].get("display_name").is_none());
        assert!(wards.iter().all(|w| w["ward_id"] != "Ward_14"));
    }
}
