use std::sync::Arc;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use fridgechef_core::{
    application::create_service,
    domain::{common::FridgeChefConfig, ingredient::entities::IngredientCatalog},
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, info, info_span, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::http::{
    detection::router::detection_routes, health::health_routes,
    ingredient::router::ingredient_routes, recipe::router::recipe_routes,
    server::{app_state::AppState, openapi::ApiDoc},
    session::router::session_routes,
};
use crate::args::Args;

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = FridgeChefConfig::from(args.as_ref().clone());
    let service = create_service(config)?;

    Ok(AppState::new(args, service, IngredientCatalog::default()))
}

fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| {
            if origin.as_str() == "*" {
                warn!("Wildcard origin is not allowed with credentials, ignoring it");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "Ignoring invalid allowed origin");
                    None
                }
            }
        })
        .collect()
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = allowed_origins(&state.args.server.allowed_origins);
    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true);

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let mut router = axum::Router::new()
        .merge(SwaggerUi::new(format!("{}/swagger-ui", root_path)).url(api_docs_url, openapi))
        .merge(health_routes(&root_path))
        .merge(ingredient_routes(state.clone()))
        .merge(recipe_routes(state.clone()))
        .merge(detection_routes(state.clone()))
        .merge(session_routes(state.clone()));

    if let Some(static_dir) = &state.args.server.static_dir {
        info!(static_dir = %static_dir.display(), "Serving frontend assets");
        let index = static_dir.join("index.html");
        router = router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    Ok(router.layer(trace_layer).layer(cors).with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_skips_wildcard_and_invalid() {
        let origins = vec![
            "http://localhost:5173".to_string(),
            "*".to_string(),
            "bad\norigin".to_string(),
            String::new(),
        ];

        let values = allowed_origins(&origins);

        assert_eq!(values, vec![HeaderValue::from_static("http://localhost:5173")]);
    }
}
