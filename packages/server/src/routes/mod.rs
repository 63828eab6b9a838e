use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::system::health))
        .routes(routes!(handlers::system::stats))
        .routes(routes!(handlers::analysis::analyze))
        .routes(routes!(handlers::analysis::get_analysis))
        .routes(routes!(handlers::submission::get_submission))
}
