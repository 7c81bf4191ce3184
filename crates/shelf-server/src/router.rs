use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Bookshelf endpoints.
pub fn build_router(state: AppState) -> Router {
    let enable_cors = state.config.enable_cors;
    let router = Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route("/", get(handler::list_books).post(handler::create_book))
        .route(
            "/:id",
            get(handler::get_book)
                .put(handler::replace_book)
                .patch(handler::update_book)
                .delete(handler::delete_book),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
