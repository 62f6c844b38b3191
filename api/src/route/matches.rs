use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::matches::{
    delete_match, register_match, show_match, show_match_list, update_match,
};

pub fn build_match_routers() -> Router<AppRegistry> {
    let match_routers = Router::new()
        .route("/", post(register_match))
        .route("/", get(show_match_list))
        .route("/:match_id", get(show_match))
        .route("/:match_id", put(update_match))
        .route("/:match_id", delete(delete_match));

    Router::new().nest("/matches", match_routers)
}
