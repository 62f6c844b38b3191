use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::tournament::{
    delete_tournament, register_tournament, show_tournament, show_tournament_list,
    update_tournament,
};

pub fn build_tournament_routers() -> Router<AppRegistry> {
    let tournament_routers = Router::new()
        .route("/", post(register_tournament))
        .route("/", get(show_tournament_list))
        .route("/:tournament_id", get(show_tournament))
        .route("/:tournament_id", put(update_tournament))
        .route("/:tournament_id", delete(delete_tournament));

    Router::new().nest("/tournaments", tournament_routers)
}
