use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    program::{
        delete_program, register_program, show_program, show_program_list, update_program,
    },
    registration::show_program_registrations,
};

pub fn build_program_routers() -> Router<AppRegistry> {
    let program_routers = Router::new()
        .route("/", post(register_program))
        .route("/", get(show_program_list))
        .route("/:program_id", get(show_program))
        .route("/:program_id", put(update_program))
        .route("/:program_id", delete(delete_program))
        .route(
            "/:program_id/registrations",
            get(show_program_registrations),
        );

    Router::new().nest("/programs", program_routers)
}
