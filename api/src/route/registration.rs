use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::registration::{
    cancel_registration, create_registration, show_my_registrations,
};

pub fn build_registration_routers() -> Router<AppRegistry> {
    let registration_routers = Router::new()
        .route("/", post(create_registration))
        .route("/me", get(show_my_registrations))
        .route("/:registration_id", delete(cancel_registration));

    Router::new().nest("/registrations", registration_routers)
}
