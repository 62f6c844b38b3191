use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::auth::{login, register};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let auth_routers = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    Router::new().nest("/auth", auth_routers)
}
