use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    add_user, change_password, change_role, delete_user, list_users, show_current_user,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/", get(list_users))
        .route("/", post(add_user))
        .route("/me", get(show_current_user))
        .route("/me/password", put(change_password))
        .route("/:user_id", delete(delete_user))
        .route("/:user_id/role", put(change_role));

    Router::new().nest("/users", user_routers)
}
