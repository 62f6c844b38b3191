use axum::{routing::put, Router};
use registry::AppRegistry;

use crate::handler::admin::close_all_registrations;

pub fn build_admin_routers() -> Router<AppRegistry> {
    let admin_routers = Router::new().route("/registrations/close", put(close_all_registrations));

    Router::new().nest("/admin", admin_routers)
}
