use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{auth, configuration, setting, user};
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/user", user_routes())
        .nest("/settings", setting_routes())
        .nest("/configurations", configuration_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        user::get_user,
        user::replace_user,
        user::update_user
    ))
}

fn setting_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(setting::list_settings))
}

fn configuration_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            configuration::list_configurations,
            configuration::create_configuration
        ))
        .routes(routes!(
            configuration::get_configuration,
            configuration::replace_configuration,
            configuration::update_configuration,
            configuration::delete_configuration
        ))
        .routes(routes!(configuration::favorite_configuration))
        .routes(routes!(configuration::unfavorite_configuration))
}
