//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa path, and the collected
//! OpenAPI document is served through Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered in one `routes!` call. All endpoints except
/// `POST /api/auth/login` and the documentation resolve the logged in user from the cookie
/// session and answer 401 without one.
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let state = AppState { db, settings };
/// let router = routes().with_state(state).layer(session_layer);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Larder",
            description = "Recipes, meal planning, shopping lists and freezer inventory"
        ),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Login, logout and password"),
            (name = controller::settings::SETTINGS_TAG, description = "Units, stores and devices"),
            (name = controller::recipe::RECIPE_TAG, description = "Recipes"),
            (name = controller::planning::PLANNING_TAG, description = "Meal plan"),
            (name = controller::shopping::SHOPPING_TAG, description = "Shopping lists"),
            (name = controller::freezer::FREEZER_TAG, description = "Freezer inventory"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::auth::change_password))
        .routes(routes!(controller::settings::get_settings))
        .routes(routes!(controller::settings::update_unit))
        .routes(routes!(controller::settings::add_store))
        .routes(routes!(controller::settings::remove_store))
        .routes(routes!(controller::settings::revoke_device))
        .routes(routes!(
            controller::recipe::list_recipes,
            controller::recipe::create_recipe
        ))
        .routes(routes!(
            controller::recipe::get_recipe,
            controller::recipe::update_recipe,
            controller::recipe::delete_recipe
        ))
        .routes(routes!(controller::planning::get_planning))
        .routes(routes!(controller::planning::assign_slot))
        .routes(routes!(controller::planning::clear_slot))
        .routes(routes!(controller::planning::update_diners))
        .routes(routes!(controller::shopping::preview_shopping_list))
        .routes(routes!(controller::shopping::generate_shopping_list))
        .routes(routes!(controller::shopping::get_latest_shopping_list))
        .routes(routes!(controller::shopping::get_shopping_list))
        .routes(routes!(controller::shopping::set_item_purchased))
        .routes(routes!(controller::shopping::delete_purchased_items))
        .routes(routes!(
            controller::freezer::list_freezers,
            controller::freezer::create_freezer
        ))
        .routes(routes!(
            controller::freezer::update_freezer,
            controller::freezer::delete_freezer
        ))
        .routes(routes!(
            controller::freezer::list_drawers,
            controller::freezer::create_drawer
        ))
        .routes(routes!(
            controller::freezer::update_drawer,
            controller::freezer::delete_drawer
        ))
        .routes(routes!(
            controller::freezer::list_items,
            controller::freezer::create_item
        ))
        .routes(routes!(
            controller::freezer::update_item,
            controller::freezer::delete_item
        ))
        .routes(routes!(controller::freezer::move_item))
        .routes(routes!(controller::freezer::expiring_items))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
