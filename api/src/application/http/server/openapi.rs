use crate::application::http::{
    detection::router::DetectionApiDoc, health::__path_health,
    ingredient::router::IngredientApiDoc, recipe::router::RecipeApiDoc,
    session::router::SessionApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FridgeChef API"
    ),
    paths(health),
    nest(
        (path = "/ingredients", api = IngredientApiDoc),
        (path = "/recipes", api = RecipeApiDoc),
        (path = "/detect", api = DetectionApiDoc),
        (path = "/sessions", api = SessionApiDoc),
    )
)]
pub struct ApiDoc;
