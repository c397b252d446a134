pub mod capture_image;
pub mod create_session;
pub mod delete_session;
pub mod detect_session_ingredients;
pub mod get_session;
pub mod search_session_recipes;
pub mod toggle_ingredient;
