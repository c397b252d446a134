pub mod gemini_client;

pub use gemini_client::GeminiIngredientDetector;
