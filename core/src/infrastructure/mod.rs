pub mod detection;
pub mod llm;
pub mod recipe;
