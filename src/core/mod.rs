pub mod genai;
pub mod live;
