mod dispatcher;
mod serde_api;
mod transport;
mod types;

pub use dispatcher::{GENERATE_OPERATION, GeminiDispatcher};
pub use transport::{GeminiHttpTransport, GeminiTransport};
pub use types::{
    GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiPart, GeminiRequest, GeminiResponse,
};
