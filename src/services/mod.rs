pub mod credential;
pub mod exporter;
pub mod gateway;

pub use credential::CredentialProvider;
pub use exporter::FlashcardExporter;
pub use gateway::{GeminiGateway, GenerateRequest, ModelGateway, MISSING_KEY_WARNING};
