pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod openai;
pub mod traits;

pub use config::OpenAIConfig;
pub use error::{ImageGenError, OperationKind, Result};
pub use models::*;
pub use openai::{ImageClient, OpenAIClient};
pub use traits::ImageGenerator;
