//! Bidirectional LSTM language model
//!
//! A sequence model composed from candle's standard layer library:
//! token embedding -> stacked bidirectional LSTM -> dropout -> linear
//! projection to vocabulary logits.
//!
//! # Architecture
//!
//! - **Embedding**: lookup table from token IDs to dense vectors
//! - **BiLstm**: multi-layer recurrent encoder, one forward and one
//!   backward cell per layer, outputs concatenated per timestep
//! - **Dropout**: active only when the forward pass runs in train mode
//! - **Projection**: dense head from `2 * hidden_size` to logits
//!
//! # Example
//!
//! ```ignore
//! use recurrent_lm::{LanguageModel, LmConfig};
//!
//! let config = LmConfig::default();
//! let model = LanguageModel::new(config, vb)?;
//! let (logits, state) = model.forward(&tokens, None, false)?;
//! ```

pub mod config;
pub mod layers;
pub mod models;
pub mod utils;

// Re-export commonly used items
pub use config::LmConfig;
pub use layers::recurrent::RecurrentState;
pub use models::LanguageModel;

/// Library error types
#[derive(Debug, thiserror::Error)]
pub enum LmError {
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LmError>;
