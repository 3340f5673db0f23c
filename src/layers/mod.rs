/// Neural network layer primitives
///
/// This module contains the building blocks for the language model:
/// - Embeddings (with automatic dtype casting)
/// - Recurrent encoder (stacked bidirectional LSTM)
/// - Output projection (dense head over the vocabulary)

pub mod embeddings;
pub mod projection;
pub mod recurrent;

pub use embeddings::TokenEmbedding;
pub use projection::VocabProjection;
pub use recurrent::{BiLstm, RecurrentState};
