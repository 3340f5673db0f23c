/// Embedding layer with automatic dtype casting
use candle_core::{DType, Module, Result, Tensor};
use candle_nn::{Embedding, VarBuilder};

pub struct TokenEmbedding {
    embedding: Embedding,
    target_dtype: DType,
}

impl TokenEmbedding {
    pub fn new(vocab_size: usize, embedding_dim: usize, vb: VarBuilder, target_dtype: DType) -> Result<Self> {
        let embedding = candle_nn::embedding(vocab_size, embedding_dim, vb)?;
        Ok(Self {
            embedding,
            target_dtype,
        })
    }

    /// Look up embeddings for integer token IDs
    ///
    /// Input is [batch, seq_len]; output is [batch, seq_len, embedding_dim].
    pub fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let output = self.embedding.forward(input)?;
        if output.dtype() != self.target_dtype {
            output.to_dtype(self.target_dtype)
        } else {
            Ok(output)
        }
    }
}
