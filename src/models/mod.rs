/// Bidirectional LSTM language model
use candle_core::{Result, Tensor};
use candle_nn::{Dropout, VarBuilder};

use crate::config::LmConfig;
use crate::layers::{BiLstm, RecurrentState, TokenEmbedding, VocabProjection};

/// The full model: embedding -> BiLSTM -> dropout -> vocab projection
pub struct LanguageModel {
    config: LmConfig,

    embedding: TokenEmbedding,
    encoder: BiLstm,
    dropout: Dropout,
    projection: VocabProjection,
}

impl LanguageModel {
    /// Create new LanguageModel
    pub fn new(config: LmConfig, vb: VarBuilder) -> crate::Result<Self> {
        config.validate()?;

        let dtype = vb.dtype();

        let embedding = TokenEmbedding::new(
            config.vocab_size,
            config.embedding_dim,
            vb.pp("embedding"),
            dtype,
        )?;

        let encoder = BiLstm::new(
            config.embedding_dim,
            config.hidden_size,
            config.num_layers,
            vb.pp("lstm"),
        )?;

        let dropout = Dropout::new(config.dropout);

        // Both directions feed the head, hence the doubled input width.
        let projection = VocabProjection::new(
            config.encoder_output_size(),
            config.output_size,
            true,
            vb.pp("output"),
        )?;

        log::debug!(
            "built language model: vocab={} embed={} hidden={} layers={} out={}",
            config.vocab_size,
            config.embedding_dim,
            config.hidden_size,
            config.num_layers,
            config.output_size
        );

        Ok(Self {
            config,
            embedding,
            encoder,
            dropout,
            projection,
        })
    }

    /// Model configuration
    pub fn config(&self) -> &LmConfig {
        &self.config
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `tokens` - Integer token IDs [batch, seq_len]
    /// * `state` - Optional prior (hidden, cell) state; `None` starts from zeros
    /// * `train` - Whether dropout is active
    ///
    /// # Returns
    /// Tuple of (logits, new_state)
    /// - logits: [batch, seq_len, output_size]
    /// - new_state: final encoder state, h and c each
    ///   [2 * num_layers, batch, hidden_size]
    pub fn forward(
        &self,
        tokens: &Tensor,
        state: Option<&RecurrentState>,
        train: bool,
    ) -> Result<(Tensor, RecurrentState)> {
        let embedded = self.embedding.forward(tokens)?;
        let (encoded, new_state) = self.encoder.forward(&embedded, state)?;
        let regularized = self.dropout.forward(&encoded, train)?;
        let logits = self.projection.forward(&regularized)?;
        Ok((logits, new_state))
    }
}
