/// Configuration for the bidirectional LSTM language model
///
/// The five size scalars fully determine every parameter shape in the
/// model; dropout only affects the forward pass in train mode.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LmConfig {
    /// Number of entries in the embedding table
    pub vocab_size: usize,

    /// Width of each embedding vector
    pub embedding_dim: usize,

    /// Hidden width of each LSTM cell (per direction)
    pub hidden_size: usize,

    /// Number of stacked bidirectional layers
    pub num_layers: usize,

    /// Dropout probability applied to the encoder output
    pub dropout: f32,

    /// Width of the output logits
    pub output_size: usize,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            vocab_size: 10_000,
            embedding_dim: 256,
            hidden_size: 512,
            num_layers: 2,
            dropout: 0.3,
            output_size: 10_000,
        }
    }
}

impl LmConfig {
    /// Validate configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.vocab_size == 0 {
            return Err(crate::LmError::Config(
                "vocab_size must be > 0".to_string(),
            ));
        }

        if self.embedding_dim == 0 || self.hidden_size == 0 {
            return Err(crate::LmError::Config(
                "embedding_dim and hidden_size must be > 0".to_string(),
            ));
        }

        if self.num_layers == 0 {
            return Err(crate::LmError::Config(
                "num_layers must be > 0".to_string(),
            ));
        }

        if self.output_size == 0 {
            return Err(crate::LmError::Config(
                "output_size must be > 0".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.dropout) {
            return Err(crate::LmError::Config(format!(
                "dropout must be in [0, 1), got {}",
                self.dropout
            )));
        }

        Ok(())
    }

    /// Leading dimension of the hidden/cell state tensors
    ///
    /// One channel per (layer, direction) pair.
    pub fn state_channels(&self) -> usize {
        2 * self.num_layers
    }

    /// Per-timestep width of the encoder output (both directions concatenated)
    pub fn encoder_output_size(&self) -> usize {
        2 * self.hidden_size
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a JSON string
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
