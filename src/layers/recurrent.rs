/// Stacked bidirectional LSTM encoder
///
/// The per-timestep gating math lives entirely in candle's LSTM cell;
/// this module only supplies the stacking, direction handling, and
/// state bookkeeping around it.
use candle_core::{DType, Device, Result, Tensor, D};
use candle_nn::rnn::{Direction, LSTMConfig, LSTMState, LSTM, RNN};
use candle_nn::VarBuilder;

/// Hidden/cell state pair for the full encoder stack
///
/// Both tensors have shape [2 * num_layers, batch, hidden_size], one
/// channel per (layer, direction) pair, ordered
/// [layer0_fwd, layer0_bwd, layer1_fwd, layer1_bwd, ...].
#[derive(Debug, Clone)]
pub struct RecurrentState {
    /// Hidden states: [2 * num_layers, batch, hidden_size]
    pub h: Tensor,
    /// Cell states: [2 * num_layers, batch, hidden_size]
    pub c: Tensor,
}

impl RecurrentState {
    /// Create a state from existing tensors
    pub fn new(h: Tensor, c: Tensor) -> Self {
        Self { h, c }
    }

    /// Create an all-zero state for a batch
    pub fn zeros(
        num_layers: usize,
        batch_size: usize,
        hidden_size: usize,
        dtype: DType,
        device: &Device,
    ) -> Result<Self> {
        let h = Tensor::zeros((2 * num_layers, batch_size, hidden_size), dtype, device)?;
        let c = Tensor::zeros((2 * num_layers, batch_size, hidden_size), dtype, device)?;
        Ok(Self { h, c })
    }
}

/// Stacked bidirectional LSTM
///
/// Each layer runs one forward-direction and one backward-direction
/// cell over the sequence and concatenates their per-timestep outputs,
/// so every layer after the first consumes `2 * hidden_size` features.
pub struct BiLstm {
    layers: Vec<(LSTM, LSTM)>,
    hidden_size: usize,
    num_layers: usize,
}

impl BiLstm {
    /// Create new BiLstm encoder
    ///
    /// # Arguments
    /// * `input_size` - Feature width of the layer-0 input
    /// * `hidden_size` - Hidden width of each cell (per direction)
    /// * `num_layers` - Number of stacked bidirectional layers
    /// * `vb` - VarBuilder for parameter initialization
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
        vb: VarBuilder,
    ) -> Result<Self> {
        let mut layers = Vec::with_capacity(num_layers);
        for layer_idx in 0..num_layers {
            let in_dim = if layer_idx == 0 {
                input_size
            } else {
                2 * hidden_size
            };

            // candle names variables the PyTorch way: weight_ih_l{n}
            // with a _reverse suffix for the backward cell.
            let forward = candle_nn::lstm(
                in_dim,
                hidden_size,
                LSTMConfig {
                    layer_idx,
                    direction: Direction::Forward,
                    ..Default::default()
                },
                vb.clone(),
            )?;

            let backward = candle_nn::lstm(
                in_dim,
                hidden_size,
                LSTMConfig {
                    layer_idx,
                    direction: Direction::Backward,
                    ..Default::default()
                },
                vb.clone(),
            )?;

            layers.push((forward, backward));
        }

        Ok(Self {
            layers,
            hidden_size,
            num_layers,
        })
    }

    /// Run one cell over the sequence in the given direction
    ///
    /// Returns the per-timestep hidden outputs in original time order
    /// plus the cell's final state.
    fn run_direction(
        cell: &LSTM,
        input: &Tensor,
        init: LSTMState,
        reverse: bool,
    ) -> Result<(Tensor, LSTMState)> {
        let seq_len = input.dim(1)?;
        let mut state = init;
        let mut outputs = Vec::with_capacity(seq_len);

        for i in 0..seq_len {
            let t = if reverse { seq_len - 1 - i } else { i };
            let step_input = input.narrow(1, t, 1)?.squeeze(1)?;
            state = cell.step(&step_input, &state)?;
            outputs.push(state.h().clone());
        }

        // Backward outputs are produced last-to-first; restore time order
        // before the directional concat.
        if reverse {
            outputs.reverse();
        }

        let output = Tensor::stack(&outputs, 1)?;
        Ok((output, state))
    }

    /// Forward pass over the full stack
    ///
    /// # Arguments
    /// * `input` - Feature tensor [batch, seq_len, input_size]
    /// * `state` - Optional prior state; `None` means all zeros
    ///
    /// # Returns
    /// Tuple of (output, new_state)
    /// - output: [batch, seq_len, 2 * hidden_size]
    /// - new_state: final (h, c) pair, each [2 * num_layers, batch, hidden_size]
    pub fn forward(
        &self,
        input: &Tensor,
        state: Option<&RecurrentState>,
    ) -> Result<(Tensor, RecurrentState)> {
        let batch_size = input.dim(0)?;

        let zero_state;
        let state = match state {
            Some(state) => state,
            None => {
                zero_state = RecurrentState::zeros(
                    self.num_layers,
                    batch_size,
                    self.hidden_size,
                    input.dtype(),
                    input.device(),
                )?;
                &zero_state
            }
        };

        let mut hidden_states = input.clone();
        let mut final_h = Vec::with_capacity(2 * self.num_layers);
        let mut final_c = Vec::with_capacity(2 * self.num_layers);

        for (layer_idx, (forward, backward)) in self.layers.iter().enumerate() {
            let init_fwd = LSTMState {
                h: state.h.get(2 * layer_idx)?,
                c: state.c.get(2 * layer_idx)?,
            };
            let init_bwd = LSTMState {
                h: state.h.get(2 * layer_idx + 1)?,
                c: state.c.get(2 * layer_idx + 1)?,
            };

            let (out_fwd, last_fwd) =
                Self::run_direction(forward, &hidden_states, init_fwd, false)?;
            let (out_bwd, last_bwd) =
                Self::run_direction(backward, &hidden_states, init_bwd, true)?;

            hidden_states = Tensor::cat(&[&out_fwd, &out_bwd], D::Minus1)?;

            final_h.push(last_fwd.h().clone());
            final_h.push(last_bwd.h().clone());
            final_c.push(last_fwd.c().clone());
            final_c.push(last_bwd.c().clone());
        }

        let new_state = RecurrentState::new(
            Tensor::stack(&final_h, 0)?,
            Tensor::stack(&final_c, 0)?,
        );

        Ok((hidden_states, new_state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_nn::VarMap;

    fn encoder(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
    ) -> Result<BiLstm> {
        let device = Device::Cpu;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        BiLstm::new(input_size, hidden_size, num_layers, vb)
    }

    #[test]
    fn test_recurrent_state_zeros() -> Result<()> {
        let device = Device::Cpu;

        let state = RecurrentState::zeros(2, 4, 32, DType::F32, &device)?;

        assert_eq!(state.h.dims(), &[4, 4, 32]);
        assert_eq!(state.c.dims(), &[4, 4, 32]);

        Ok(())
    }

    #[test]
    fn test_output_and_state_shapes() -> Result<()> {
        let device = Device::Cpu;
        let encoder = encoder(16, 32, 2)?;

        let input = Tensor::randn(0f32, 1.0, (3, 7, 16), &device)?;
        let (output, state) = encoder.forward(&input, None)?;

        assert_eq!(output.dims(), &[3, 7, 64]);
        assert_eq!(state.h.dims(), &[4, 3, 32]);
        assert_eq!(state.c.dims(), &[4, 3, 32]);

        Ok(())
    }

    #[test]
    fn test_single_layer_shapes() -> Result<()> {
        let device = Device::Cpu;
        let encoder = encoder(8, 16, 1)?;

        let input = Tensor::randn(0f32, 1.0, (2, 5, 8), &device)?;
        let (output, state) = encoder.forward(&input, None)?;

        assert_eq!(output.dims(), &[2, 5, 32]);
        assert_eq!(state.h.dims(), &[2, 2, 16]);

        Ok(())
    }

    #[test]
    fn test_none_state_matches_zero_state() -> Result<()> {
        let device = Device::Cpu;
        let encoder = encoder(8, 16, 2)?;

        let input = Tensor::randn(0f32, 1.0, (2, 5, 8), &device)?;
        let zeros = RecurrentState::zeros(2, 2, 16, DType::F32, &device)?;

        let (out_none, _) = encoder.forward(&input, None)?;
        let (out_zeros, _) = encoder.forward(&input, Some(&zeros))?;

        let diff = (out_none - out_zeros)?.abs()?.sum_all()?.to_scalar::<f32>()?;
        assert_eq!(diff, 0.0);

        Ok(())
    }

    #[test]
    fn test_state_feeds_back() -> Result<()> {
        let device = Device::Cpu;
        let encoder = encoder(8, 16, 2)?;

        let input = Tensor::randn(0f32, 1.0, (2, 5, 8), &device)?;
        let (_, state) = encoder.forward(&input, None)?;
        let (output, next_state) = encoder.forward(&input, Some(&state))?;

        assert_eq!(output.dims(), &[2, 5, 32]);
        assert_eq!(next_state.h.dims(), state.h.dims());
        assert_eq!(next_state.c.dims(), state.c.dims());

        Ok(())
    }

    #[test]
    fn test_prior_state_changes_output() -> Result<()> {
        let device = Device::Cpu;
        let encoder = encoder(8, 16, 1)?;

        let input = Tensor::randn(0f32, 1.0, (2, 5, 8), &device)?;
        let ones = RecurrentState::new(
            Tensor::ones((2, 2, 16), DType::F32, &device)?,
            Tensor::ones((2, 2, 16), DType::F32, &device)?,
        );

        let (out_zeros, _) = encoder.forward(&input, None)?;
        let (out_ones, _) = encoder.forward(&input, Some(&ones))?;

        let diff = (out_zeros - out_ones)?.abs()?.sum_all()?.to_scalar::<f32>()?;
        assert!(diff > 0.0);

        Ok(())
    }

    #[test]
    fn test_undersized_state_is_error() -> Result<()> {
        let device = Device::Cpu;
        let encoder = encoder(8, 16, 2)?;

        let input = Tensor::randn(0f32, 1.0, (2, 5, 8), &device)?;
        // Only one layer's worth of channels for a two-layer stack.
        let short = RecurrentState::zeros(1, 2, 16, DType::F32, &device)?;

        assert!(encoder.forward(&input, Some(&short)).is_err());

        Ok(())
    }
}
