/// Smoke test: build the model with default sizes and run one forward pass
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use rand::Rng;
use recurrent_lm::utils::count_parameters;
use recurrent_lm::{LanguageModel, LmConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== Bidirectional LSTM Language Model - Forward Pass ===");

    let device = Device::Cpu;
    log::info!("Using device: {:?}", device);

    // Model with the default sizes
    let config = LmConfig::default();
    log::info!("Model configuration: {:#?}", config);

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let model = LanguageModel::new(config.clone(), vb)?;

    log::info!(
        "Parameters: ~{:.2}M",
        count_parameters(&varmap) as f64 / 1_000_000.0
    );

    // Random input tensor: (batch_size, sequence_length)
    let (batch_size, seq_len) = (32, 10);
    let mut rng = rand::thread_rng();
    let tokens: Vec<u32> = (0..batch_size * seq_len)
        .map(|_| rng.gen_range(0..config.vocab_size as u32))
        .collect();
    let input = Tensor::from_vec(tokens, (batch_size, seq_len), &device)?;

    log::info!("Input shape: {:?}", input.dims());

    // Forward pass (eval mode, fresh zero state)
    let (logits, state) = model.forward(&input, None, false)?;

    log::info!("Output shape: {:?}", logits.dims());
    log::info!("Hidden state shape: {:?}", state.h.dims());
    log::info!("Cell state shape: {:?}", state.c.dims());

    Ok(())
}
