/// Utility functions
use candle_nn::VarMap;

/// Total number of scalar parameters registered in a VarMap
pub fn count_parameters(varmap: &VarMap) -> usize {
    varmap
        .all_vars()
        .iter()
        .map(|var| var.elem_count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};
    use candle_nn::VarBuilder;

    #[test]
    fn test_count_parameters() -> candle_core::Result<()> {
        let device = Device::Cpu;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

        let _weight = vb.get_with_hints(
            (4, 8),
            "weight",
            candle_nn::init::DEFAULT_KAIMING_NORMAL,
        )?;
        let _bias = vb.get_with_hints(4, "bias", candle_nn::Init::Const(0.0))?;

        assert_eq!(count_parameters(&varmap), 36);

        Ok(())
    }
}
