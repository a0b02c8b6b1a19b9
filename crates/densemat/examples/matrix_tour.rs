use anyhow::Result;
use densemat::matrix::ops;
use densemat::{FillConfig, FillKind, Matrix};

fn main() -> Result<()> {
    env_logger::init();

    // Small weight matrix from a seeded normal fill
    let cfg = FillConfig::new(
        FillKind::Normal {
            std_dev: 0.1,
            mean: 0.0,
        },
        Some(7),
    );
    let weights = cfg.build(3, 2);
    log::info!("weights {:?}:\n{}", weights.shape(), weights);

    let x = Matrix::from_rows(&[[1.0, 0.0, 2.0], [0.5, 1.5, -1.0]])?;
    let y = ops::dot(&x, &weights)?;
    log::info!("x . weights {:?}:\n{}", y.shape(), y);

    let bias = Matrix::ones(2, 1);
    let with_bias = ops::augment(&y, &bias)?;
    log::info!("augmented with bias:\n{}", with_bias);

    let positive = ops::greater(&y, &Matrix::zeros(2, 2));
    log::info!("positive mask:\n{}", positive);

    let bytes = with_bias.to_le_bytes();
    log::info!("exported {} bytes for {} elements", bytes.len(), with_bias.size());

    if let Err(e) = ops::stack(&x, &weights) {
        log::warn!("stack(x, weights) failed as expected: {}", e);
    }

    Ok(())
}
