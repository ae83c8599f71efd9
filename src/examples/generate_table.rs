use mann_whitney_exact::store::generate_tables;
use mann_whitney_exact::{GeneratorConfig, Result};
use tracing::info;

pub fn generate_table(config: &GeneratorConfig) -> Result<()> {
    info!(
        min_size = config.min_size,
        max_size = config.max_size,
        output = %config.output.display(),
        "generating Mann-Whitney tables"
    );
    let store = generate_tables(config)?;
    store.save(&config.output)
}
