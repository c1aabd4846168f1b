use anyhow::Result;
use tracing::error;

use cohv_mass_convert::orchestrator::App;
use cohv_mass_convert::utils::logging;
use cohv_mass_convert::Config;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    // Optional config file path as first argument, e.g. a per-plant TOML.
    let config_file = std::env::args().nth(1);
    let config = Config::load(config_file.as_deref())?;
    let error_log = config.error_log_file.clone();

    let result = match App::initialize(config).await {
        Ok(app) => app.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        error!("run failed: {e:#}");
        if let Err(log_error) = logging::append_error_log(&error_log, &format!("{e:#}")) {
            error!("could not append to error log: {log_error}");
        }
    }
    result
}
