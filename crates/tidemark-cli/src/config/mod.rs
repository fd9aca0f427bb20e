use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub run: RunConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub costs: CostsConfig,
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub run_id: String,
    pub symbol: String,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
}

#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    pub prices_csv: String,
    pub out_dir: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CostsConfig {
    /// Fractional cost per trade (e.g. 0.001 = 0.1%).
    #[serde(default)]
    pub fee: f64,
}

#[derive(Debug, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    pub fast_span: usize,
    pub slow_span: usize,
}

fn default_initial_capital() -> f64 {
    100_000.0
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    if config.strategies.is_empty() {
        return Err(format!(
            "config {} declares no [[strategies]]",
            path.display()
        ));
    }
    Ok(config)
}
