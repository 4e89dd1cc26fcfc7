use anyhow::Context;
use kih_config::KihConfig;

/// Load `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<KihConfig> {
    load_dotenv()?;
    KihConfig::load().context("failed to load configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    for dir in cwd.ancestors() {
        let env_path = dir.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
        // Stop at the project boundary.
        if dir.join(".kih").is_dir() {
            break;
        }
    }

    Ok(())
}
