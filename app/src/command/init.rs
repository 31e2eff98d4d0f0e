use lexicon_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates the template configuration at `~/lexicon/config.json`.
///
/// # Design
/// - Never overwrites: an existing file is reported as an error
/// - Stateless: no internal state, simplest form of strategy
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        Config::create_config()?;
        Ok(())
    }
}
