/// Strategy for displaying version information.
///
/// Prints the current version of the lexicon binary.
///
/// # Design
/// - Offline: reads neither configuration nor credentials
/// - Stateless: no internal state
#[derive(Debug, Clone, Copy)]
pub struct VersionStrategy;

impl super::CommandStrategy for VersionStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        println!("lexicon {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
