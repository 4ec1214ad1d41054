use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::ConfigArgs;
use crate::output_utils;

/// Loads, validates and emits declarations in memory without writing any
/// files.
#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[command(flatten)]
    config: ConfigArgs,
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let config = match self.config.load().await {
            Ok(config) => config,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        };

        match libgraphql_typegen::generate(&config, true).await {
            Ok(_) => CommandResult::stdout(format_args!(
                "{} Schema checked successfully ({} plugins configured).",
                output_utils::GREEN_CHECK,
                config.plugins.len(),
            )),

            Err(e) => CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        }
    }
}
