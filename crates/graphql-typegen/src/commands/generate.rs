use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::ConfigArgs;
use crate::output_utils;

/// Generates TypeScript declarations and updates resolver modules.
#[derive(Debug, clap::Args)]
pub(crate) struct GenerateCmd {
    #[command(flatten)]
    config: ConfigArgs,
}

#[inherent::inherent]
impl RunnableCommand for GenerateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let config = match self.config.load().await {
            Ok(config) => config,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        };

        match libgraphql_typegen::generate(&config, false).await {
            Ok(summary) => CommandResult::stdout(format_args!(
                concat!(
                    "{} Generation completed successfully:\n",
                    "  * Wrote {} generated files.\n",
                    "  * Updated {} resolver modules.",
                ),
                output_utils::GREEN_CHECK,
                summary.written_files.len(),
                summary.merged_resolver_modules.len(),
            )),

            Err(e) => CommandResult::stderr(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        }
    }
}
