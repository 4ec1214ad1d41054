mod check;
mod generate;

use crate::Cli;
use crate::CommandResult;
use check::CheckCmd;
use generate::GenerateCmd;
use libgraphql_typegen::DEFAULT_CONFIG_FILE_NAME;
use libgraphql_typegen::GeneratorConfig;
use libgraphql_typegen::PipelineError;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-typegen")]
pub(crate) enum CommandEnum {
    Check(Box<CheckCmd>),
    Generate(Box<GenerateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Check(cmd) => cmd.run(cli).await,
            Self::Generate(cmd) => cmd.run(cli).await,
        }
    }
}

#[derive(Debug, clap::Args)]
pub(crate) struct ConfigArgs {
    #[arg(
        default_value=DEFAULT_CONFIG_FILE_NAME,
        help="Path to the generator's TOML configuration file. Relative \
             paths inside it are resolved against its directory.",
        long,
        short='c',
    )]
    config: PathBuf,
}
impl ConfigArgs {
    pub(crate) async fn load(&self) -> Result<GeneratorConfig, PipelineError> {
        log::debug!("Loading configuration from {:?}.", self.config);
        GeneratorConfig::load(&self.config).await
    }
}
