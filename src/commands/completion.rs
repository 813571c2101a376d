use clap::{Args, CommandFactory};
use clap_complete::Shell;

use toolbelt::Result;

#[derive(Args)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

pub fn run(args: CompletionArgs) -> Result<()> {
    let mut cmd = crate::Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "tb", &mut std::io::stdout());
    Ok(())
}
