//! `tg completions`: shell completion scripts.

use std::io::{self, Write};

use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `tg completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate the completion script for `args.shell` on stdout.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(args.shell, command, &mut out);
    out.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    generate(shell, command, "tg", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_names_the_binary_and_subcommands() {
        let mut command = clap::Command::new("tg")
            .subcommand(clap::Command::new("order"))
            .subcommand(clap::Command::new("cycles"));
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut command, &mut out);

        let script = String::from_utf8(out).expect("utf8");
        assert!(script.contains("_tg"));
        assert!(script.contains("order"));
        assert!(script.contains("cycles"));
    }
}
