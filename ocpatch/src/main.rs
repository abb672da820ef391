mod application;
mod logging;
mod options;
mod run;

use std::io::IsTerminal as _;

use anyhow::Result;
use clap::{ColorChoice, CommandFactory as _, Parser, Subcommand};
use options::Options;

fn main() {
    let args = Args::parse();
    application::handle_result(run_args(args));
}

fn run_args(args: Args) -> Result<()> {
    match &args.command {
        Commands::Run(subargs) => {
            logging::set_up(logging::Options {
                verbose: args.options.verbose,
                color: use_color(args.options.color),
            })?;
            run::run(subargs)
        }
        Commands::GenerateMan => (|| {
            let cmd = Args::command();
            let man = clap_mangen::Man::new(cmd);
            let mut buffer: Vec<u8> = Default::default();
            man.render(&mut buffer)?;
            println!("{}", String::from_utf8(buffer)?);
            Ok(())
        })(),
        Commands::GenerateMarkdown => {
            let opts = clap_markdown::MarkdownOptions::new().show_footer(false);
            let markdown: String = clap_markdown::help_markdown_custom::<Args>(&opts);
            println!("{}", markdown);
            Ok(())
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(*shell, &mut cmd, "ocpatch", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    }
}

/// Patch OpenShift API objects idempotently
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply one operation to an object and report the outcome as JSON
    #[command()]
    Run(run::Args),

    /// Generate markdown documentation for ocpatch
    #[command(hide = true)]
    GenerateMarkdown,

    /// Generate a manpage for ocpatch
    #[command(hide = true)]
    GenerateMan,

    /// Generate shell completion for ocpatch
    #[command(hide = true)]
    GenerateCompletion {
        /// The shell to generate completion for
        #[arg(long)]
        shell: clap_complete::Shell,
    },
}
