mod args;
mod qr;
#[cfg(test)]
mod testing;
mod tool;
mod tools;

use std::io::{self, Write};

use clap::{Arg, ArgAction, ArgMatches, FromArgMatches};

use crate::tool::{Output, Tool};
use anyhow::{Context, anyhow};

macro_rules! toolbox {
    ($cmd:ident, $setup:expr, $(($tool:path, $name:literal, $($alias:literal),*)),+) => {
        {
            // Register the tools.
            $(
                $cmd = $cmd.subcommand(
                    <$tool>::cli()
                    .name($name)
                    $(.alias($alias))*
                );
            )*

            // Parse args.
            let matches = $cmd.get_matches();
            $setup(&matches);

            let (subcommand_name, subcommand_matches) = matches
                .subcommand()
                .context("Could not determine subcommand")?;

            // Run the specific tool.
            match subcommand_name {
                $(
                    $name => {
                        let output = <$tool>::from_arg_matches(subcommand_matches)
                            .context("Could not initialize the tool")?
                            .execute()
                            .context("Could not execute tool")?;

                        Ok(output)
                    }
                )*
                _ => {
                    Err(anyhow!("Unknown subcommand"))
                }
            }
        }
    };
}

// Logs go to stderr so that stdout only carries tool output.
fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let mut cli = clap::builder::Command::new("qrgen")
        .about("Generate QR codes from text or URLs")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
                .global(true),
        );

    let output = toolbox!(
        cli,
        init_logging,
        (tools::generate::GenerateTool, "generate", "gen"),
        (tools::preview::PreviewTool, "preview",)
    )
    .context("Could not run tool")?;

    match output {
        Some(Output::Text(text)) => {
            io::stdout()
                .write_all(text.as_bytes())
                .context("Could not write to stdout")?;
        }
        None => {}
    }

    Ok(())
}
