use crate::args::DataInput;
use crate::qr::{self, Level};
use crate::tool::{Output, Tool};
use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "preview", about = "Print a QR code to the terminal")]
pub struct PreviewTool {
    /// The text or URL to encode, or - to read it from stdin
    data: DataInput,

    /// Error correction level
    #[arg(long = "ec", value_enum, default_value_t = Level::Medium)]
    level: Level,

    /// Leave out the quiet zone around the symbol
    #[arg(long)]
    no_quiet_zone: bool,
}

impl Tool for PreviewTool {
    fn cli() -> Command {
        PreviewTool::command()
    }

    fn execute(&self) -> Result<Option<Output>> {
        let mut text = qr::render_text(self.data.as_ref(), self.level, !self.no_quiet_zone)
            .inspect_err(|err| tracing::error!("preview failed: {err}"))
            .context("Failed to render QR code")?;
        text.push('\n');

        Ok(Some(Output::Text(text)))
    }
}
