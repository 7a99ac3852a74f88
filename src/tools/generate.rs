use crate::args::DataInput;
use crate::qr::{self, DEFAULT_BORDER, DEFAULT_BOX_SIZE, Level, Request};
use crate::tool::{Output, Tool};
use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser};
use csscolorparser::Color;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate", about = "Generate a QR code image file")]
pub struct GenerateTool {
    /// The text or URL to encode, or - to read it from stdin
    data: DataInput,

    /// Output file path. The image format follows the extension, .png is used when there is none
    #[arg(short, long, default_value = "qrcode.png")]
    output: PathBuf,

    /// Size of each module in pixels
    #[arg(
        long = "box",
        default_value_t = DEFAULT_BOX_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=40),
    )]
    box_size: u32,

    /// Width of the quiet zone around the symbol, in modules
    #[arg(
        long,
        default_value_t = DEFAULT_BORDER,
        value_parser = clap::value_parser!(u32).range(0..=10),
    )]
    border: u32,

    /// Error correction level
    #[arg(long = "ec", value_enum, default_value_t = Level::Medium)]
    level: Level,

    /// Color of the dark modules (any CSS color)
    #[arg(long, default_value = "black")]
    fill: Color,

    /// Color of the background (any CSS color)
    #[arg(long, default_value = "white")]
    back: Color,
}

impl Tool for GenerateTool {
    fn cli() -> Command {
        GenerateTool::command()
    }

    fn execute(&self) -> Result<Option<Output>> {
        let request = Request::new(self.data.as_ref(), &self.output)
            .box_size(self.box_size)
            .border(self.border)
            .level(self.level)
            .fill_color(self.fill.clone())
            .back_color(self.back.clone());

        let saved = qr::generate(&request)
            .inspect_err(|err| tracing::error!("failed to generate QR code: {err}"))
            .context("Failed to generate QR code")?;

        Ok(Some(Output::Text(format!(
            "Saved QR code to: {}\n",
            saved.display()
        ))))
    }
}
