// Represents a tool under qrgen.
pub trait Tool {
    // The contribution of this tool to the qrgen CLI. The clap::Command
    // returned here will be set up as a subcommand on the qrgen binary.
    fn cli() -> clap::Command;

    // Run the tool. All the context that the tool requires should be
    // using the cli above.
    fn execute(&self) -> anyhow::Result<Option<Output>>;
}

#[derive(Debug)]
pub enum Output {
    Text(String),
}
