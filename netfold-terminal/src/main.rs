/// Netfold Terminal - Interactive unfold/fold animations in ASCII
///
/// Controls:
///   - U/F: Unfold / fold the shape
///   - I: Toggle info labels (resting shape only)
///   - +/-: Grow / shrink the shape
///   - Z/X: Zoom, 0: Reset view
///   - N/P: Next / previous shape
///   - Q/ESC: Quit

use clap::Parser;
use std::io;

#[derive(Parser)]
#[command(name = "netfold-terminal")]
#[command(about = "Unfold geometric solids into their nets, in your terminal")]
struct Args {
    /// Shape descriptor, e.g. "cone r=1 h=2", "pyramid s=1 h=3", "cube a=1"
    #[arg(short, long, default_value = "cube a=1")]
    shape: String,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let shape = netfold_core::parse_shape(&args.shape)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

    let mut app = netfold_terminal::TerminalApp::new(shape)?;
    app.run()
}
