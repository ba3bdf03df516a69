//! shareon - render share buttons into static HTML

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shareon::dom::HtmlDocument;
use shareon::{BindOptions, DEFAULT_MARKER, MetaField, Network, PageDefaults, ShareMetadata, bind};

#[derive(Parser)]
#[command(name = "shareon")]
#[command(version, about = "Share buttons for static HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    shareon render post.html --url https://example.com/post -o out.html
    shareon link twitter --url https://example.com --title 'Hello' --via me
    shareon networks")]
struct Cli {
    /// Log each binding (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bind share buttons in an HTML file
    Render {
        /// Input HTML file ("-" for stdin)
        #[arg(value_name = "INPUT")]
        input: String,

        /// Public URL of the page
        #[arg(long)]
        url: String,

        /// Page title (defaults to the document's <title>)
        #[arg(long)]
        title: Option<String>,

        /// Class marking share containers
        #[arg(long, default_value = DEFAULT_MARKER)]
        marker: String,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Write a JSON report of the bindings instead of HTML
        #[arg(long)]
        report: bool,
    },

    /// Print the share URL for one network
    Link {
        /// Network identifier, e.g. twitter
        network: Network,

        #[arg(long)]
        url: String,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long)]
        media: Option<String>,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        via: Option<String>,

        #[arg(long)]
        fb_app_id: Option<String>,
    },

    /// List supported networks
    Networks,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> shareon::Result<()> {
    match command {
        Command::Render {
            input,
            url,
            title,
            marker,
            output,
            report,
        } => render(&input, url, title, marker, output, report),
        Command::Link {
            network,
            url,
            title,
            media,
            text,
            via,
            fb_app_id,
        } => {
            let mut meta = ShareMetadata::encoded(&url, &title);
            for (field, value) in [
                (MetaField::Media, media),
                (MetaField::Text, text),
                (MetaField::Via, via),
                (MetaField::FbAppId, fb_app_id),
            ] {
                if let Some(value) = value {
                    meta = meta.with(field, &value);
                }
            }
            println!("{}", network.build(&meta));
            Ok(())
        }
        Command::Networks => {
            for network in Network::ALL {
                println!("{:<14} {}", network.id(), network.endpoint());
            }
            Ok(())
        }
    }
}

fn render(
    input: &str,
    url: String,
    title: Option<String>,
    marker: String,
    output: Option<PathBuf>,
    report: bool,
) -> shareon::Result<()> {
    let bytes = if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input)?
    };

    let mut doc = HtmlDocument::from_bytes(&bytes, url.clone());
    let mut options = BindOptions::new().with_marker(marker);
    if let Some(title) = title {
        options = options.with_defaults(PageDefaults::new(url, title));
    }

    let result = bind(&mut doc, &options);
    tracing::info!(
        input,
        containers = result.containers,
        bound = result.bindings.len(),
        skipped = result.skipped,
        "rendered"
    );

    let rendered = if report {
        serde_json::to_string_pretty(&result)?
    } else {
        doc.to_html()
    };

    match output {
        Some(path) => fs::write(path, rendered)?,
        None => io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}
