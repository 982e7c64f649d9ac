use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tally::storage::{DEFAULT_DIR, DEFAULT_MAX_AGE};
use tally::{QuotationRenderer, QuotationRequest, QuoteError, TempStore};

/// Render quotation PDFs and clean up the temporary directory.
#[derive(Parser)]
#[command(name = "tally", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a quotation and print the path of the written file.
    Render {
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        zip: String,
        #[arg(long, default_value = DEFAULT_DIR)]
        out: PathBuf,
        /// Write the PDF to standard output instead of the output directory.
        #[arg(long)]
        stdout: bool,
    },
    /// Delete quotation files older than the maximum age.
    Sweep {
        #[arg(long, default_value = DEFAULT_DIR)]
        dir: PathBuf,
        #[arg(long, default_value_t = DEFAULT_MAX_AGE.as_secs())]
        max_age_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            email,
            address,
            zip,
            out,
            stdout,
        } => {
            let renderer = QuotationRenderer::new(TempStore::new(out));
            let request = QuotationRequest::new(email, address, zip);
            if stdout {
                let bytes = renderer.render_to_bytes(&renderer.quotation_for(&request))?;
                let mut handle = std::io::stdout().lock();
                handle.write_all(&bytes)?;
                handle.flush()?;
            } else {
                let path = renderer.render(&request).await?;
                println!("{}", path.display());
            }
        }
        Command::Sweep { dir, max_age_secs } => {
            let store = TempStore::new(dir).with_max_age(Duration::from_secs(max_age_secs));
            println!("{}", store.sweep_expired());
        }
    }
    Ok(())
}
