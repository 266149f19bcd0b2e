use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use logveil::batch::source::Source;
use logveil::batch::{BatchProcessor, Direction};
use logveil::codec::message;
use logveil::config;
use logveil::crypto;
use logveil::crypto::Block;
use logveil::output::{OutputError, OutputSink, OverwritePolicy};

/// Decrypt obfuscated chat messages embedded in Justlog/Rustlog lines
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Password the encryption key is derived from
    #[arg(short, long)]
    password: Option<String>,

    /// TOML config file (command-line flags take precedence)
    #[arg(short, long)]
    config: Option<String>,

    /// Append output to this file instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to do when the output file already exists (prompts if not given)
    #[arg(long, value_enum)]
    on_conflict: Option<OverwritePolicy>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Enter cipher text one message at a time; `exit` ends the loop
    Singleline,

    /// Decrypt whole batches of Justlog/Rustlog lines
    Multiline {
        /// Input file that contains the cipher text
        #[arg(long, conflicts_with_all = ["url", "paste"])]
        file: Option<PathBuf>,

        /// URL pointing to remote plaintext that contains the cipher text
        #[arg(long, conflicts_with = "paste")]
        url: Option<String>,

        /// Paste multiple lines into the terminal; an empty line stops input (default)
        #[arg(long)]
        paste: bool,
    },
}

fn main() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_writer(io::stderr)
            .finish(),
    )
    .unwrap();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match config::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("failed to load config: {}", e);
                process::exit(1);
            }
        },
        None => config::Config::default(),
    };

    let Some(password) = args.password.or(config.password) else {
        tracing::error!("no password given, pass --password or set it in the config file");
        process::exit(1);
    };
    let block = crypto::new_block(&password);

    // the conflict is settled here, before any line is read
    let output_path = args.output.or(config.output.path);
    let on_conflict = args.on_conflict.or(config.output.on_conflict);
    let mut sink = match output_path {
        Some(path) => match OutputSink::file(&path, on_conflict) {
            Ok(sink) => sink,
            Err(OutputError::Aborted) => process::exit(0),
            Err(e) => {
                tracing::error!("{}", e);
                process::exit(1);
            }
        },
        None => OutputSink::console(),
    };

    match args.mode {
        Mode::Singleline => run_singleline(block.as_ref(), &mut sink),
        Mode::Multiline { file, url, .. } => {
            let source = match (file, url) {
                (Some(path), _) => Source::File(path),
                (None, Some(url)) => Source::Url(url),
                (None, None) => Source::Paste,
            };
            run_multiline(block, source, &mut sink);
        }
    }
}

fn run_singleline(block: &dyn Block, sink: &mut OutputSink) {
    loop {
        print!("Enter cipher text: ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::error!("failed to read input: {}", e);
                process::exit(1);
            }
        }

        let input = input.trim_end_matches(['\r', '\n']);
        if input == "exit" {
            break;
        }

        match message::open(input, block) {
            Ok(plaintext) => {
                if let Err(e) = sink.write_line(&plaintext) {
                    tracing::error!("failed to write output: {}", e);
                    process::exit(1);
                }
            }
            Err(e) => println!("failed to decrypt message: {}", e),
        }
    }
}

fn run_multiline(block: Box<dyn Block>, source: Source, sink: &mut OutputSink) {
    let reader = match source.open() {
        Ok(reader) => reader,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(e.exit_code());
        }
    };

    let processor = BatchProcessor::new(block, Direction::Decrypt);
    if let Err(e) = processor.run(reader, sink) {
        tracing::error!("batch failed: {}", e);
        process::exit(1);
    }
}
