//! CLI entry point for graft

use std::path::PathBuf;
use std::process;

use clap::Parser;
use graft::{Config, build_manifest, to_json, write_manifest};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graft")]
#[command(about = "Generate a build manifest from source file conventions")]
#[command(version)]
struct Args {
    /// Config file describing the scan and the skeleton tree
    #[arg(default_value = "graft.json")]
    config: PathBuf,

    /// Write the manifest here instead of the config's outputPath
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print the manifest to stdout instead of writing a file
    #[arg(long = "stdout", conflicts_with = "output")]
    stdout: bool,
}

fn main() {
    // Diagnostics go to stderr so --stdout emits nothing but the manifest.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config).unwrap_or_else(|e| {
        eprintln!("graft: {}", e);
        process::exit(1);
    });

    let manifest = build_manifest(&config).unwrap_or_else(|e| {
        eprintln!("graft: {}", e);
        process::exit(1);
    });

    let result = if args.stdout {
        to_json(&manifest).map(|json| print!("{}", json))
    } else {
        let output = args.output.as_ref().unwrap_or(&config.output_path);
        write_manifest(&manifest, output)
    };

    if let Err(e) = result {
        eprintln!("graft: {}", e);
        process::exit(1);
    }
}
