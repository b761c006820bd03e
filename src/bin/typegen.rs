//! TypeScript Type Generator CLI
//!
//! Converts an OpenAPI document (or a directory of schema files) into
//! dependency-ordered TypeScript type declarations.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use oapi_typegen::{render_all, Context, Converter, TypegenConfig};

#[derive(Parser)]
#[command(name = "typegen")]
#[command(about = "Generate TypeScript type declarations from OpenAPI schemas")]
struct Cli {
    /// OpenAPI document (JSON) or directory of schema files
    input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a typegen.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => TypegenConfig::from_toml_file(path)?,
        None => TypegenConfig::default(),
    };

    let converter = Converter::new(config);
    let context = Context::new();

    let roots = if cli.input.is_dir() {
        converter.convert_directory(&cli.input, &context)?
    } else {
        let document = serde_json::from_str(&fs::read_to_string(&cli.input)?)?;
        converter.convert_document(&document, &context)?
    };

    let mut declarations: Vec<String> = Vec::new();
    render_all(&roots, |_, text| declarations.push(text.to_string()))?;

    let output = declarations.join("\n\n") + "\n";
    match &cli.output {
        Some(path) => {
            fs::write(path, output)?;
            println!(
                "✅ Generated {} type declarations -> {}",
                declarations.len(),
                path.display()
            );
        }
        None => print!("{}", output),
    }

    Ok(())
}
