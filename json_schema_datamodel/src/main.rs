//! Binary to generate a Rust data model from a JSON Schema.
//!
//! Usage: `jsonschemadm --namespace Acme --root-class Order --schema order.json --hints hints.json`
//!
//! Reads the schema from `--schema` (or stdin), writes one file per type into
//! `--output-directory`, or prints everything to stdout with `--stdout`.
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::io::{read_to_string, stdin, stdout};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use json_schema_datamodel::{
    DEFAULT_OUTPUT_DIRECTORY, DataModelGeneratorSettings, GenerationError, ModelSet,
    generate_from_text, generate_to_directory, render_to_writer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jsonschemadm", version, about = "Generate a Rust data model from a JSON Schema")]
struct Cli {
    /// JSON Schema file. Read from stdin when omitted.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Hint dictionary (JSON) customizing generated names and enums.
    #[arg(long)]
    hints: Option<PathBuf>,

    /// Namespace recorded on every generated type.
    #[arg(long)]
    namespace: String,

    /// Name of the class generated from the root schema.
    #[arg(long)]
    root_class: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIRECTORY)]
    output_directory: PathBuf,

    /// Replace files that already exist in the output directory.
    #[arg(long)]
    force: bool,

    /// Emit explicit structural equality and hash implementations.
    #[arg(long)]
    generate_overrides: bool,

    /// Fail if the schema uses keywords outside the supported subset.
    #[arg(long)]
    deny_unsupported: bool,

    /// Print the rendered files to stdout instead of writing them.
    #[arg(long)]
    stdout: bool,
}

impl Cli {
    fn settings(&self) -> DataModelGeneratorSettings {
        DataModelGeneratorSettings {
            output_directory: self.output_directory.clone(),
            force_overwrite: self.force,
            namespace_name: self.namespace.clone(),
            root_class_name: self.root_class.clone(),
            generate_overrides: self.generate_overrides,
            deny_unsupported_keywords: self.deny_unsupported,
        }
    }
}

fn run(cli: &Cli) -> Result<(), GenerationError> {
    let schema_json: String = match cli.schema {
        Some(ref path) => std::fs::read_to_string(path)?,
        None => read_to_string(stdin())?,
    };
    let hints_json: Option<String> = cli
        .hints
        .as_ref()
        .map(std::fs::read_to_string)
        .transpose()?;
    let settings: DataModelGeneratorSettings = cli.settings();

    if cli.stdout {
        let models: ModelSet = generate_from_text(&schema_json, hints_json.as_deref(), &settings)?;
        render_to_writer(&models, &settings, &mut stdout())
    } else {
        let written: Vec<PathBuf> =
            generate_to_directory(&schema_json, hints_json.as_deref(), &settings)?;
        for path in written {
            eprintln!("wrote {}", path.display());
        }
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli: Cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
