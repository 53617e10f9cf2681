//! CLI logic for the Maquette type-model tool.
//!
//! This module contains the core CLI logic for the Maquette type-model tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, path::Path};

use log::info;

use maquette::{Maquette, MaquetteError, provider::SchemaProvider};

/// Run the Maquette CLI application
///
/// This function dispatches to the selected subcommand: building the
/// type model from a schema and writing its documents, or round-tripping
/// an existing document through the codec.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MaquetteError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Schema parsing errors
/// - Document encoding or decoding errors
pub fn run(args: &Args) -> Result<(), MaquetteError> {
    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let engine = Maquette::new(app_config);

    match &args.command {
        Command::Generate { schema, out } => generate(&engine, schema, out),
        Command::Roundtrip { input, out } => roundtrip(&engine, input, out.as_deref()),
    }
}

/// Build the model for every type in the schema and write one document
/// per root package.
fn generate(engine: &Maquette, schema: &str, out: &str) -> Result<(), MaquetteError> {
    info!(schema_path = schema, out_dir = out; "Generating model documents");

    let provider = SchemaProvider::from_path(schema)?;
    let roots = engine.build_model(&provider, provider.names())?;

    for root in &roots {
        let path = engine.write_xml(root, Path::new(out))?;
        println!("{}", path.display());
    }

    info!(documents = roots.len(); "Model documents written");
    Ok(())
}

/// Decode a document and re-encode it in canonical form.
fn roundtrip(engine: &Maquette, input: &str, out: Option<&str>) -> Result<(), MaquetteError> {
    info!(input_path = input; "Round-tripping document");

    let root = engine.read_xml(Path::new(input))?;
    let xml = engine.encode_xml(&root);

    match out {
        Some(path) => {
            fs::write(path, &xml)?;
            info!(output_file = path; "Document re-encoded");
        }
        None => print!("{xml}"),
    }

    Ok(())
}
