//! ArchiMate CLI library
//!
//! This module contains the core CLI logic for the ArchiMate model tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, io::Write};

use log::info;

use archimate::{ArchimateError, ArchimateModel, config::AppConfig};

/// Run the ArchiMate CLI application
///
/// Reports of `inspect` are written to `out`; the other commands write
/// documents to their output paths.
///
/// # Errors
///
/// Returns `ArchimateError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or non-ArchiMate input documents
/// - Unknown element ids passed to `generate-view`
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), ArchimateError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Inspect { input } => {
            let model = load_model(input, app_config)?;
            writeln!(out, "{}", model.summary())?;
            for view in model.list_views() {
                writeln!(
                    out,
                    "  {} ({} objects) [{}]",
                    view.name,
                    view.diagram_objects().len(),
                    view.id
                )?;
            }
        }
        Command::Roundtrip { input, output } => {
            let model = load_model(input, app_config)?;
            model.save_file(output)?;
            info!(output_path = output; "Model written");
        }
        Command::GenerateView {
            input,
            name,
            elements,
            layout,
            no_relationships,
            output,
        } => {
            let mut model = load_model(input, app_config)?;

            let mut options = model.generate_options();
            if let Some(layout) = layout {
                options.layout = *layout;
            }
            if *no_relationships {
                options.include_relationships = false;
            }

            let element_ids: Vec<&str> = elements.iter().map(String::as_str).collect();
            let view = model.generate_view_from_elements(name, &element_ids, options)?;

            let output = output.as_deref().unwrap_or(input);
            model.save_file(output)?;
            info!(view_id = view.id, output_path = output; "View generated");
        }
    }

    Ok(())
}

fn load_model(input: &str, config: AppConfig) -> Result<ArchimateModel, ArchimateError> {
    info!(input_path = input; "Loading model");
    let source = fs::read_to_string(input)?;
    ArchimateModel::from_document(&source, config)
}
