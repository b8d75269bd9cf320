use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use arff_cli::archive::{save_archive, save_files};
use arff_cli::pipeline::{ErrorPayload, PipelineError, SplitOutcome, Upload, process_upload};
use arff_codec::Declaration;
use arff_ingest::{TextEncoding, load_relation};
use arff_model::AttributeType;

use crate::cli::{ErrorFormatArg, InspectArgs, SplitArgs};

/// What `inspect` found in a file.
pub struct Inspection {
    pub relation: String,
    pub encoding: TextEncoding,
    pub rows: usize,
    /// `(line, name, type)` in declaration order.
    pub attributes: Vec<(usize, String, String)>,
    /// `(line, reason)` for every skipped data row.
    pub dropped: Vec<(usize, String)>,
    pub preview: DataFrame,
}

pub fn run_split(args: &SplitArgs) -> Result<(SplitOutcome, String)> {
    let span = info_span!("split", input = %input_label(args.input.as_deref()));
    let _guard = span.enter();

    let bytes = read_input(args.input.as_deref())?;
    let mut upload = Upload::new(bytes)
        .with_seed(args.seed)
        .with_shuffle(!args.no_shuffle);
    if let Some(column) = &args.stratify {
        upload = upload.with_stratify(column.as_str());
    }
    let outcome = process_upload(&upload)?;

    let destination = match &args.out_dir {
        Some(dir) => {
            save_files(&outcome.bundle, dir).context("write split files")?;
            dir.display().to_string()
        }
        None => {
            save_archive(&outcome.bundle, &args.output).context("write split archive")?;
            args.output.display().to_string()
        }
    };
    info!(destination = %destination, "split complete");
    Ok((outcome, destination))
}

pub fn run_inspect(args: &InspectArgs) -> Result<Inspection> {
    let bytes = read_input(args.input.as_deref())?;
    let loaded = load_relation(&bytes).context("decode ARFF input")?;

    let attributes = describe_declarations(&loaded.declarations);
    let dropped = loaded
        .dropped_rows
        .iter()
        .map(|row| (row.line, row.reason.clone()))
        .collect();
    let relation = loaded.relation.name.clone();
    let rows = loaded.relation.rows.len();
    let preview = loaded
        .relation
        .into_dataset()
        .to_dataframe()
        .context("build preview frame")?
        .head(Some(args.rows));

    Ok(Inspection {
        relation,
        encoding: loaded.encoding,
        rows,
        attributes,
        dropped,
        preview,
    })
}

/// Render a failure for stderr in the requested format.
pub fn format_error(error: &anyhow::Error, format: ErrorFormatArg) -> String {
    match format {
        ErrorFormatArg::Text => format!("error: {error:#}"),
        ErrorFormatArg::Json => {
            let payload = match error.downcast_ref::<PipelineError>() {
                Some(pipeline) => pipeline.payload(),
                None => ErrorPayload {
                    error: error.to_string(),
                    detail: format!("{error:#}"),
                },
            };
            serde_json::to_string(&payload).unwrap_or_else(|_| format!("error: {error:#}"))
        }
    }
}

fn describe_declarations(declarations: &[Declaration]) -> Vec<(usize, String, String)> {
    declarations
        .iter()
        .map(|declaration| {
            let kind = match &declaration.kind {
                Some(kind) => describe_type(kind),
                None => "numeric (untyped)".to_string(),
            };
            (declaration.line, declaration.name.clone(), kind)
        })
        .collect()
}

fn describe_type(kind: &AttributeType) -> String {
    match kind {
        AttributeType::Nominal(values) => format!("nominal ({} values)", values.len()),
        AttributeType::Date(Some(format)) => format!("date '{format}'"),
        other => other.label().to_string(),
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("read {}", path.display()))
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("read stdin")?;
            Ok(bytes)
        }
    }
}

fn input_label(path: Option<&Path>) -> String {
    path.map_or_else(|| PathBuf::from("-"), Path::to_path_buf)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_keep_lines_and_flag_untyped() {
        let decoded = arff_codec::decode(
            "@relation r\n\n@attribute a\n@attribute b {x,y}\n@attribute c date 'yyyy'\n@data\n",
        )
        .unwrap();
        assert_eq!(
            describe_declarations(&decoded.declarations),
            vec![
                (3, "a".to_string(), "numeric (untyped)".to_string()),
                (4, "b".to_string(), "nominal (2 values)".to_string()),
                (5, "c".to_string(), "date 'yyyy'".to_string()),
            ]
        );
    }
}
