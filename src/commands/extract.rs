use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::cli::ExtractArgs;
use crate::commands::inventory::discover_pdfs;
use crate::error::DocumentError;
use crate::extract::{TextExtractor, display_name, pdftotext_version};
use crate::model::{DocumentOutcome, ExtractRunManifest};
use crate::outline::OutlineParser;
use crate::util::{ensure_directory, now_utc_string, to_json_pretty, write_json_pretty};


pub fn run(args: ExtractArgs) -> Result<()> {
    ensure_directory(&args.output_dir)?;

    let pdfs = discover_pdfs(&args.input_dir)?;
    info!(
        input_dir = %args.input_dir.display(),
        output_dir = %args.output_dir.display(),
        pdf_count = pdfs.len(),
        "starting extract"
    );

    let parser = OutlineParser::new(args.outline.options())?;
    let extractor = args.outline.extractor();

    let report = match args.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("failed to build worker pool")?;
            pool.install(|| process_batch(&pdfs, &args.output_dir, &parser, &extractor))
        }
        None => process_batch(&pdfs, &args.output_dir, &parser, &extractor),
    };

    if let Some(manifest_path) = &args.run_manifest {
        let manifest = ExtractRunManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            input_dir: args.input_dir.display().to_string(),
            output_dir: args.output_dir.display().to_string(),
            pdftotext_version: pdftotext_version(),
            pdf_count: pdfs.len(),
            processed_count: report.processed_count(),
            failed_count: report.failures.len(),
            documents: report.outcomes.clone(),
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote run manifest");
    }

    if !report.failures.is_empty() {
        for failure in &report.failures {
            error!(file = %failure.file(), kind = failure.kind(), "{failure}");
        }
        bail!(
            "{} of {} documents failed",
            report.failures.len(),
            pdfs.len()
        );
    }

    info!(processed = report.processed_count(), "extract completed");
    Ok(())
}

/// Outcome of a whole batch. Outcomes follow input order; completion order
/// across workers is not observable here.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
    pub failures: Vec<DocumentError>,
}

impl BatchReport {
    pub fn processed_count(&self) -> usize {
        self.outcomes.len() - self.failures.len()
    }
}

pub struct WrittenOutline {
    pub output_path: PathBuf,
    pub heading_count: usize,
}

/// Processes every PDF on the current rayon pool. A failing document never
/// stops its siblings. When two inputs map to the same output file (`a.pdf`
/// and `a.PDF`), only the first in input order is processed.
pub fn process_batch<E: TextExtractor>(
    pdfs: &[PathBuf],
    output_dir: &Path,
    parser: &OutlineParser,
    extractor: &E,
) -> BatchReport {
    let collisions = output_collisions(pdfs, output_dir);

    let results: Vec<(String, Result<WrittenOutline, DocumentError>)> = pdfs
        .par_iter()
        .zip(collisions.par_iter())
        .map(|(pdf_path, claimed_by)| {
            let file = display_name(pdf_path);
            let result = match claimed_by {
                Some(owner) => Err(DocumentError::WriteFailed {
                    file: file.clone(),
                    reason: format!(
                        "{} is already written for {}",
                        output_path_for(pdf_path, output_dir).display(),
                        owner
                    ),
                }),
                None => process_document(pdf_path, output_dir, parser, extractor),
            };
            (file, result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (file, result) in results {
        match result {
            Ok(written) => report.outcomes.push(DocumentOutcome {
                file,
                output: Some(written.output_path.display().to_string()),
                status: "processed".to_string(),
                heading_count: written.heading_count,
                error_kind: None,
                error: None,
            }),
            Err(failure) => {
                report.outcomes.push(DocumentOutcome {
                    file,
                    output: None,
                    status: "failed".to_string(),
                    heading_count: 0,
                    error_kind: Some(failure.kind().to_string()),
                    error: Some(failure.to_string()),
                });
                report.failures.push(failure);
            }
        }
    }

    report
}

pub fn process_document<E: TextExtractor + ?Sized>(
    pdf_path: &Path,
    output_dir: &Path,
    parser: &OutlineParser,
    extractor: &E,
) -> Result<WrittenOutline, DocumentError> {
    let file = display_name(pdf_path);
    let output_path = output_path_for(pdf_path, output_dir);

    let raw = extractor.extract_text(pdf_path)?;
    let document = parser.parse_text(&file, &raw)?;

    let data = to_json_pretty(&document).map_err(|error| DocumentError::SerializationFailed {
        file: file.clone(),
        reason: error.to_string(),
    })?;
    fs::write(&output_path, data).map_err(|error| DocumentError::WriteFailed {
        file: file.clone(),
        reason: format!("{}: {}", output_path.display(), error),
    })?;

    info!(
        file = %file,
        output = %output_path.display(),
        title = %document.title,
        headings = document.outline.len(),
        "processed"
    );

    Ok(WrittenOutline {
        output_path,
        heading_count: document.outline.len(),
    })
}

/// For each input, the earlier input that already owns its output path.
fn output_collisions(pdfs: &[PathBuf], output_dir: &Path) -> Vec<Option<String>> {
    let mut owners = HashMap::<PathBuf, String>::new();
    pdfs.iter()
        .map(|pdf_path| {
            let file = display_name(pdf_path);
            match owners.entry(output_path_for(pdf_path, output_dir)) {
                Entry::Occupied(entry) => {
                    warn!(file = %file, owner = %entry.get(), "output file name collision");
                    Some(entry.get().clone())
                }
                Entry::Vacant(entry) => {
                    entry.insert(file);
                    None
                }
            }
        })
        .collect()
}

/// `<output_dir>/<stem>.json`, whatever the case of the `.pdf` extension.
pub fn output_path_for(pdf_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{stem}.json"))
}
