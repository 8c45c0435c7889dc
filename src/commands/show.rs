use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ShowArgs;
use crate::extract::{TextExtractor, display_name};
use crate::outline::OutlineParser;
use crate::util::to_json_pretty;

pub fn run(args: ShowArgs) -> Result<()> {
    let parser = OutlineParser::new(args.outline.options())?;
    let extractor = args.outline.extractor();
    let file = display_name(&args.pdf_path);

    let raw = extractor.extract_text(&args.pdf_path)?;
    let document = parser.parse_text(&file, &raw)?;
    info!(
        file = %file,
        title = %document.title,
        headings = document.outline.len(),
        "outline recovered"
    );

    let data = to_json_pretty(&document)
        .with_context(|| format!("failed to serialize outline for {file}"))?;
    io::stdout()
        .lock()
        .write_all(&data)
        .context("failed to write outline to stdout")?;

    Ok(())
}
