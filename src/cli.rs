use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::extract::Pdftotext;
use crate::outline::OutlineOptions;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-outline",
    version,
    about = "Recover document titles and heading outlines from text-based PDFs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write one outline JSON per PDF in the input directory.
    Extract(ExtractArgs),
    /// Print the outline of a single PDF to stdout.
    Show(ShowArgs),
    /// List the PDFs that `extract` would process.
    Inventory(InventoryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = "/app/input")]
    pub input_dir: PathBuf,

    #[arg(long, default_value = "/app/output")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long)]
    pub run_manifest: Option<PathBuf>,

    #[command(flatten)]
    pub outline: OutlineArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    pub pdf_path: PathBuf,

    #[command(flatten)]
    pub outline: OutlineArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "/app/input")]
    pub input_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    #[arg(long, value_enum, default_value_t = PageNumbering::Zero)]
    pub page_numbering: PageNumbering,

    #[arg(long, value_enum, default_value_t = NoiseThreshold::Literal)]
    pub noise_threshold: NoiseThreshold,

    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long)]
    pub extract_timeout_secs: Option<u64>,
}

impl OutlineArgs {
    pub fn options(&self) -> OutlineOptions {
        OutlineOptions {
            noise_threshold: self.noise_threshold,
            page_numbering: self.page_numbering,
        }
    }

    pub fn extractor(&self) -> Pdftotext {
        Pdftotext {
            max_pages: self.max_pages,
            timeout: self.extract_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum PageNumbering {
    #[default]
    Zero,
    One,
}

impl PageNumbering {
    pub fn page_number(self, page_index: usize) -> usize {
        match self {
            Self::Zero => page_index,
            Self::One => page_index + 1,
        }
    }
}

/// How many pages must contain a line before it is dropped as a running
/// header, footer or watermark.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum NoiseThreshold {
    /// More than twice the page count. Never reached by per-page counting.
    #[default]
    Literal,
    /// More than half the pages, for documents of three pages or more.
    Majority,
}
