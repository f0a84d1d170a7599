//! # treeconv - HTML tree to reStructuredText conversion
//!
//! Walks a directory tree, finds `.html` files, converts each through an
//! external document converter (pandoc), and writes the result to a
//! derived output path.
//!
//! ## Quick Start
//!
//! ```no_run
//! use treeconv::convert::{Format, PandocConverter};
//! use treeconv::mapping::MappingPolicy;
//! use treeconv::pipeline::{self, RunOptions};
//! use std::sync::atomic::AtomicBool;
//!
//! # fn main() -> anyhow::Result<()> {
//! let opts = RunOptions {
//!     root: "docs".into(),
//!     policy: MappingPolicy::SameDir,
//!     from: Format::Html,
//!     to: Format::Rst,
//!     dry_run: false,
//! };
//! let converter = PandocConverter::from_env();
//! let cancel = AtomicBool::new(false);
//! let summary = pipeline::run(&opts, &converter, &cancel)?;
//! println!("{} converted, {} failed", summary.converted, summary.failed);
//! # Ok(())
//! # }
//! ```
//!
//! The converter is a pluggable trait, so anything that maps markup text
//! from one format to another can stand in for pandoc (tests use a shell
//! script via the `TREECONV_PANDOC` env var).

pub mod convert;
pub mod discover;
pub mod mapping;
pub mod pipeline;

pub use convert::{ConvertError, Converter, Format, PandocConverter};
pub use mapping::MappingPolicy;
pub use pipeline::{RunOptions, RunSummary};
