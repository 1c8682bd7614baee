// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! avsc CLI
//!
//! Loads an Avro schema (`.avsc` JSON), turns it into a renderable graph, and
//! answers field searches against it.
//!
//! # Usage
//! ```text
//! avsc graph <FILE> [--max-depth N] [--pretty]
//! avsc search <FILE> <QUERY> [--attr name|description]...
//! avsc hash <FILE>
//! ```
//!
//! Output goes to stdout as JSON (or hex for `hash`); logs go to stderr.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use avsc_app_core::config::{ConfigService, STYLE_KEY};
use avsc_config_fs::FsConfigStore;
use avsc_graph::{load_schema, search, transform_with, StylePolicy};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Avro schema graph tool")]
struct Args {
    /// Directory holding `style.json` (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    /// Ignore stored config and use built-in styles
    #[arg(long, global = true)]
    no_config: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the graph (nodes + edges) as JSON
    Graph {
        /// Schema file
        file: PathBuf,
        /// Stop descending below this level (0 = unbounded)
        #[arg(long)]
        max_depth: Option<u32>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print ids of nodes matching a case-insensitive regex
    Search {
        /// Schema file
        file: PathBuf,
        /// Regex to match
        query: String,
        /// Attribute to search (repeatable): name, description
        #[arg(long = "attr", default_value = "name")]
        attrs: Vec<String>,
        /// Stop descending below this level (0 = unbounded)
        #[arg(long)]
        max_depth: Option<u32>,
    },
    /// Print the blake3 hash of the canonical graph
    Hash {
        /// Schema file
        file: PathBuf,
        /// Stop descending below this level (0 = unbounded)
        #[arg(long)]
        max_depth: Option<u32>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let style = load_style(&args);
    let mut out = io::stdout().lock();

    match args.cmd {
        Command::Graph {
            file,
            max_depth,
            pretty,
        } => {
            let (graph, _) = transform_with(&open(&file)?, max_depth, &style);
            if pretty {
                serde_json::to_writer_pretty(&mut out, &graph)?;
            } else {
                serde_json::to_writer(&mut out, &graph)?;
            }
            writeln!(out)?;
        }
        Command::Search {
            file,
            query,
            attrs,
            max_depth,
        } => {
            let (_, index) = transform_with(&open(&file)?, max_depth, &style);
            let ids = search(&index, &query, attrs.as_slice())?;
            serde_json::to_writer(&mut out, &ids)?;
            writeln!(out)?;
        }
        Command::Hash { file, max_depth } => {
            let (graph, _) = transform_with(&open(&file)?, max_depth, &style);
            let hash = graph.compute_hash()?;
            writeln!(out, "{}", hex::encode(hash))?;
        }
    }
    Ok(())
}

fn open(path: &Path) -> Result<avsc_graph::SchemaRoot> {
    debug!(path = %path.display(), "loading schema");
    load_schema(path).with_context(|| format!("failed to load schema {}", path.display()))
}

fn load_style(args: &Args) -> StylePolicy {
    if args.no_config {
        return StylePolicy::default();
    }
    let store = match &args.config_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    };
    match store {
        Ok(store) => ConfigService::new(store).load_or_default(STYLE_KEY),
        Err(err) => {
            warn!(error = %err, "config store unavailable; using built-in styles");
            StylePolicy::default()
        }
    }
}
