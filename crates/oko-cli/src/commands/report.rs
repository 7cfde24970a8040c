use crate::commands::emit_summary;
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use oko_core::domain::{sanitize, SearchKind};
use oko_core::report::build_report;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Query kind: phone|email|vk|ok|fc|inn|snils|nick|ogrn
    pub kind: String,
    pub query: String,
    /// Saved provider payload (JSON) to assemble the report from
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Assembles a report from a payload on disk. Anything unreadable as JSON
/// still renders, through the assembler's raw fallback.
pub fn build_offline(json: bool, args: ReportArgs) -> Result<()> {
    let query = sanitize(&args.query);
    if query.is_empty() {
        return Err(invalid_input("query cannot be empty"));
    }
    let kind = SearchKind::parse(&args.kind);
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("read payload {}", args.input.display()))?;

    let summary = build_report(&query, kind, &raw);
    emit_summary(json, None, &summary, args.out.as_deref())
}
