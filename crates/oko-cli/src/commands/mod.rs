use anyhow::Result;
use oko_config::AppConfig;
use oko_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod report;
pub mod search;
pub mod users;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Shared tail of `search` and `report`: optionally render HTML to a file,
/// then print the summary as JSON or human-readable lines.
pub fn emit_summary(
    json: bool,
    source: Option<&str>,
    summary: &oko_core::report::ReportSummary,
    out: Option<&std::path::Path>,
) -> Result<()> {
    use anyhow::Context as _;

    let output = match out {
        Some(path) => {
            let html = crate::render::render_html(summary);
            std::fs::write(path, html)
                .with_context(|| format!("write report {}", path.display()))?;
            Some(path.display().to_string())
        }
        None => None,
    };

    if json {
        return print_json(&serde_json::json!({
            "source": source,
            "summary": summary,
            "output": output,
        }));
    }

    println!("{} {}", summary.icon, summary.title);
    println!(
        "records {}  names {}  phones {}  emails {}",
        summary.record_count, summary.name_count, summary.phone_count, summary.email_count
    );
    if let Some(path) = output {
        println!("report written to {path}");
    }
    Ok(())
}
