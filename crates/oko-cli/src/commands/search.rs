use crate::commands::{print_json, Context, DEFAULT_HISTORY_LIMIT};
use crate::error::{invalid_input, limited, not_found};
use crate::util::{format_timestamp_datetime, now_utc};
use anyhow::{Context as _, Result};
use clap::Args;
use oko_client::{
    DepSearchProvider, HttpOptions, NicknameProvider, RegistryProvider, SearchProvider,
};
use oko_core::domain::{sanitize, SearchKind};
use oko_core::limit::{evaluate_window, LimitDecision, HOUR_WINDOW_SECS};
use oko_core::report::build_report;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query kind: phone|email|vk|ok|fc|inn|snils|nick|ogrn
    pub kind: String,
    pub query: String,
    #[arg(long)]
    pub user: String,
    /// Write the rendered HTML report here
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub limit: Option<i64>,
}

pub fn run_search(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let query = sanitize(&args.query);
    if query.is_empty() {
        return Err(invalid_input("query cannot be empty"));
    }
    let kind = SearchKind::parse(&args.kind);

    let user = ctx
        .store
        .users()
        .get(&args.user)?
        .ok_or_else(|| not_found(format!("user {}", args.user)))?;

    let now = now_utc();
    enforce_limits(ctx, &user.email, now)?;

    let http = HttpOptions {
        timeout_secs: ctx.config.providers.timeout_secs,
        user_agent: ctx.config.providers.user_agent.clone(),
    };
    let provider: Box<dyn SearchProvider> = match kind {
        SearchKind::Nickname => Box::new(NicknameProvider::new(http)),
        SearchKind::Ogrn => Box::new(RegistryProvider::new(
            ctx.config.providers.ofdata_url.clone(),
            ctx.config.providers.ofdata_key.clone(),
            http,
        )),
        _ => Box::new(DepSearchProvider::new(
            ctx.config.providers.depsearch_url.clone(),
            ctx.config.providers.depsearch_token.clone(),
            http,
        )),
    };
    debug!(source = provider.source_name(), kind = kind.token(), "dispatching search");

    let payload = provider
        .search(kind, &query)
        .with_context(|| format!("query {} provider", provider.source_name()))?;
    ctx.store
        .searches()
        .record(now, &user.email, kind, &query)?;

    let raw = serde_json::to_string(&payload)?;
    let summary = build_report(&query, kind, &raw);
    crate::commands::emit_summary(
        ctx.json,
        Some(provider.source_name()),
        &summary,
        args.out.as_deref(),
    )
}

fn enforce_limits(ctx: &Context<'_>, user_email: &str, now: i64) -> Result<()> {
    let recent = ctx
        .store
        .searches()
        .timestamps_since(user_email, now - HOUR_WINDOW_SECS)?;
    match evaluate_window(&recent, now, ctx.config.limits) {
        LimitDecision::Allowed => Ok(()),
        LimitDecision::MinuteExceeded => Err(limited(format!(
            "more than {} searches in the last minute",
            ctx.config.limits.per_minute
        ))),
        LimitDecision::HourExceeded => Err(limited(format!(
            "more than {} searches in the last hour",
            ctx.config.limits.per_hour
        ))),
    }
}

pub fn show_history(ctx: &Context<'_>, args: HistoryArgs) -> Result<()> {
    let user = ctx
        .store
        .users()
        .get(&args.user)?
        .ok_or_else(|| not_found(format!("user {}", args.user)))?;
    let limit = args.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = ctx.store.searches().list_for_user(&user.email, limit)?;

    if ctx.json {
        #[derive(Serialize)]
        struct HistoryItemDto {
            kind: String,
            query: String,
            created_at: i64,
        }
        let items: Vec<HistoryItemDto> = history
            .into_iter()
            .map(|record| HistoryItemDto {
                kind: record.kind.token().to_string(),
                query: record.query,
                created_at: record.created_at,
            })
            .collect();
        return print_json(&items);
    }

    for record in history {
        println!(
            "{}  {:6}  {}",
            format_timestamp_datetime(record.created_at),
            record.kind.token(),
            record.query
        );
    }
    Ok(())
}
