//! Command handlers. Each wraps `uscode-pipeline::Engine`/the markup
//! fetchers and converts crate errors to `anyhow::Error` at this boundary
//! (spec.md §7).

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Deserialize;
use std::path::Path;

use uscode_core::ReleasePointTag;
use uscode_markup::{FsCache, HttpCodifiedFetcher, HttpEnactedLawFetcher, HttpReleasePointDirectory, ReleasePointRegistry};
use uscode_pipeline::{law_source::EnactedLawDirectory, AdvanceTarget, Engine, EnactedLawEvent, TimelineBuilder};

use crate::config::Config;
use crate::OutputFormat;

/// Reads a flat JSON array of enacted-law rows from a local file (spec.md §6:
/// the enacted-law directory's publisher is a deployment concern this system
/// leaves unspecified).
struct FileLawDirectory {
    path: String,
}

#[derive(Debug, Deserialize)]
struct RawLawRow {
    congress: u32,
    law_number: u32,
    date: NaiveDate,
}

#[async_trait]
impl EnactedLawDirectory for FileLawDirectory {
    async fn list_enacted_laws(&self) -> Result<Vec<EnactedLawEvent>, uscode_markup::FetchError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(uscode_markup::FetchError::Cache {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        let rows: Vec<RawLawRow> = serde_json::from_slice(&bytes).map_err(|e| uscode_markup::FetchError::BadStatus {
            resource: format!("{}: malformed JSON ({e})", self.path),
            status: 0,
        })?;
        Ok(rows
            .into_iter()
            .map(|r| EnactedLawEvent {
                congress: r.congress,
                law_number: r.law_number,
                date: r.date,
            })
            .collect())
    }
}

fn http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(config.fetchers.connection_pool_size)
        .build()
        .context("building HTTP client")
}

async fn build_timeline(config: &Config) -> Result<TimelineBuilder> {
    let client = http_client(config)?;
    let directory = HttpReleasePointDirectory::new(client, config.fetchers.release_point_listing_url.clone());
    let registry = ReleasePointRegistry::new(Box::new(directory));
    let release_points = registry.all().await.context("listing release points")?;

    let law_directory = FileLawDirectory {
        path: config.fetchers.enacted_laws_path.clone(),
    };
    let laws = law_directory.list_enacted_laws().await.context("listing enacted laws")?;

    Ok(TimelineBuilder::new(release_points, laws))
}

fn fetchers(config: &Config) -> Result<(HttpCodifiedFetcher, HttpEnactedLawFetcher)> {
    let client = http_client(config)?;
    let cache = FsCache::new(config.cache.directory.clone());
    let codified = HttpCodifiedFetcher::new(client.clone(), config.fetchers.codified_base_url.clone(), cache.clone());
    let enacted = HttpEnactedLawFetcher::new(client, config.fetchers.enacted_base_url.clone(), cache);
    Ok((codified, enacted))
}

fn load_engine(config: &Config, timeline: TimelineBuilder, titles: Vec<u32>) -> Result<Engine> {
    Engine::load_from_path(Path::new(&config.state_path), timeline, titles).context("loading persisted state")
}

pub fn handle_init(config: &Config, titles: Option<Vec<u32>>, bootstrap_date: &str) -> Result<()> {
    let date = NaiveDate::parse_from_str(bootstrap_date, "%Y-%m-%d").context("parsing --bootstrap-date")?;
    let titles = titles.unwrap_or_else(|| config.titles.clone());

    let mut graph = uscode_store::RevisionGraph::new();
    let store = uscode_store::SnapshotStore::new();
    let root = graph
        .insert_bootstrap(uscode_core::Revision::bootstrap(date, "bootstrap"))
        .context("inserting bootstrap revision")?;
    graph.mark_ingested(root).context("marking bootstrap ingested")?;

    let engine = Engine::new(graph, store, TimelineBuilder::new(vec![], vec![]), titles);
    engine.save_to_path(Path::new(&config.state_path)).context("writing initial state")?;

    println!("{} bootstrap revision at {}", "created".green(), date);
    Ok(())
}

pub async fn handle_advance(config: &Config, count: Option<usize>, until_tag: Option<String>) -> Result<()> {
    let timeline = build_timeline(config).await?;
    let (codified, enacted) = fetchers(config)?;

    let mut engine = load_engine(config, timeline, config.titles.clone())?;
    let target = match (count, until_tag) {
        (Some(n), None) => AdvanceTarget::Count(n),
        (None, Some(tag)) => AdvanceTarget::UntilTag(parse_tag(&tag)?),
        (None, None) => AdvanceTarget::Count(1),
        (Some(_), Some(_)) => anyhow::bail!("--count and --until-tag are mutually exclusive"),
    };

    let result = engine
        .advance(target, &codified, &enacted, config.fetchers.connection_pool_size)
        .await
        .context("advancing pipeline")?;
    engine.save_to_path(Path::new(&config.state_path)).context("writing updated state")?;

    for (tag, checkpoint) in &result.checkpoints {
        if checkpoint.is_clean() {
            tracing::info!(%tag, "checkpoint clean");
        } else {
            tracing::warn!(
                %tag,
                mismatches = checkpoint.mismatches.len(),
                only_in_derived = checkpoint.only_in_derived.len(),
                only_in_ground_truth = checkpoint.only_in_ground_truth.len(),
                "checkpoint divergence"
            );
        }
    }

    println!("events processed:        {}", result.events_processed);
    println!("laws applied:             {}", result.laws_applied);
    println!("laws skipped (deferred):  {}", result.laws_skipped_deferred);
    println!("release points ingested:  {}", result.release_points_ingested);
    println!("sections applied:         {}", result.sections_applied);
    println!("sections failed:          {}", result.sections_failed.to_string().red());
    for failure in &result.failures {
        println!("  {} {}", "!".red(), failure);
    }
    Ok(())
}

pub fn handle_validate(config: &Config, tag: &str) -> Result<()> {
    let engine = load_engine(config, TimelineBuilder::new(vec![], vec![]), config.titles.clone())?;
    let parsed = parse_tag(tag)?;
    let checkpoint = engine.validate_at(&parsed).context("validating checkpoint")?;

    if checkpoint.is_clean() {
        println!("{} {} is clean", "✓".green(), tag);
    } else {
        println!(
            "{} {}: {} mismatches, {} only-in-derived, {} only-in-ground-truth",
            "✗".red(),
            tag,
            checkpoint.mismatches.len(),
            checkpoint.only_in_derived.len(),
            checkpoint.only_in_ground_truth.len()
        );
    }
    Ok(())
}

pub fn handle_section(config: &Config, title: u32, section: &str, at_revision: Option<u64>, format: &OutputFormat) -> Result<()> {
    let engine = load_engine(config, TimelineBuilder::new(vec![], vec![]), config.titles.clone())?;
    let snapshot = match at_revision {
        Some(seq) => {
            let revision = engine
                .revision_by_sequence(seq)
                .with_context(|| format!("no revision with sequence number {seq}"))?;
            engine.section_at_revision(title, section, revision)?
        }
        None => engine.section_at(title, section)?,
    };

    match snapshot {
        None => println!("title {title}, section {section}: not present (repealed or never existed)"),
        Some(snap) => print_snapshot(&snap, format),
    }
    Ok(())
}

pub fn handle_history(config: &Config, title: u32, section: &str, format: &OutputFormat) -> Result<()> {
    let engine = load_engine(config, TimelineBuilder::new(vec![], vec![]), config.titles.clone())?;
    let history = engine.section_history(title, section);
    if history.is_empty() {
        println!("no history for title {title}, section {section}");
        return Ok(());
    }
    for snap in &history {
        print_snapshot(snap, format);
        println!();
    }
    Ok(())
}

pub fn handle_diff(config: &Config, old: u64, new: u64) -> Result<()> {
    let engine = load_engine(config, TimelineBuilder::new(vec![], vec![]), config.titles.clone())?;
    let old_id = engine.revision_by_sequence(old).with_context(|| format!("no revision with sequence number {old}"))?;
    let new_id = engine.revision_by_sequence(new).with_context(|| format!("no revision with sequence number {new}"))?;
    let diffs = engine.diff(old_id, new_id)?;
    let summary = uscode_diff::summarize(&diffs);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["title", "section", "change"]);
    for d in &diffs {
        let (title, section) = d.key();
        let change = match d {
            uscode_diff::SectionDiff::Added(_) => "added".green().to_string(),
            uscode_diff::SectionDiff::Modified { .. } => "modified".yellow().to_string(),
            uscode_diff::SectionDiff::Deleted(_) => "deleted".red().to_string(),
            uscode_diff::SectionDiff::Unchanged(_) => continue,
        };
        table.add_row(vec![title.to_string(), section, change]);
    }
    println!("{table}");
    println!(
        "added {}, modified {}, deleted {}, unchanged {}",
        summary.added, summary.modified, summary.deleted, summary.unchanged
    );
    Ok(())
}

pub async fn handle_timeline(config: &Config, from_congress: Option<u32>, to_congress: Option<u32>) -> Result<()> {
    let timeline = build_timeline(config).await?;
    let events = timeline.build(from_congress.unwrap_or(0), to_congress);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["date", "kind", "detail"]);
    for event in &events {
        let (kind, detail) = match event {
            uscode_pipeline::Event::Enacted { congress, law_number, .. } => ("enacted".to_string(), format!("Pub. L. {congress}-{law_number}")),
            uscode_pipeline::Event::GroundTruth { tag, .. } => ("ground truth".to_string(), tag.to_string()),
        };
        table.add_row(vec![event.date().to_string(), kind, detail]);
    }
    println!("{table}");
    Ok(())
}

fn parse_tag(tag: &str) -> Result<ReleasePointTag> {
    let (congress, law, _deferred) = ReleasePointRegistry::parse_tag(tag).with_context(|| format!("malformed release point tag: {tag}"))?;
    Ok(ReleasePointTag::new(congress, law))
}

fn print_snapshot(snap: &uscode_core::SectionSnapshot, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(snap) {
                println!("{json}");
            }
        }
        OutputFormat::Text | OutputFormat::Table => {
            println!("{} {} — {}", format!("§{}", snap.section_number).bold(), snap.heading, snap.full_citation);
            match &snap.text_content {
                Some(text) => println!("{text}"),
                None => println!("{}", "(repealed)".red()),
            }
            if !snap.notes.is_empty() {
                println!("{}", snap.notes.trim_end());
            }
        }
    }
}
