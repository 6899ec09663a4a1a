use std::fs;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use crolens_cli::{build_output_path, render_report};
use crolens_core::signals::{SecurityHeadersData, SpeedData, read_json};
use crolens_core::{
    AnalysisInput, ExternalOptions, ScrapedSignals, Thresholds, analyze, extract, fetch_page,
    gather_external, parse_page_url,
};

mod args;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let thresholds = match args.config.as_ref() {
        Some(path) => Thresholds::from_file(path)
            .with_context(|| format!("failed to load thresholds from {}", path.display()))?,
        None => Thresholds::default(),
    };

    let loaded = load_signals(&args, &thresholds).await?;
    let page_url = loaded.url;
    let mut input = AnalysisInput::new(loaded.signals);
    input.viewport = args.viewport.into();

    input.desktop_speed = read_optional::<SpeedData>(args.desktop_speed.as_ref())?;
    input.mobile_speed = read_optional::<SpeedData>(args.mobile_speed.as_ref())?;
    input.security_headers = read_optional::<SecurityHeadersData>(args.security_headers.as_ref())?;

    let has_speed_files = args.desktop_speed.is_some() || args.mobile_speed.is_some();
    let has_header_file = args.security_headers.is_some();
    let wants_external = !args.no_external && !(has_speed_files && has_header_file);
    match page_url.as_ref() {
        Some(url) if wants_external => {
            let options = ExternalOptions {
                pagespeed_key: args.pagespeed_key.clone(),
                skip_pagespeed: has_speed_files,
                skip_headers: has_header_file,
                page_headers: loaded.headers,
            };
            let external = gather_external(url.as_str(), &options).await;
            if !has_speed_files {
                input.desktop_speed = external.desktop_speed;
                input.mobile_speed = external.mobile_speed;
            }
            if !has_header_file {
                input.security_headers = external.security_headers;
            }
        }
        None if wants_external => {
            tracing::debug!("signals carry no URL; skipping PageSpeed and header lookups");
        }
        _ => {}
    }

    let result = analyze(&input, &thresholds);
    let shown_url = page_url
        .as_ref()
        .map(Url::as_str)
        .unwrap_or(&input.signals.url);
    tracing::debug!(url = shown_url, score = result.overall_score, "rendering report");

    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&result)?;
        json.push('\n');
        json
    } else {
        render_report(&result, shown_url)
    };
    print!("{}", output);

    if let Some(save_base) = args.save.as_ref() {
        let url = page_url
            .as_ref()
            .ok_or_else(|| anyhow!("--save needs a page URL: pass one or set it in the signals"))?;
        let output_path = build_output_path(save_base, url);
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }

        fs::write(&output_path, output.as_bytes())
            .with_context(|| format!("failed to write output file {}", output_path.display()))?;

        eprintln!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

/// Signals for one page and what was learned while loading them
struct LoadedPage {
    signals: ScrapedSignals,
    /// `None` for a signals file that names no page
    url: Option<Url>,
    /// Response headers of a live fetch
    headers: Option<SecurityHeadersData>,
}

/// Signals from a file, or from fetching and statically extracting the target
async fn load_signals(args: &Args, thresholds: &Thresholds) -> Result<LoadedPage> {
    if let Some(path) = args.signals.as_ref() {
        let signals = ScrapedSignals::from_file(path)
            .with_context(|| format!("failed to read signals from {}", path.display()))?;
        let raw_url = args.target.as_deref().unwrap_or(&signals.url).trim();
        let url = if raw_url.is_empty() {
            None
        } else {
            Some(parse_page_url(raw_url).context("invalid URL")?)
        };
        return Ok(LoadedPage {
            signals,
            url,
            headers: None,
        });
    }

    let target = args
        .target
        .as_deref()
        .ok_or_else(|| anyhow!("provide a URL or --signals <FILE>"))?;
    let url = parse_page_url(target).context("invalid URL")?;

    let page = fetch_page(url.as_str())
        .await
        .with_context(|| format!("failed to fetch {url}"))?;
    let final_url = Url::parse(&page.url).unwrap_or(url);

    let mut signals = extract(&page.html, final_url.as_str(), thresholds);
    signals.performance.load_time_ms = page.load_time_ms;
    Ok(LoadedPage {
        signals,
        url: Some(final_url),
        headers: Some(page.headers),
    })
}

fn read_optional<T: serde::de::DeserializeOwned>(
    path: Option<&std::path::PathBuf>,
) -> Result<Option<T>> {
    path.map(|p| read_json(p).with_context(|| format!("failed to read {}", p.display())))
        .transpose()
}
