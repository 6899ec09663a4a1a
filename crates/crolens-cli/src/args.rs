use clap::{Parser, ValueEnum};
use crolens_core::Strategy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crolens")]
#[command(about = "Audit a web page for conversion-rate-optimization quality")]
#[command(version)]
pub struct Args {
    /// Page URL to fetch and audit (the scheme defaults to https)
    pub target: Option<String>,

    /// Audit a pre-scraped signals JSON file instead of fetching the page
    #[arg(long, value_name = "FILE")]
    pub signals: Option<PathBuf>,

    /// PageSpeed record for the desktop strategy
    #[arg(long, value_name = "FILE")]
    pub desktop_speed: Option<PathBuf>,

    /// PageSpeed record for the mobile strategy
    #[arg(long, value_name = "FILE")]
    pub mobile_speed: Option<PathBuf>,

    /// Security headers record
    #[arg(long, value_name = "FILE")]
    pub security_headers: Option<PathBuf>,

    /// PageSpeed Insights API key
    #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true)]
    pub pagespeed_key: Option<String>,

    /// Viewport whose speed record drives the rules and the benchmark
    #[arg(long, value_enum, default_value_t = ViewportArg::Mobile)]
    pub viewport: ViewportArg,

    /// Do not call PageSpeed Insights or fetch security headers
    #[arg(long)]
    pub no_external: bool,

    /// Threshold overrides (JSON, every field optional)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Save the report; a directory gets a name derived from the URL
    #[arg(short, long, value_name = "PATH", num_args = 0..=1, default_missing_value = ".")]
    pub save: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewportArg {
    Mobile,
    Desktop,
}

impl From<ViewportArg> for Strategy {
    fn from(arg: ViewportArg) -> Self {
        match arg {
            ViewportArg::Mobile => Strategy::Mobile,
            ViewportArg::Desktop => Strategy::Desktop,
        }
    }
}
