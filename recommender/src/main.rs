use anyhow::Result;
use clap::Parser;
use recommender::{run, Args};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<ExitCode> {
    // stdout carries the recommendations, logs go to stderr
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let ok = run(&args, &mut input, &mut out)?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
