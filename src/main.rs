use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

mod auth;
mod cli;
mod error;
mod ext;
mod google;
mod humanize;
mod model;
mod pipeline;
mod sheets;
mod util;
mod window;
mod writer;
mod youtube;

use crate::cli::{normalize, Cli};
use crate::pipeline::ReportPipeline;

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  if cli.auth_type {
    println!("{}", serde_json::to_string(&auth::get_auth_type())?);
    return Ok(());
  }

  util::init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;
  debug!(zone = %cfg.zone, local_out = ?cfg.local_out, now = ?cfg.now, "effective config");
  let now = util::effective_now(cfg.now);

  // Phase 2: pick backends; a token is only looked up when one of them needs it
  let tokens = google::TokenSource::new(cfg.access_token.clone());
  let youtube = youtube::build_api(&tokens)?;
  let sheets = sheets::build_api(cfg.local_out.as_deref(), &tokens, now)?;

  // Phase 3: run
  let handle = ReportPipeline::new(youtube.as_ref(), sheets.as_ref(), cfg.zone, now)
    .run()
    .context("creating YouTube analytics report")?;

  println!("{}", handle.url);
  Ok(())
}
