// src/cli/handlers/serve.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use crate::{
    api::{self, ApiState},
    cli::args::ServeArgs,
    state::AppContext,
};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let serve_args = ServeArgs::try_parse_from(&args)?;
    let bind = serve_args
        .bind
        .unwrap_or_else(|| ctx.config.server.bind.clone());

    let db = ctx.take_database()?;
    let state = ApiState::new(
        db,
        ctx.config.validation.clone(),
        ctx.config.logs.default_limit,
    );

    let runtime = tokio::runtime::Runtime::new()?;
    println!(
        "\n{}",
        format!(t!("serve.info.listening"), address = bind.cyan()).bold()
    );
    println!("  {}", t!("serve.info.stop_hint").dimmed());

    runtime
        .block_on(api::serve(state, &bind))
        .with_context(|| format!(t!("serve.error.failed"), address = bind))
}
