//! Site-offset map server
//!
//! Reads one JSON request per line on stdin and writes one JSON response per
//! line on stdout. Logging goes to stderr (set `RUST_LOG` to adjust).

use anyhow::Context;
use site_offset_map::server::{error_codes, handle_request, Request, Response, ServerConfig, ServerState};
use std::io::{self, BufRead, Write};
use std::time::Instant;

fn write_response(out: &mut impl Write, response: &Response) -> anyhow::Result<()> {
    let json = serde_json::to_string(response).context("serializing response")?;
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    log::info!(
        "Starting map server (design_scale={}, shot_separation={})",
        config.placement.design_scale,
        config.placement.shot_separation
    );
    let mut state = ServerState::with_config(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("Error reading stdin: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                log::warn!("Failed to parse request: {}", e);
                let response = Response::error(None, error_codes::PARSE_ERROR, format!("Parse error: {}", e));
                write_response(&mut out, &response)?;
                continue;
            }
        };

        let method = request.method.clone();
        let start = Instant::now();
        let response = handle_request(&mut state, request);
        log::debug!("{} handled in {:.2}ms", method, start.elapsed().as_secs_f64() * 1000.0);

        write_response(&mut out, &response)?;
    }

    log::info!("Shutting down");
    Ok(())
}
