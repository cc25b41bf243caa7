use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use feedstore::{config, dispatch, SeedData};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let seed = match config::seed_path() {
        Some(path) => SeedData::load(&path)?,
        None => SeedData::demo()?,
    };
    let mut session = seed
        .into_session(config::current_user_id())
        .context("Failed to build stores")?;

    let me = session.users.current_user();
    tracing::info!(user = %me.id, username = %me.username, "session ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        let answer = match dispatch(&mut session, &line) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(command = %line, error = %err, "command failed");
                err.to_json()
            }
        };
        writeln!(stdout, "{}", answer)?;
        stdout.flush()?;
    }

    Ok(())
}
