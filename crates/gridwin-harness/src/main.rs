#![forbid(unsafe_code)]

//! Replay a gesture scenario and print what happened.
//!
//! Reads a JSON scenario from the path given as the first argument, or
//! from stdin when no argument is given, drives it through a fresh
//! engine, and prints one JSON line per step followed by the final
//! layout.
//!
//! # Running
//!
//! ```sh
//! cargo run -p gridwin-harness -- scenario.json
//! cargo run -p gridwin-harness < scenario.json
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use gridwin_harness::{Scenario, replay};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-json")]
    gridwin_core::logging::init_json();

    let text = match std::env::args().nth(1) {
        Some(path) => fs::read_to_string(&path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let scenario: Scenario = serde_json::from_str(&text)?;
    let replay = replay(&scenario)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for step in &replay.steps {
        serde_json::to_writer(&mut out, step)?;
        out.write_all(b"\n")?;
    }
    serde_json::to_writer(&mut out, &replay.layout)?;
    out.write_all(b"\n")?;
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gridwin-harness: {err}");
            ExitCode::FAILURE
        }
    }
}
