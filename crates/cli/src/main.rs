//! i860 XR execution core command-line runner.
//!
//! This binary drives the core over a flat RAM board. It performs:
//! 1. **Setup:** Loads an optional JSON configuration and a raw image at a physical address.
//! 2. **Fixed run:** With `--steps`, executes that many steps on the core thread and returns.
//! 3. **Console run:** Otherwise reads one command per line from stdin and posts it to the
//!    core's mailbox until `quit` or end of input.
//!
//! On exit it prints the telemetry summary and, with `--dump`, the register dump.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use i860_core::common::CoreError;
use i860_core::config::Config;
use i860_core::core::Cpu;
use i860_core::sim::{Message, Runner, RunnerHandle, loader};
use i860_core::soc::{BlankSource, FlatMemory};

#[derive(Parser, Debug)]
#[command(
    name = "i860sim",
    author,
    version,
    about = "Intel i860 XR execution core runner",
    long_about = "Load a raw image into flat RAM and run the i860 XR core.\n\nWithout --steps the core runs until `quit` is read from stdin. Console commands:\n  halt, resume, irq, ack, break, reset, blank <display|video> <on|off>, quit\n\nExamples:\n  i860sim boot.bin --load 0xfff00000 --entry 0xffffff00 --steps 100000 --dump\n  RUST_LOG=i860::trap=debug i860sim -c board.json kernel.bin"
)]
struct Cli {
    /// Raw image to load.
    image: PathBuf,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Physical load address (defaults to the RAM base).
    #[arg(short, long, value_parser = parse_u32)]
    load: Option<u32>,

    /// Program counter after reset (defaults to the configured start address).
    #[arg(short, long, value_parser = parse_u32)]
    entry: Option<u32>,

    /// Run this many steps, then stop.
    #[arg(short, long)]
    steps: Option<u64>,

    /// Print the register dump on exit.
    #[arg(short, long)]
    dump: bool,

    /// Trace every executed instruction.
    #[arg(short, long)]
    trace: bool,
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        process::exit(e.exit_code());
    }
}

fn build(cli: &Cli) -> Result<(Cpu, Config), CoreError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(entry) = cli.entry {
        config.general.start_pc = entry;
    }
    config.general.trace_instructions |= cli.trace;

    let mut ram = FlatMemory::new(config.memory.ram_base, config.memory.ram_size);
    let load = cli.load.unwrap_or(config.memory.ram_base);
    let len = loader::load_file(&mut ram, load, &cli.image)?;
    info!(
        image = %cli.image.display(),
        len,
        load = format_args!("{load:#010x}"),
        entry = format_args!("{:#010x}", config.general.start_pc),
        "image loaded"
    );

    let cpu = Cpu::new(Box::new(ram), &config)?;
    Ok((cpu, config))
}

fn run(cli: &Cli) -> Result<(), CoreError> {
    let (cpu, config) = build(cli)?;
    let mut runner = Runner::new(cpu, &config.run);
    if let Some(steps) = cli.steps {
        runner = runner.max_steps(steps);
    }
    let handle = runner.spawn()?;
    if cli.steps.is_none() {
        console(&handle);
        handle.post(Message::Kill);
    }

    let Ok(mut cpu) = handle.join() else {
        error!("core thread panicked");
        process::exit(101);
    };
    // Telemetry resets the counters.
    let (steps, instructions) = (cpu.stats.steps, cpu.stats.instructions);
    println!("{}", cpu.telemetry());
    println!("{steps} steps, {instructions} instructions");
    if cli.dump {
        println!("{}", cpu.dump_state());
    }
    Ok(())
}

/// Reads console commands until `quit`, end of input, or the core thread exits.
fn console(handle: &RunnerHandle) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit" | "q"] => break,
            ["halt"] => handle.post(Message::Halt),
            ["resume" | "c"] => handle.post(Message::Resume),
            ["irq"] => handle.post(Message::Interrupt),
            ["ack"] => handle.post(Message::InterruptClear),
            ["break" | "b"] => handle.post(Message::DebugBreak),
            ["reset"] => handle.post(Message::Reset),
            ["blank", source, level] => {
                let source = match *source {
                    "display" => BlankSource::Display,
                    "video" => BlankSource::Video,
                    other => {
                        warn!("unknown blank source {other:?}");
                        continue;
                    }
                };
                handle.mailbox().post_blank(source, *level == "on");
            }
            other => warn!("unknown command {:?}", other.join(" ")),
        }
        if handle.is_finished() {
            break;
        }
    }
}
