//! NES timing core entry point.
//!
//! Loads a cartridge, resets the console and runs it for a number of frames.
//! Usage: nesdot [--frames N] [--steps N] [--trace] path/to/game.nes

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, error, info};
use nesdot::{cartridge::cartridge::Cartridge, logger, nes::Nes};

/// NES runs at ~60.0988 Hz (NTSC). Target one frame per 16.67 ms for ~60 fps.
const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

#[derive(Parser, Debug)]
#[command(name = "nesdot")]
#[command(about = "Run an NROM cartridge on the NES CPU and PPU timing core", long_about = None)]
struct Args {
    /// Path to the iNES ROM file
    rom: PathBuf,

    /// Number of frames to run
    #[arg(short, long, default_value = "60")]
    frames: u64,

    /// Stop after this many instructions
    #[arg(short, long)]
    steps: Option<u64>,

    /// Log every instruction (implies --log-level trace)
    #[arg(short, long)]
    trace: bool,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Run as fast as possible instead of pacing to 60 frames per second
    #[arg(long)]
    unthrottled: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.trace {
        LevelFilter::Trace
    } else {
        args.log_level
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Failed to install logger: {}", e);
        return ExitCode::FAILURE;
    }

    let cart = match Cartridge::load(&args.rom) {
        Ok(cart) => cart,
        Err(e) => {
            error!("Failed to load cartridge: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "{}: {} PRG bank(s), {} CHR bank(s), mapper {}",
        args.rom.display(),
        cart.header.prg_banks,
        cart.header.chr_banks,
        cart.header.mapper_number()
    );

    let mut nes = match Nes::new(&cart) {
        Ok(nes) => nes,
        Err(e) => {
            error!("Failed to load cartridge: {}", e);
            return ExitCode::FAILURE;
        }
    };
    nes.reset();

    let mut executed = 0u64;
    'frames: for _ in 0..args.frames {
        let frame_start = Instant::now();
        let frame = nes.frame();

        while nes.frame() == frame {
            if args.steps.is_some_and(|cap| executed >= cap) {
                break 'frames;
            }
            if let Err(e) = nes.step() {
                error!("CPU halted after {} instructions: {}", executed, e);
                return ExitCode::FAILURE;
            }
            executed += 1;
        }

        // Pace to ~60 fps so we don't burn CPU (emulation is far faster than real NES)
        let elapsed = frame_start.elapsed();
        if !args.unthrottled && elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!(
        "Completed {} frames, {} instructions, {} cycles.",
        nes.frame(),
        executed,
        nes.cpu.cycles
    );
    ExitCode::SUCCESS
}
