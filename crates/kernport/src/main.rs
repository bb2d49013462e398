//! Kernport command-line front end
//!
//! A thin diagnostic shell around `kernport-core`: it runs the acquisition
//! strategies and reports what happened. The acquired port is printed as an
//! opaque value; everything one would *do* with it (kernel memory access,
//! patching) lives in other tools.

use std::process;

use clap::{Parser, Subcommand};
use kernport_utils::init_logging;

/// Acquire and inspect the kernel task port.
#[derive(Parser, Debug)]
#[command(name = "kernport")]
#[command(version)]
#[command(about = "Acquire and inspect the kernel task port", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Run the acquisition strategies and report the outcome
    Acquire,
}

fn main()
{
    // Initialize logging (reads from RUST_LOG env var)
    // Defaults to INFO level and Pretty format if not set
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Acquire => {
            if !run_acquire() {
                process::exit(1);
            }
        }
    }
}

/// Run one acquisition attempt and print the result
///
/// Returns `true` on success. On failure the accumulated error record is
/// printed to stderr; deciding whether that is fatal is left to whoever
/// invoked us, via the exit code.
#[cfg(target_os = "macos")]
fn run_acquire() -> bool
{
    use kernport_core::{KernelTask, MachHost};
    use kernport_utils::info;

    info!("attempting kernel task port acquisition");
    let mut task = KernelTask::new(MachHost::new());

    if task.acquire() {
        println!("kernel task port: {}", task.port());
        true
    } else {
        for entry in task.errors().entries() {
            eprintln!("{entry}");
        }
        false
    }
}

#[cfg(not(target_os = "macos"))]
fn run_acquire() -> bool
{
    eprintln!("kernport: the kernel task port is a Mach concept; only macOS is supported");
    false
}
