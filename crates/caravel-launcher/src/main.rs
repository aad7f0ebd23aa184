//! Native launcher for a caravel language runtime.
//!
//! One linear pipeline per process invocation: locate the executable
//! directory, load the runtime shared library sitting at a fixed relative
//! path next to it, turn `--vm.*` arguments into startup options, create the
//! runtime, and hand the remaining arguments to the managed entry point.
//! Any failure prints one line to stderr and exits with -1.

use anyhow::Result;

mod args;
mod boot;
mod config;
mod dylib;
mod error;
mod exe_dir;
mod options;

use args::ProcessArgs;

fn main() {
    match try_main() {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(-1);
        }
    }
}

fn try_main() -> Result<()> {
    let args = ProcessArgs::from_env();
    let exe_dir = exe_dir::locate()?;
    let create_vm = dylib::load_runtime(&exe_dir)?;
    let options = options::assemble(&args, &exe_dir)?;
    boot::bootstrap(create_vm, &options, &args)?;
    Ok(())
}
