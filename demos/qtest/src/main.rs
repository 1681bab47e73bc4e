mod command;
mod session;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use argh::FromArgs;

use self::session::Session;

#[derive(Debug, FromArgs)]
/// Drive a string queue from a command script
#[argh(help_triggers("--help"))]
struct Args {
    /// script to run, stdin if omitted
    #[argh(option, short = 'f', arg_name = "path")]
    file: Option<PathBuf>,
    /// percentage of allocations that fail
    #[argh(option, default = "0", arg_name = "int")]
    fail: u8,
    /// seed for allocation failures
    #[argh(option, arg_name = "u64")]
    seed: Option<u64>,
    /// size of the buffer removed strings are copied into
    #[argh(option, default = "1024", arg_name = "int")]
    bufsize: usize,
    /// stop at the first failing command
    #[argh(switch)]
    strict: bool,
}

pub fn main() -> Result<()> {
    let args = argh::from_env::<Args>();
    tracing_subscriber::fmt()
        .without_time()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if args.fail > 100 {
        bail!("fail must be a percentage, got {}", args.fail);
    }

    let input: Box<dyn BufRead> = match &args.file {
        Some(path) => {
            let file = File::open(path).map_err(|e| anyhow!("open({}): {e}", path.display()))?;
            tracing::info!("reading commands, path={}", path.display());
            Box::new(BufReader::new(file))
        },
        None => Box::new(std::io::stdin().lock()),
    };

    let failures = Session::new(args.bufsize)
        .fail_rate(args.fail)
        .seed(args.seed)
        .run(input, &mut std::io::stdout().lock(), args.strict)?;
    if failures != 0 {
        bail!("{failures} command(s) failed");
    }
    Ok(())
}
