use std::io::{ self, BufRead, Write };
use clap::Parser;
use qreg_repl::{ execute, Command, DisplayOpts, Flow, INTRO, PROMPT };
use qreg_sim::session::Session;
use tracing::debug;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

/// Interactive state-vector simulator for a small qubit register.
#[derive(Parser)]
#[command(name = "qreg")]
#[command(version)]
struct Cli {
    /// Seed for measurement randomness; drawn from system entropy if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Width of the probability bars printed by `show`
    #[arg(long, default_value_t = 40)]
    bar_width: usize,

    /// Smallest probability listed by `show`
    #[arg(long, default_value_t = 1e-9)]
    threshold: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
        )
        .with(tracing_subscriber::EnvFilter::try_new(&cli.log_level)?)
        .init();

    let opts = DisplayOpts { bar_width: cli.bar_width, threshold: cli.threshold };
    let mut session = Session::new(cli.seed);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}", INTRO);
    print!("{}", PROMPT);
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match line.parse::<Command>()
                .and_then(|cmd| execute(&mut session, cmd, &opts))
            {
                Ok(Flow::Continue(msg)) => { println!("{}", msg); },
                Ok(Flow::Quit(msg)) => { println!("{}", msg); return Ok(()); },
                Err(err) => {
                    debug!(%err, "command rejected");
                    println!("{}", err);
                },
            }
        }
        print!("{}", PROMPT);
        stdout.flush()?;
    }
    println!();
    Ok(())
}
