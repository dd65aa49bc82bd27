use std::io::{self, BufRead, Write};

use anyhow::Context;
use euterpe_config::Config;
use tracing::Instrument;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod steps;

use self::steps::{Selection, Step, parse_selection, run_step};

const BANNER: &str = r"
=====================================================
   ███████╗██╗   ██╗████████╗███████╗██████╗ ███████╗
   ██╔════╝██║   ██║╚══██╔══╝██╔════╝██╔══██╗██╔════╝
   █████╗  ██║   ██║   ██║   █████╗  ██████╔╝█████╗
   ██╔══╝  ██║   ██║   ██║   ██╔══╝  ██╔══██╗██╔══╝
   ███████╗╚██████╔╝   ██║   ███████╗██║  ██║███████╗
   ╚══════╝ ╚═════╝    ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

        POS Tagging Pipeline - Lyrics Project
=====================================================
";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match Config::load().context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return Ok(());
        }
    };

    println!("{BANNER}");
    println!("Select the step to run:\n");
    for step in Step::ALL {
        println!("{} - {}", step.number(), step.label());
    }
    println!("0 - Run everything\n");
    print!("Step: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let Some(selection) = parse_selection(&answer) else {
        println!("Invalid option.");
        return Ok(());
    };

    let run_id = uuid::Uuid::new_v4();
    run(selection, &config)
        .instrument(tracing::info_span!("pipeline", %run_id))
        .await;
    Ok(())
}

async fn run(selection: Selection, config: &Config) {
    let steps: Vec<Step> = match selection {
        Selection::All => Step::ALL.to_vec(),
        Selection::One(step) => vec![step],
    };

    for step in steps {
        let span = tracing::info_span!("step", n = step.number(), name = step.label());
        let result = run_step(step, config).instrument(span.clone()).await;

        let _entered = span.enter();
        match result {
            Ok(()) => tracing::info!("Step {} complete: {}", step.number(), step.label()),
            Err(e) => {
                tracing::error!("Step {} failed: {e:#}", step.number());
                return;
            }
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,hyper_util=warn,reqwest=warn".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
