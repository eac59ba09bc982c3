use std::{error::Error, path::PathBuf, sync::Arc, thread, time::Duration};

use clap::Parser;
use rand::Rng;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use traffic_signal::{SimulationConfig, TrafficLight};

/// Vehicles queueing at a simulated traffic light
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with min_dwell_ms, max_dwell_ms and tick_ms
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    min_dwell_ms: Option<u64>,

    #[arg(long)]
    max_dwell_ms: Option<u64>,

    #[arg(long)]
    tick_ms: Option<u64>,

    /// Number of vehicle threads waiting at the light
    #[arg(long, default_value_t = 4)]
    vehicles: usize,

    /// How many times each vehicle crosses before it leaves
    #[arg(long, default_value_t = 2)]
    crossings: usize,
}

impl Args {
    fn simulation_config(&self) -> traffic_signal::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(min) = self.min_dwell_ms {
            config.min_dwell_ms = min;
        }
        if let Some(max) = self.max_dwell_ms {
            config.max_dwell_ms = max;
        }
        if let Some(tick) = self.tick_ms {
            config.tick_ms = tick;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_thread_names(true))
        .init();
}

fn main() {
    init_tracing();

    if let Err(e) = run(Args::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.simulation_config()?;
    info!(?config, "starting traffic light");

    let light = Arc::new(TrafficLight::from_config(&config)?);
    light.simulate()?;

    let mut vehicles = Vec::new();
    for id in 0..args.vehicles {
        let light = light.clone();
        let crossings = args.crossings;
        let handle = thread::Builder::new()
            .name(format!("vehicle{id}"))
            .spawn(move || {
                for _ in 0..crossings {
                    let arrival = rand::thread_rng().gen_range(500..=3000);
                    thread::sleep(Duration::from_millis(arrival));

                    info!(vehicle = id, phase = %light.current_phase(), "waiting at the light");
                    light.wait_for_green();
                    info!(vehicle = id, "crossed on green");
                }
            })?;
        vehicles.push(handle);
    }

    for handle in vehicles {
        if let Err(e) = handle.join() {
            error!("Failed to join vehicle thread: {:?}", e);
        }
    }

    light.shutdown();
    info!(unreceived = light.pending(), "simulation finished");
    Ok(())
}
