/*
 *  main.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  One-shot entry point, run from a timer
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::Context;
use env_logger::Env;
use log::info;

use work_clock::clock::{Clock, FixedClock, ZonedClock};
use work_clock::config::{self, Settings, DEFAULT_LOG_LEVEL};
use work_clock::display::{InkPanel, PanelFactory};
use work_clock::status::{FileStatusStore, StatusGate};
use work_clock::{Outcome, WordClock};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn run<C: Clock>(
    clock: C,
    settings: &Settings,
    gate: &mut StatusGate<FileStatusStore>,
    panel: &mut dyn InkPanel,
) -> work_clock::Result<Outcome> {
    WordClock::new(clock, settings.schedule.clone(), settings.rotation)
        .force(settings.force)
        .run_once(gate, panel)
}

fn main() -> anyhow::Result<()> {
    let (cli, cfg) = config::load()?;

    if cli.dump_config {
        // Pretty YAML of effective config
        print!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    let level = cfg.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("This {} is about time, ish", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let settings = Settings::resolve(&cfg, &cli)?;

    let store = FileStatusStore::new(&settings.status_file);
    if settings.init_status {
        store.ensure_exists()?;
    }
    let mut gate = StatusGate::open(store).context("reading last rendered state")?;
    let mut panel = PanelFactory::create(&settings).context("opening panel")?;

    let outcome = match settings.at {
        Some(at) => {
            info!("Evaluating at fixed local time {}", at);
            run(FixedClock::from_naive(at), &settings, &mut gate, panel.as_mut())
        }
        None => {
            info!("Evaluating now in {}", settings.timezone);
            run(ZonedClock::new(settings.timezone), &settings, &mut gate, panel.as_mut())
        }
    }?;

    println!("{}", outcome);
    Ok(())
}
