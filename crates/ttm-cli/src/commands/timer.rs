use std::io::{self, Write};

use clap::Subcommand;
use tracing::debug;
use ttm_core::{format_clock, Event, Phase, SchedulerState, Session, TICK};

use super::Context;
use crate::terminal::{self, TerminalShell};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run an interactive timer session in this terminal
    Run,
    /// Print the configured durations and a standby snapshot as JSON
    Status,
}

pub fn run(ctx: &Context, action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let mut session = Session::open(&config, ctx.config_path())?;

    match action {
        TimerAction::Run => {
            debug!(
                config = %ctx.config_path().display(),
                stats = %session.store().path().display(),
                "starting interactive session"
            );
            terminal::print_standby_menu();
            let mut shell = TerminalShell::spawn(TICK);
            session.run(&mut shell, render);
            if let SchedulerState::AwaitingConfirmation(phase) = session.scheduler().state() {
                println!("\n{} left unanswered, nothing recorded.", phase.label());
            }

            let totals = session.store().record().totals();
            println!(
                "\nsuccessful periods: {}  interrupts: {}  short breaks: {}  long breaks: {}",
                totals.successful_periods, totals.interrupts, totals.short_breaks, totals.long_breaks
            );
        }
        TimerAction::Status => {
            let durations: serde_json::Map<_, _> = Phase::ALL
                .iter()
                .map(|phase| {
                    let secs = session.scheduler().config().duration(*phase).as_secs();
                    (phase.to_string(), serde_json::Value::from(secs))
                })
                .collect();
            let status = serde_json::json!({
                "snapshot": session.scheduler().snapshot(),
                "durations_secs": durations,
                "track_file": session.store().path(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}

fn render(event: &Event) {
    match event {
        Event::PhaseStarted {
            phase,
            duration_secs,
            ..
        } => {
            println!("\n{} ({})", phase.label(), format_clock(*duration_secs));
            terminal::print_running_menu();
        }
        Event::CountdownTicked { remaining_secs, .. } => {
            print!("\r  {}  ", format_clock(*remaining_secs));
            let _ = io::stdout().flush();
        }
        Event::PhaseEnded { .. } => println!(),
        Event::Interrupted { phase, .. } => {
            println!("\n{} interrupted.", phase.label());
            terminal::print_standby_menu();
        }
        Event::StatsPersistFailed { message, .. } => {
            eprintln!("warning: statistics not saved: {message}");
        }
        Event::PhaseConfirmed { .. } | Event::StateSnapshot { .. } => {}
    }
}
