//! Line-based terminal front end.
//!
//! One thread emits a tick every second, another forwards stdin lines. Both
//! feed a single channel, so the session sees input strictly in arrival
//! order. The confirmation prompt reads from the same channel and drops the
//! ticks that arrive while it waits.
//!
//! Whenever a countdown starts the ticker restarts its period, so the first
//! second of a phase is a full second. Ticks carry the generation they were
//! emitted for; ticks from before the restart are discarded.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::debug;
use ttm_core::{ConfirmationPrompt, InputSource, Phase, SchedulerEvent};

#[derive(Debug)]
enum Signal {
    Tick(u64),
    Line(String),
    Closed,
}

/// Keyboard command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(Phase),
    Interrupt,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "t" | "task" => Some(Command::Select(Phase::TaskPeriod)),
        "s" | "short" => Some(Command::Select(Phase::ShortBreak)),
        "l" | "long" => Some(Command::Select(Phase::LongBreak)),
        "i" | "interrupt" => Some(Command::Interrupt),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

pub fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

pub fn print_standby_menu() {
    println!("[t] task  [s] short break  [l] long break  [q] quit");
}

pub fn print_running_menu() {
    println!("[i] interrupt  [q] quit");
}

pub struct TerminalShell {
    rx: Receiver<Signal>,
    restart: Sender<u64>,
    generation: u64,
    closed: bool,
}

impl TerminalShell {
    /// Start the ticker and stdin reader threads.
    pub fn spawn(tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let (restart, restarts) = mpsc::channel();

        let ticker = tx.clone();
        thread::spawn(move || {
            let mut generation = 0;
            loop {
                match restarts.recv_timeout(tick) {
                    Ok(next) => generation = next,
                    Err(RecvTimeoutError::Timeout) => {
                        if ticker.send(Signal::Tick(generation)).is_err() {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(Signal::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(Signal::Closed);
        });

        Self::with_channels(rx, restart)
    }

    fn with_channels(rx: Receiver<Signal>, restart: Sender<u64>) -> Self {
        Self {
            rx,
            restart,
            generation: 0,
            closed: false,
        }
    }

    /// Restart the tick period for a countdown that starts now.
    fn realign(&mut self) {
        self.generation += 1;
        if self.restart.send(self.generation).is_err() {
            debug!("ticker thread gone");
        }
    }

    fn recv(&mut self) -> Option<Signal> {
        loop {
            if self.closed {
                return None;
            }
            match self.rx.recv() {
                Ok(Signal::Closed) | Err(_) => {
                    self.closed = true;
                    return None;
                }
                Ok(Signal::Tick(generation)) if generation != self.generation => {}
                Ok(signal) => return Some(signal),
            }
        }
    }
}

impl InputSource for TerminalShell {
    fn next_event(&mut self) -> Option<SchedulerEvent> {
        loop {
            match self.recv()? {
                Signal::Tick(_) => return Some(SchedulerEvent::Tick),
                Signal::Line(line) => match parse_command(&line) {
                    Some(Command::Select(phase)) => {
                        self.realign();
                        return Some(SchedulerEvent::SelectPhase(phase));
                    }
                    Some(Command::Interrupt) => return Some(SchedulerEvent::Interrupt),
                    Some(Command::Quit) => {
                        self.closed = true;
                        return None;
                    }
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command: {}", line.trim()),
                },
                Signal::Closed => return None,
            }
        }
    }
}

impl ConfirmationPrompt for TerminalShell {
    fn confirm(&mut self, phase: Phase) -> Option<bool> {
        print!("{} ended. Count it as completed? [y/n/q] ", phase.label());
        let _ = io::stdout().flush();
        loop {
            match self.recv()? {
                Signal::Line(line) => {
                    if parse_command(&line) == Some(Command::Quit) {
                        self.closed = true;
                        return None;
                    }
                    match parse_answer(&line) {
                        Some(answer) => {
                            // The answer starts the next countdown.
                            self.realign();
                            return Some(answer);
                        }
                        None => {
                            print!("please answer y or n: ");
                            let _ = io::stdout().flush();
                        }
                    }
                }
                Signal::Tick(_) | Signal::Closed => {}
            }
        }
    }
}
