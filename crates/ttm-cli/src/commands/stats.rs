use chrono::Local;
use clap::Subcommand;
use ttm_core::StatisticsStore;

use super::Context;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's counts, taken from the history
    Today,
    /// All-time counters
    All,
    /// Recorded history, oldest first
    History {
        /// Only show the most recent entries
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(ctx: &Context, action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let store = StatisticsStore::load(config.track_path(ctx.config_path()));
    let record = store.record();

    match action {
        StatsAction::Today => {
            let tally = record.tally_on(Local::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&tally)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(&record.totals())?);
        }
        StatsAction::History { limit } => {
            let history = record.history();
            let skip = limit.map_or(0, |n| history.len().saturating_sub(n));
            println!("{}", serde_json::to_string_pretty(&history[skip..])?);
        }
    }
    Ok(())
}
