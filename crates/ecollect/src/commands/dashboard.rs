//! Dashboard command: one-shot stats or live watch mode.

use owo_colors::OwoColorize;
use tabled::Tabled;

use ecollect_core::{DashboardPoller, DashboardState};

use crate::cli::{DashboardArgs, GlobalOpts, OutputFormat};
use crate::commands::Ctx;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "COUNT")]
    count: u64,
}

pub async fn handle(ctx: &Ctx, args: DashboardArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let poller = DashboardPoller::new(ctx.client.clone(), ctx.config.poll_interval);
    let mut rx = poller.subscribe();

    if !args.watch {
        poller.refresh_once().await?;
        print_state(&rx.borrow().clone(), ctx.output, global.quiet);
        return Ok(());
    }

    // The poll loop owns the fetching; we just reprint on every update
    // until the operator interrupts.
    let handle = poller.activate();
    loop {
        if rx.changed().await.is_err() {
            break;
        }
        print_state(&rx.borrow().clone(), ctx.output, global.quiet);
    }
    poller.deactivate();
    let _ = handle.await;
    Ok(())
}

fn print_state(state: &DashboardState, format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Table | OutputFormat::Plain => print_human(state, quiet),
        _ => {
            let value = state_as_json(state);
            let rendered = output::render_single(format, &value, |_| String::new());
            output::print_output(&rendered, quiet);
        }
    }
}

fn state_as_json(state: &DashboardState) -> serde_json::Value {
    serde_json::json!({
        "stats": state.stats,
        "categories": state.categories,
        "lastUpdated": state.last_updated,
        "lastError": state.last_error,
    })
}

fn print_human(state: &DashboardState, quiet: bool) {
    if let Some(ref stats) = state.stats {
        if stats.needs_collection() {
            println!(
                "Kiosk status: {}  *Collect now to ensure it's recycled properly.",
                stats.kiosk_status.red().bold()
            );
        } else {
            println!("Kiosk status: {}", stats.kiosk_status.green());
        }
        println!(
            "kiosks: {}   users: {}   ewaste: {}",
            stats.kiosks, stats.users, stats.ewaste
        );
    }

    if state.categories.is_empty() {
        println!("No e-waste category data to display yet.");
    } else {
        let rows: Vec<CategoryRow> = state
            .categories
            .iter()
            .map(|c| CategoryRow {
                category: c.category.clone(),
                count: c.count,
            })
            .collect();
        let table = tabled::Table::new(rows)
            .with(tabled::settings::Style::rounded())
            .to_string();
        println!("{table}");
    }

    if !quiet {
        if let Some(updated) = state.last_updated {
            eprintln!("last updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        if let Some(ref error) = state.last_error {
            eprintln!("{} {error}", "error:".red());
        }
    }
}
