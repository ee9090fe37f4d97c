//! Kiosk fleet command handlers.

use std::sync::Arc;

use tabled::Tabled;

use ecollect_core::{
    FleetController, FleetPage, KioskDraft, KioskStatus, KioskView, ListQuery, StatusFilter,
    StatusTier, validate_coordinates,
};

use crate::cli::{GlobalOpts, KioskFormArgs, KiosksCommand, ListArgs};
use crate::commands::{Ctx, util};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct KioskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "KIOSK #")]
    number: String,
    #[tabled(rename = "LOCATION")]
    location: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "FILL")]
    fill: String,
    #[tabled(rename = "NOW")]
    now: &'static str,
}

#[derive(Tabled)]
struct NearestRow {
    #[tabled(rename = "KIOSK #")]
    number: String,
    #[tabled(rename = "LOCATION")]
    location: String,
    #[tabled(rename = "DISTANCE")]
    distance: String,
}

fn status_cell(view: &KioskView) -> String {
    // Tier marker instead of color: survives piping and narrow terminals.
    let marker = match view.presentation.tier {
        StatusTier::Positive => "●",
        StatusTier::Warning => "◐",
        StatusTier::Neutral => "○",
    };
    format!("{marker} {}", view.kiosk.status)
}

fn to_row(view: &KioskView) -> KioskRow {
    let fill = match view.kiosk.capacity {
        Some(c) => format!("{}/{} ({}%)", c.current, c.max, view.capacity_pct),
        None => "-".into(),
    };
    KioskRow {
        id: view.kiosk.id.clone(),
        number: view.kiosk.kiosk_number.clone(),
        location: view.kiosk.location.clone(),
        status: status_cell(view),
        fill,
        now: if view.open_now { "open" } else { "closed" },
    }
}

fn print_page(ctx: &Ctx, page: &FleetPage, quiet: bool) {
    let rendered = output::render_list(ctx.output, &page.kiosks, to_row, |view| {
        view.kiosk.id.clone()
    });
    output::print_output(&rendered, false);
    if !quiet {
        eprintln!(
            "page {} of {} ({} kiosks total)",
            page.page, page.total_pages, page.total_kiosks
        );
    }
}

fn parse_status(raw: &str) -> Result<KioskStatus, CliError> {
    raw.parse().map_err(|_| CliError::InvalidArgument {
        field: "status".into(),
        reason: format!("{raw:?} is not one of ACTIVE, INACTIVE, MAINTENANCE"),
    })
}

fn parse_filter(raw: &str) -> Result<StatusFilter, CliError> {
    raw.parse().map_err(|_| CliError::InvalidArgument {
        field: "status".into(),
        reason: format!("{raw:?} is not one of all, ACTIVE, INACTIVE, MAINTENANCE"),
    })
}

fn fleet_for(ctx: &Ctx, args: &ListArgs) -> Result<FleetController, CliError> {
    let query = ListQuery {
        page: args.page,
        limit: args.limit.unwrap_or(ctx.config.page_limit),
        search: args.search.clone().unwrap_or_default(),
        status: parse_filter(&args.status)?,
    };
    Ok(FleetController::with_query(Arc::clone(&ctx.client), query))
}

fn draft_from(form: KioskFormArgs) -> KioskDraft {
    KioskDraft {
        kiosk_number: form.kiosk_number,
        location: form.location,
        latitude: form.lat,
        longitude: form.lng,
        status: form.status,
        capacity_current: form.capacity_current,
        capacity_max: form.capacity_max,
        open_time: form.open,
        close_time: form.close,
        description: form.description,
    }
}

pub async fn handle(ctx: &Ctx, cmd: KiosksCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        KiosksCommand::List(args) => {
            let fleet = fleet_for(ctx, &args)?;
            let page = fleet.list().await?;
            print_page(ctx, &page, global.quiet);
            Ok(())
        }

        KiosksCommand::Add(form) => {
            let fleet = FleetController::new(Arc::clone(&ctx.client));
            let page = fleet.create(&draft_from(form)).await?;
            if !global.quiet {
                eprintln!("Kiosk created.");
            }
            print_page(ctx, &page, global.quiet);
            Ok(())
        }

        KiosksCommand::Update { id, form } => {
            let fleet = FleetController::new(Arc::clone(&ctx.client));
            let page = fleet.update(&id, &draft_from(form)).await?;
            if !global.quiet {
                eprintln!("Kiosk updated.");
            }
            print_page(ctx, &page, global.quiet);
            Ok(())
        }

        KiosksCommand::SetStatus { id, status } => {
            let status = parse_status(&status)?;
            let fleet = FleetController::new(Arc::clone(&ctx.client));
            let page = fleet.set_status(&id, status).await?;
            if !global.quiet {
                eprintln!("Status set to {status}.");
            }
            print_page(ctx, &page, global.quiet);
            Ok(())
        }

        KiosksCommand::Toggle { id } => {
            let fleet = FleetController::new(Arc::clone(&ctx.client));
            let page = fleet.toggle_status(&id).await?;
            if !global.quiet {
                eprintln!("Status toggled.");
            }
            print_page(ctx, &page, global.quiet);
            Ok(())
        }

        KiosksCommand::Remove { id } => {
            if !util::confirm(
                &format!("Delete kiosk '{id}'? This is destructive."),
                global.yes,
            )? {
                return Ok(());
            }
            let fleet = FleetController::new(Arc::clone(&ctx.client));
            let page = fleet.remove(&id).await?;
            if !global.quiet {
                eprintln!("Kiosk deleted.");
            }
            print_page(ctx, &page, global.quiet);
            Ok(())
        }

        KiosksCommand::Nearest { lat, lng } => {
            let from = validate_coordinates(&lat, &lng)
                .map_err(|violations| CliError::from(ecollect_core::CoreError::Validation(violations)))?;

            let fleet = FleetController::new(Arc::clone(&ctx.client));
            let rows = fleet.nearest(from).await?;

            let rendered = output::render_list(
                ctx.output,
                &rows,
                |(view, km)| NearestRow {
                    number: view.kiosk.kiosk_number.clone(),
                    location: view.kiosk.location.clone(),
                    distance: format!("{km:.1} km"),
                },
                |(view, _)| view.kiosk.id.clone(),
            );
            output::print_output(&rendered, false);
            Ok(())
        }
    }
}
