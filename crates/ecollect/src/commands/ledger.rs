//! Read-only ledger listings: users and e-waste scans.

use std::sync::Arc;

use tabled::Tabled;

use ecollect_core::{LedgerController, ListQuery, StatusFilter};

use crate::cli::LedgerListArgs;
use crate::commands::Ctx;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "USERNAME")]
    username: String,
    #[tabled(rename = "POINTS")]
    points: i64,
}

#[derive(Tabled)]
struct EwasteRow {
    #[tabled(rename = "USER")]
    user: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "PHP")]
    php_value: String,
    #[tabled(rename = "POINTS")]
    points: i64,
}

fn ledger_for(ctx: &Ctx, args: &LedgerListArgs) -> LedgerController {
    let query = ListQuery {
        page: args.page,
        limit: args.limit.unwrap_or(ctx.config.page_limit),
        search: args.search.clone().unwrap_or_default(),
        status: StatusFilter::All,
    };
    LedgerController::with_query(Arc::clone(&ctx.client), query)
}

pub async fn users(ctx: &Ctx, args: LedgerListArgs) -> Result<(), CliError> {
    let rows = ledger_for(ctx, &args).users().await?;

    let rendered = output::render_list(
        ctx.output,
        &rows,
        |user| UserRow {
            id: user.id.clone(),
            name: user.full_name.clone(),
            username: user.username.clone(),
            points: user.points,
        },
        |user| user.id.clone(),
    );
    output::print_output(&rendered, false);
    Ok(())
}

pub async fn ewaste(ctx: &Ctx, args: LedgerListArgs) -> Result<(), CliError> {
    let rows = ledger_for(ctx, &args).ewaste().await?;

    let rendered = output::render_list(
        ctx.output,
        &rows,
        |entry| EwasteRow {
            user: entry.user_name.clone().unwrap_or_else(|| "N/A".into()),
            date: entry.scanned_date.format("%Y-%m-%d").to_string(),
            category: entry.category.clone(),
            php_value: format!("{:.2}", entry.php_value),
            points: entry.points,
        },
        |entry| entry.id.clone(),
    );
    output::print_output(&rendered, false);
    Ok(())
}
