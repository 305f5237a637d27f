// History command - list, edit, delete and copy recorded flights

use chrono::Datelike;
use poise::serenity_prelude as serenity;
use tracing::error;

use crate::features::logbook::{
    delete_log, duplicate_log, edit_log, load_logs, short_id, year_logs, LogbookError,
};
use crate::models::flight_log::{FlightLog, LogEdit};
use crate::utils::config::{colors, parse_date, today};
use crate::utils::formatters::{format_number, format_yen};
use crate::{Context, Error};

/// Discord embed description limit, with some headroom
const MAX_DESCRIPTION: usize = 4000;

/// Manage your recorded flights
#[poise::command(
    slash_command,
    prefix_command,
    subcommands("list", "edit", "delete", "copy")
)]
pub async fn history(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

fn entry_line(log: &FlightLog) -> String {
    format!(
        "`{}` {} {} · **{}** PP · {}",
        short_id(&log.id),
        log.date(),
        log.route_label(),
        format_number(log.pp),
        format_yen(log.price)
    )
}

/// Reply for a failed lookup or store error
async fn report(ctx: Context<'_>, action: &str, err: LogbookError) -> Result<(), Error> {
    match err {
        LogbookError::Store(e) => {
            error!("Failed to {} flight: {:?}", action, e);
            ctx.say(format!("Failed to {} the flight. Please try again.", action))
                .await?;
        }
        other => {
            ctx.send(
                poise::CreateReply::default()
                    .content(other.to_string())
                    .ephemeral(true),
            )
            .await?;
        }
    }
    Ok(())
}

/// List the flights of a year, oldest first
#[poise::command(slash_command, prefix_command)]
pub async fn list(
    ctx: Context<'_>,
    #[description = "Year to list (default: this year)"]
    #[min = 2000]
    #[max = 2100]
    year: Option<i32>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let year = year.unwrap_or_else(|| today().year());
    let logs = match load_logs(&ctx.data().store).await {
        Ok(logs) => logs,
        Err(e) => {
            error!("Failed to load flights: {:?}", e);
            ctx.say("Failed to load your flights. Please try again.").await?;
            return Ok(());
        }
    };

    let flights = year_logs(&logs, year);
    let mut description = String::new();
    let mut shown = 0;

    for log in &flights {
        let line = entry_line(log);
        if description.len() + line.len() + 1 > MAX_DESCRIPTION {
            break;
        }
        description.push_str(&line);
        description.push('\n');
        shown += 1;
    }

    if flights.is_empty() {
        description = format!("No flights recorded in {}.", year);
    } else if shown < flights.len() {
        description.push_str(&format!("…and {} more", flights.len() - shown));
    }

    let embed = serenity::CreateEmbed::new()
        .title(format!("🛫 Flight history - {}", year))
        .description(description)
        .color(colors::INFO)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "{} flight(s) · use the id with /history edit, delete or copy",
            flights.len()
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Change the date, PP or price of a flight
#[poise::command(slash_command, prefix_command)]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Flight id (at least the first 4 characters)"] id: String,
    #[description = "New boarding date (YYYY-MM-DD)"] date: Option<String>,
    #[description = "New premium points"]
    #[min = 0]
    pp: Option<u64>,
    #[description = "New price in yen"]
    #[min = 0]
    price: Option<u64>,
) -> Result<(), Error> {
    let date = match date {
        Some(input) => match parse_date(&input) {
            Some(date) => Some(date),
            None => {
                ctx.send(
                    poise::CreateReply::default()
                        .content("Invalid date format. Please use YYYY-MM-DD (e.g. 2026-05-20)")
                        .ephemeral(true),
                )
                .await?;
                return Ok(());
            }
        },
        None => None,
    };

    let changes = LogEdit { date, pp, price };
    if changes.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content("Nothing to change: give a new date, pp or price.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    match edit_log(&ctx.data().store, &id, &changes).await {
        Ok(log) => {
            let embed = serenity::CreateEmbed::new()
                .title("✏️ Flight updated")
                .description(entry_line(&log))
                .color(colors::SUCCESS);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(e) => report(ctx, "update", e).await?,
    }

    Ok(())
}

/// Delete a flight from the log
#[poise::command(slash_command, prefix_command)]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "Flight id (at least the first 4 characters)"] id: String,
) -> Result<(), Error> {
    match delete_log(&ctx.data().store, &id).await {
        Ok(log) => {
            let embed = serenity::CreateEmbed::new()
                .title("🗑️ Flight deleted")
                .description(entry_line(&log))
                .color(colors::WARNING);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(e) => report(ctx, "delete", e).await?,
    }

    Ok(())
}

/// Record a copy of an existing flight
#[poise::command(slash_command, prefix_command)]
pub async fn copy(
    ctx: Context<'_>,
    #[description = "Flight id (at least the first 4 characters)"] id: String,
) -> Result<(), Error> {
    match duplicate_log(&ctx.data().store, &id).await {
        Ok(log) => {
            let embed = serenity::CreateEmbed::new()
                .title("📋 Flight copied")
                .description(entry_line(&log))
                .color(colors::SUCCESS)
                .footer(serenity::CreateEmbedFooter::new(
                    "Edit the copy's date with /history edit",
                ));
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(e) => report(ctx, "copy", e).await?,
    }

    Ok(())
}
