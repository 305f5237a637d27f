// Dashboard command - yearly PP progress toward the target status

use chrono::Datelike;
use poise::serenity_prelude as serenity;
use tracing::error;

use crate::features::logbook::{load_logs, load_target, year_logs};
use crate::models::stats::YearSummary;
use crate::utils::config::{colors, today};
use crate::utils::formatters::{
    format_number, format_unit_price, format_yen, progress_bar, truncate,
};
use crate::utils::visualizations::generate_monthly_chart;
use crate::{Context, Error};

/// Most recent flights shown in the embed
const RECENT_FLIGHTS: usize = 10;

/// View your yearly premium point progress
#[poise::command(slash_command, prefix_command)]
pub async fn dashboard(
    ctx: Context<'_>,
    #[description = "Year to show (default: this year)"]
    #[min = 2000]
    #[max = 2100]
    year: Option<i32>,
    #[description = "Attach a monthly PP chart"] chart: Option<bool>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let store = &ctx.data().store;
    let year = year.unwrap_or_else(|| today().year());

    let (logs, target) = match (load_logs(store).await, load_target(store).await) {
        (Ok(logs), Ok(target)) => (logs, target),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to load dashboard data: {:?}", e);
            ctx.say("Failed to load your flight data. Please try again.").await?;
            return Ok(());
        }
    };

    let summary = YearSummary::from_logs(&logs, year, target);
    let flights = year_logs(&logs, year);

    let status = if summary.achieved() {
        format!("🎉 **{}** achieved!", target.label())
    } else {
        format!(
            "**{}** PP to go for {}",
            format_number(summary.remaining_pp),
            target.label()
        )
    };

    let history = if flights.is_empty() {
        "No flights recorded for this year yet. Use `/flight save`!".to_string()
    } else {
        let mut lines: Vec<String> = flights
            .iter()
            .rev()
            .take(RECENT_FLIGHTS)
            .map(|log| {
                format!(
                    "{} {} · {} PP",
                    log.date().format("%m/%d"),
                    truncate(&log.route_label(), 48),
                    format_number(log.pp)
                )
            })
            .collect();
        if flights.len() > RECENT_FLIGHTS {
            lines.push(format!(
                "…and {} more (`/history list`)",
                flights.len() - RECENT_FLIGHTS
            ));
        }
        lines.join("\n")
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("✈️ SFC Dashboard - {}", year))
        .description(format!(
            "{}\n{} / {} PP\n{}",
            progress_bar(summary.progress_percent),
            format_number(summary.current_pp),
            format_number(target.pp()),
            status
        ))
        .color(if summary.achieved() {
            colors::SUCCESS
        } else {
            colors::PRIMARY
        })
        .field("Flights", summary.flights.to_string(), true)
        .field("Spent", format_yen(summary.spent), true)
        .field(
            "Average unit price",
            format_unit_price(summary.average_unit_price),
            true,
        )
        .field("Flight history", history, false);

    let mut reply = poise::CreateReply::default();

    if chart.unwrap_or(false) {
        match generate_monthly_chart(&summary.monthly_pp, year) {
            Ok(png_bytes) => {
                let attachment = serenity::CreateAttachment::bytes(png_bytes, "monthly_pp.png");
                embed = embed.image("attachment://monthly_pp.png");
                reply = reply.attachment(attachment);
            }
            Err(e) => {
                error!("Chart generation failed: {}", e);
                embed = embed.footer(serenity::CreateEmbedFooter::new(
                    "Chart unavailable for this year.",
                ));
            }
        }
    }

    ctx.send(reply.embed(embed)).await?;

    Ok(())
}
