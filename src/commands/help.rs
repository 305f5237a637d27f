// Help command - show usage guide

use poise::serenity_prelude as serenity;
use crate::{Context, Error};
use crate::utils::config::colors;

/// Show help and usage guide
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title("✈️ SFC Tracker - Help")
        .description("Premium point calculator and flight log for the SFC status run")
        .color(colors::PRIMARY)
        .field(
            "🧮 Calculator",
            "`/flight calc` - PP, unit price and breakdown for a route\n\
            `/flight save` - Calculate and record it (round trips record two flights)",
            false,
        )
        .field(
            "📊 Progress",
            "`/dashboard` - Yearly progress toward your target\n\
            `/dashboard chart:true` - With a monthly PP chart\n\
            `/target set` / `/target show` - Choose your target status",
            false,
        )
        .field(
            "🛫 Flight log",
            "`/history list` - Flights of a year\n\
            `/history edit` / `delete` / `copy` - Manage a flight by id",
            false,
        )
        .field(
            "💾 Backup",
            "`/backup export` - Download your log as JSON\n\
            `/backup import` - Restore from a backup file (replaces the log)\n\
            `/backup clear confirm:true` - Delete every flight",
            false,
        )
        .field(
            "💳 Extras",
            "`/optimizer` - Best payment method for earning miles",
            false,
        )
        .field(
            "💯 Points",
            "• Each section: floor(miles × rate × 2) + boarding bonus\n\
            • Connections with table distances count each section separately\n\
            • Round trips earn the one-way points twice",
            false,
        )
        .footer(serenity::CreateEmbedFooter::new(
            "Built with Serenity & Poise",
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
