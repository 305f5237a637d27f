// Target command - choose the status you are working toward

use poise::serenity_prelude as serenity;
use tracing::error;

use crate::features::logbook::{load_target, save_target};
use crate::models::stats::TargetStatus;
use crate::utils::config::colors;
use crate::utils::formatters::format_number;
use crate::{Context, Error};

/// Target status choices
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum TargetChoice {
    #[name = "Bronze (Life Solution) - 15,000 PP"]
    BronzeLs,
    #[name = "Bronze (standard) - 30,000 PP"]
    BronzeStd,
    #[name = "Platinum (Life Solution) - 30,000 PP"]
    PlatinumLs,
    #[name = "Platinum / SFC (standard) - 50,000 PP"]
    PlatinumStd,
    #[name = "Diamond (LS / ¥5M) - 50,000 PP"]
    DiamondLs5m,
    #[name = "Diamond (LS / ¥4M) - 80,000 PP"]
    DiamondLs4m,
    #[name = "Diamond (standard) - 100,000 PP"]
    DiamondStd,
}

impl From<TargetChoice> for TargetStatus {
    fn from(choice: TargetChoice) -> Self {
        match choice {
            TargetChoice::BronzeLs => TargetStatus::BronzeLs,
            TargetChoice::BronzeStd => TargetStatus::BronzeStd,
            TargetChoice::PlatinumLs => TargetStatus::PlatinumLs,
            TargetChoice::PlatinumStd => TargetStatus::PlatinumStd,
            TargetChoice::DiamondLs5m => TargetStatus::DiamondLs5m,
            TargetChoice::DiamondLs4m => TargetStatus::DiamondLs4m,
            TargetChoice::DiamondStd => TargetStatus::DiamondStd,
        }
    }
}

/// Manage your target status
#[poise::command(slash_command, prefix_command, subcommands("set", "show"))]
pub async fn target(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Set the status you are aiming for
#[poise::command(slash_command, prefix_command)]
pub async fn set(
    ctx: Context<'_>,
    #[description = "Target status"] status: TargetChoice,
) -> Result<(), Error> {
    let target = TargetStatus::from(status);

    if let Err(e) = save_target(&ctx.data().store, target).await {
        error!("Failed to save target: {:?}", e);
        ctx.say("Failed to save your target. Please try again.").await?;
        return Ok(());
    }

    let embed = serenity::CreateEmbed::new()
        .title("🎯 Target updated")
        .description(format!(
            "Now aiming for **{}** ({} PP)",
            target.label(),
            format_number(target.pp())
        ))
        .color(colors::SUCCESS);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Show the current target and every available status
#[poise::command(slash_command, prefix_command)]
pub async fn show(ctx: Context<'_>) -> Result<(), Error> {
    let current = match load_target(&ctx.data().store).await {
        Ok(target) => target,
        Err(e) => {
            error!("Failed to load target: {:?}", e);
            ctx.say("Failed to load your target. Please try again.").await?;
            return Ok(());
        }
    };

    let statuses: Vec<String> = TargetStatus::ALL
        .iter()
        .map(|t| {
            let marker = if *t == current { "▶" } else { "•" };
            format!("{} {} - {} PP", marker, t.label(), format_number(t.pp()))
        })
        .collect();

    let embed = serenity::CreateEmbed::new()
        .title("🎯 Target status")
        .description(format!("Current target: **{}**", current.label()))
        .field("Statuses", statuses.join("\n"), false)
        .color(colors::PRIMARY);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
