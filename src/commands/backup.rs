// Backup command - export, import and clear the flight log

use poise::serenity_prelude as serenity;
use tracing::{error, warn};

use crate::features::backup::{export_from_store, import_into_store, BackupError};
use crate::features::logbook::clear_logs;
use crate::utils::config::{colors, today};
use crate::{Context, Error};

const MAX_FILE_SIZE: u32 = 8 * 1024 * 1024; // 8MB Discord limit

/// Back up or restore your flight log
#[poise::command(
    slash_command,
    prefix_command,
    subcommands("export", "import", "clear")
)]
pub async fn backup(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Download the whole flight log as a JSON file
#[poise::command(slash_command, prefix_command)]
pub async fn export(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    match export_from_store(&ctx.data().store, today()).await {
        Ok(file) => {
            let content = format!(
                "💾 Backup of **{}** flight(s). Keep this file to restore with `/backup import`.",
                file.entries
            );
            let attachment = serenity::CreateAttachment::bytes(file.content, file.file_name);
            ctx.send(
                poise::CreateReply::default()
                    .content(content)
                    .attachment(attachment),
            )
            .await?;
        }
        Err(BackupError::Store(e)) => {
            error!("Failed to export backup: {:?}", e);
            ctx.say("Failed to export your flights. Please try again.").await?;
        }
        Err(e) => {
            ctx.say(e.to_string()).await?;
        }
    }

    Ok(())
}

/// Replace the flight log with a backup file
#[poise::command(slash_command)]
pub async fn import(
    ctx: Context<'_>,
    #[description = "Backup file (sfc_backup_YYYY-MM-DD.json)"] file: serenity::Attachment,
) -> Result<(), Error> {
    ctx.defer().await?;

    if file.size > MAX_FILE_SIZE {
        ctx.say("Error: the file is too large to be a flight backup.").await?;
        return Ok(());
    }

    let bytes = match file.download().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to download backup {}: {:?}", file.filename, e);
            ctx.say(BackupError::Unreadable.to_string()).await?;
            return Ok(());
        }
    };

    match import_into_store(&ctx.data().store, &bytes).await {
        Ok(count) => {
            let embed = serenity::CreateEmbed::new()
                .title("📥 Backup restored")
                .description(format!(
                    "Imported **{}** flight(s) from `{}`.",
                    count, file.filename
                ))
                .color(colors::SUCCESS);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(BackupError::Store(e)) => {
            error!("Failed to store imported backup: {:?}", e);
            ctx.say("Failed to import the backup. Your flights were not changed.")
                .await?;
        }
        Err(e) => {
            let embed = serenity::CreateEmbed::new()
                .title("Import failed")
                .description(format!("{}\nYour flights were not changed.", e))
                .color(colors::ERROR);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}

/// Delete every recorded flight
#[poise::command(slash_command, prefix_command)]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Set to true to really delete all flights"] confirm: bool,
) -> Result<(), Error> {
    if !confirm {
        ctx.send(
            poise::CreateReply::default()
                .content("Nothing deleted. Run `/backup clear confirm:true` to delete all flights.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    match clear_logs(&ctx.data().store).await {
        Ok(true) => {
            let embed = serenity::CreateEmbed::new()
                .title("🧹 Flight log cleared")
                .description("All recorded flights were deleted.")
                .color(colors::WARNING);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(false) => {
            ctx.say("There were no flights to delete.").await?;
        }
        Err(e) => {
            error!("Failed to clear flights: {:?}", e);
            ctx.say("Failed to clear your flights. Please try again.").await?;
        }
    }

    Ok(())
}
