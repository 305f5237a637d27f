// Optimizer command - best payment method for mile earning

use poise::serenity_prelude as serenity;

use crate::features::mile_optimizer::{strategy, Shop};
use crate::utils::config::colors;
use crate::utils::formatters::{format_number, format_yen};
use crate::{Context, Error};

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum ShopChoice {
    #[name = "Yoshinoya"]
    Yoshinoya,
    #[name = "Yayoiken"]
    Yayoiken,
    #[name = "Rairaitei"]
    Rairaitei,
    #[name = "Train ticket"]
    TrainTicket,
    #[name = "Other"]
    Other,
}

impl From<ShopChoice> for Shop {
    fn from(choice: ShopChoice) -> Self {
        match choice {
            ShopChoice::Yoshinoya => Shop::Yoshinoya,
            ShopChoice::Yayoiken => Shop::Yayoiken,
            ShopChoice::Rairaitei => Shop::Rairaitei,
            ShopChoice::TrainTicket => Shop::TrainTicket,
            ShopChoice::Other => Shop::Other,
        }
    }
}

/// Which payment method earns the most miles
#[poise::command(slash_command, prefix_command)]
pub async fn optimizer(
    ctx: Context<'_>,
    #[description = "Amount to pay in yen"]
    #[min = 0]
    amount: u64,
    #[description = "Where you are paying"] shop: ShopChoice,
) -> Result<(), Error> {
    let shop = Shop::from(shop);
    let best = strategy(shop, amount);

    let embed = serenity::CreateEmbed::new()
        .title(format!("💳 {} · {}", shop.label(), format_yen(amount)))
        .description(format!("Pay with **{}**", best.method))
        .field("Rate", best.rate_label(), true)
        .field("Miles earned", format_number(best.miles), true)
        .color(colors::INFO);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
