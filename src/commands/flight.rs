// Flight command - premium point calculator and flight recording

use poise::serenity_prelude as serenity;
use ::serenity::model::application::{CommandDataOption, CommandDataOptionValue};
use tracing::{debug, error};

use crate::features::logbook::{append_logs, plan_entries, short_id, SavePlan};
use crate::utils::airports;
use crate::utils::config::{colors, parse_date, today};
use crate::utils::fares::{BoardingBonus, FareEra, FareSelection};
use crate::utils::formatters::{format_number, format_unit_price, format_yen};
use crate::utils::mileage::MileageTable;
use crate::utils::pp::{compute_pp, Breakdown, PpInput, PpResult, Route, SegmentPoints, TripType};
use crate::{Context, Error};

/// Fare era choices
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum EraChoice {
    #[name = "Legacy fares (until 5/18)"]
    Legacy,
    #[name = "Current fares (from 5/19)"]
    Current,
}

impl From<EraChoice> for FareEra {
    fn from(choice: EraChoice) -> Self {
        match choice {
            EraChoice::Legacy => FareEra::Legacy,
            EraChoice::Current => FareEra::Current,
        }
    }
}

/// Boarding bonus override
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum BonusChoice {
    #[name = "No bonus (0)"]
    None,
    #[name = "Transit bonus (200)"]
    Transit,
    #[name = "Full bonus (400)"]
    Full,
}

impl From<BonusChoice> for BoardingBonus {
    fn from(choice: BonusChoice) -> Self {
        match choice {
            BonusChoice::None => BoardingBonus::None,
            BonusChoice::Transit => BoardingBonus::Transit,
            BonusChoice::Full => BoardingBonus::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum TripChoice {
    #[name = "One-way"]
    OneWay,
    #[name = "Round trip"]
    RoundTrip,
}

impl From<TripChoice> for TripType {
    fn from(choice: TripChoice) -> Self {
        match choice {
            TripChoice::OneWay => TripType::OneWay,
            TripChoice::RoundTrip => TripType::RoundTrip,
        }
    }
}

/// Calculator inputs shared by `calc` and `save`
struct Calculation {
    route: Route,
    distance_override: Option<u32>,
    fare: FareSelection,
    trip_type: TripType,
    ticket_price: u64,
    result: PpResult,
}

impl Calculation {
    #[allow(clippy::too_many_arguments)]
    fn run(
        origin: &str,
        destination: &str,
        via: Option<&str>,
        era: Option<EraChoice>,
        fare: Option<&str>,
        bonus: Option<BonusChoice>,
        distance: Option<u32>,
        trip: Option<TripChoice>,
        price: Option<u64>,
    ) -> Self {
        let route = Route::new(origin, via, destination);

        let mut selection = FareSelection::new(FareEra::default());
        if let Some(era) = era {
            selection.switch_era(era.into());
        }
        if let Some(key) = fare {
            selection.select_fare(key);
        }
        if let Some(bonus) = bonus {
            selection.override_bonus(bonus.into());
        }

        let trip_type = trip.map(TripType::from).unwrap_or_default();
        let ticket_price = price.unwrap_or(0);

        let result = compute_pp(
            &PpInput {
                route: &route,
                fare: &selection,
                distance_override: distance,
                trip_type,
                ticket_price,
            },
            MileageTable::builtin(),
        );

        debug!(
            "PP for {}-{}: base {} total {}",
            route.origin, route.destination, result.base_pp, result.total_pp
        );

        Self {
            route,
            distance_override: distance,
            fare: selection,
            trip_type,
            ticket_price,
            result,
        }
    }

    fn embed(&self) -> serenity::CreateEmbed {
        let fare = self.fare.fare();
        let result = &self.result;

        let table_distance = self.route.default_distance(MileageTable::builtin());
        let distance_text = match self.distance_override {
            Some(miles) if miles != table_distance => format!(
                "{} mi (table: {} mi)",
                format_number(miles as u64),
                format_number(table_distance as u64)
            ),
            _ => format!("{} mi", format_number(result.distance as u64)),
        };

        let mut route_text = route_line(&self.route);
        if self.trip_type == TripType::RoundTrip {
            route_text.push('\n');
            route_text.push_str(&route_line(&self.route.reversed()));
        }

        serenity::CreateEmbed::new()
            .title(format!("✈️ {} PP", format_number(result.total_pp)))
            .description(route_text)
            .color(colors::FLIGHT)
            .field(
                "Fare",
                format!(
                    "{} `{}`\n{} (×{:.2}, bonus {})",
                    fare.label,
                    self.fare.fare_key(),
                    self.fare.era().label(),
                    fare.rate(),
                    self.fare.bonus().points()
                ),
                false,
            )
            .field("Distance", distance_text, true)
            .field("Trip", self.trip_type.label(), true)
            .field("One-way PP", format_number(result.base_pp), true)
            .field("Price", format_yen(self.ticket_price), true)
            .field("Unit price", format_unit_price(result.per_point_price), true)
            .field("Breakdown", breakdown_text(result), false)
    }
}

fn route_line(route: &Route) -> String {
    match &route.via {
        Some(via) => format!(
            "{} → {} → {}",
            airports::display_name(&route.origin),
            airports::display_name(via),
            airports::display_name(&route.destination)
        ),
        None => format!(
            "{} → {}",
            airports::display_name(&route.origin),
            airports::display_name(&route.destination)
        ),
    }
}

fn segment_line(segment: &SegmentPoints, rate_percent: u32) -> String {
    format!(
        "{}-{}: {} mi × {}% × 2 = {} + {} = **{}**",
        segment.from,
        segment.to,
        format_number(segment.miles as u64),
        rate_percent,
        format_number(segment.flown),
        segment.bonus,
        format_number(segment.points)
    )
}

fn breakdown_text(result: &PpResult) -> String {
    let rate = result.rate_percent;
    let mut text = match &result.breakdown {
        Breakdown::Direct(segment) => segment_line(segment, rate),
        Breakdown::Segmented([first, second]) => format!(
            "{}\n{}",
            segment_line(first, rate),
            segment_line(second, rate)
        ),
        Breakdown::Combined {
            miles,
            flown,
            bonus,
            points,
        } => format!(
            "Total {} mi × {}% × 2 = {} + {} (2 sections) = **{}**",
            format_number(*miles as u64),
            rate,
            format_number(*flown),
            bonus,
            format_number(*points)
        ),
    };

    if result.total_pp != result.base_pp {
        text.push_str(&format!(
            "\nRound trip: {} × 2 = **{}**",
            format_number(result.base_pp),
            format_number(result.total_pp)
        ));
    }
    text
}

/// Premium point calculator
#[poise::command(slash_command, prefix_command, subcommands("calc", "save"))]
pub async fn flight(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Calculate the premium points for a flight
#[poise::command(slash_command, prefix_command)]
pub async fn calc(
    ctx: Context<'_>,
    #[description = "Departure airport"]
    #[autocomplete = "autocomplete_airport"]
    origin: String,
    #[description = "Arrival airport"]
    #[autocomplete = "autocomplete_airport"]
    destination: String,
    #[description = "Connecting airport (optional)"]
    #[autocomplete = "autocomplete_airport"]
    via: Option<String>,
    #[description = "Fare era (default: legacy)"] era: Option<EraChoice>,
    #[description = "Fare type"]
    #[autocomplete = "autocomplete_fare"]
    fare: Option<String>,
    #[description = "Override the boarding bonus"] bonus: Option<BonusChoice>,
    #[description = "Override the total one-way distance (miles)"]
    #[min = 0]
    distance: Option<u32>,
    #[description = "One-way or round trip"] trip: Option<TripChoice>,
    #[description = "Ticket price in yen (round-trip total for round trips)"]
    #[min = 0]
    price: Option<u64>,
) -> Result<(), Error> {
    let calculation = Calculation::run(
        &origin,
        &destination,
        via.as_deref(),
        era,
        fare.as_deref(),
        bonus,
        distance,
        trip,
        price,
    );

    ctx.send(poise::CreateReply::default().embed(calculation.embed()))
        .await?;

    Ok(())
}

/// Calculate and record a flight in your log
#[poise::command(slash_command, prefix_command)]
pub async fn save(
    ctx: Context<'_>,
    #[description = "Departure airport"]
    #[autocomplete = "autocomplete_airport"]
    origin: String,
    #[description = "Arrival airport"]
    #[autocomplete = "autocomplete_airport"]
    destination: String,
    #[description = "Connecting airport (optional)"]
    #[autocomplete = "autocomplete_airport"]
    via: Option<String>,
    #[description = "Fare era (default: legacy)"] era: Option<EraChoice>,
    #[description = "Fare type"]
    #[autocomplete = "autocomplete_fare"]
    fare: Option<String>,
    #[description = "Override the boarding bonus"] bonus: Option<BonusChoice>,
    #[description = "Override the total one-way distance (miles)"]
    #[min = 0]
    distance: Option<u32>,
    #[description = "One-way or round trip"] trip: Option<TripChoice>,
    #[description = "Ticket price in yen (round-trip total for round trips)"]
    #[min = 0]
    price: Option<u64>,
    #[description = "Boarding date (YYYY-MM-DD, default: today)"] date: Option<String>,
    #[description = "Return boarding date (YYYY-MM-DD, default: boarding date)"]
    return_date: Option<String>,
) -> Result<(), Error> {
    // Absent means today; given but blank or malformed means missing
    let date = match date {
        Some(input) => parse_date(&input),
        None => Some(today()),
    };
    let return_date = match return_date {
        Some(input) => parse_date(&input),
        None => date,
    };

    let calculation = Calculation::run(
        &origin,
        &destination,
        via.as_deref(),
        era,
        fare.as_deref(),
        bonus,
        distance,
        trip,
        price,
    );

    let entries = match plan_entries(&SavePlan {
        route: &calculation.route,
        result: &calculation.result,
        trip_type: calculation.trip_type,
        ticket_price: calculation.ticket_price,
        date,
        return_date,
    }) {
        Ok(entries) => entries,
        Err(e) => {
            ctx.send(poise::CreateReply::default().content(e.to_string()).ephemeral(true))
                .await?;
            return Ok(());
        }
    };

    ctx.defer().await?;

    let saved: Vec<String> = entries
        .iter()
        .map(|log| {
            format!(
                "`{}` {} {} · {} PP · {}",
                short_id(&log.id),
                log.date(),
                log.route_label(),
                format_number(log.pp),
                format_yen(log.price)
            )
        })
        .collect();

    match append_logs(&ctx.data().store, entries).await {
        Ok(total) => {
            let embed = calculation
                .embed()
                .color(colors::SUCCESS)
                .field(
                    format!("Saved to log ({} flights total)", total),
                    saved.join("\n"),
                    false,
                );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(e) => {
            error!("Failed to save flight: {:?}", e);
            ctx.say("Failed to save the flight. Please try again.").await?;
        }
    }

    Ok(())
}

/// Autocomplete airports by code or name
async fn autocomplete_airport<'a>(
    _ctx: Context<'a>,
    partial: &'a str,
) -> impl Iterator<Item = serenity::AutocompleteChoice> + 'a {
    airports::search(partial)
        .into_iter()
        .take(25)
        .map(|airport| {
            serenity::AutocompleteChoice::new(
                format!("{} ({})", airport.name, airport.code),
                airport.code,
            )
        })
}

/// Autocomplete fares from the era picked in the same command
async fn autocomplete_fare<'a>(
    ctx: Context<'a>,
    partial: &'a str,
) -> impl Iterator<Item = serenity::AutocompleteChoice> + 'a {
    let era = if let poise::Context::Application(app_ctx) = ctx {
        find_option(&app_ctx.interaction.data.options, "era")
            .and_then(|value| match value {
                CommandDataOptionValue::Integer(1) => Some(FareEra::Current),
                CommandDataOptionValue::Integer(_) => Some(FareEra::Legacy),
                CommandDataOptionValue::String(s) => s.parse().ok(),
                _ => None,
            })
            .unwrap_or_default()
    } else {
        FareEra::default()
    };

    let partial = partial.to_lowercase();
    era.fares()
        .iter()
        .filter(move |f| {
            f.key.contains(&partial) || f.label.to_lowercase().contains(&partial)
        })
        .map(|f| serenity::AutocompleteChoice::new(f.label, f.key))
}

/// Option value by name, looking inside subcommands
fn find_option<'a>(
    options: &'a [CommandDataOption],
    name: &str,
) -> Option<&'a CommandDataOptionValue> {
    for option in options {
        if option.name == name {
            return Some(&option.value);
        }
        if let CommandDataOptionValue::SubCommand(nested) = &option.value {
            if let Some(value) = find_option(nested, name) {
                return Some(value);
            }
        }
    }
    None
}
