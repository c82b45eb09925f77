use std::io::{self, Write};

use clap::{Args, Subcommand};
use decimal_percentage::Percentage;
use jiff::{Zoned, civil::Date};
use petshop::{
    fixtures::products::parse_price,
    subscriptions::{DeliveryFrequency, NewSubscription, ProductUuid, Subscription, UserUuid},
};
use rusty_money::Money;

use super::write_failed;

#[derive(Debug, Args)]
pub(crate) struct SubscriptionCommand {
    #[command(subcommand)]
    command: SubscriptionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SubscriptionSubcommand {
    /// Show upcoming deliveries and the discounted price
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
struct PreviewArgs {
    /// Delivery cadence
    #[arg(long, value_enum, default_value_t = DeliveryFrequency::Monthly)]
    frequency: DeliveryFrequency,

    /// Signup date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start: Option<Date>,

    /// Number of deliveries to show
    #[arg(long, default_value_t = 4)]
    deliveries: u32,

    /// Product price, e.g. "45.99 USD"
    #[arg(long)]
    price: String,

    /// Discount in percent, e.g. 10
    #[arg(long)]
    discount: Option<f64>,

    /// Ship deliveries free
    #[arg(long)]
    free_shipping: bool,
}

pub(crate) fn run(command: &SubscriptionCommand) -> Result<(), String> {
    match &command.command {
        SubscriptionSubcommand::Preview(args) => preview(args),
    }
}

fn preview(args: &PreviewArgs) -> Result<(), String> {
    let (minor, currency) =
        parse_price(&args.price).map_err(|error| format!("invalid price: {error}"))?;

    let price = Money::from_minor(minor, currency);

    let mut subscription = Subscription::try_from(NewSubscription {
        user: UserUuid::new(),
        product: ProductUuid::new(),
        frequency: args.frequency,
        start_date: args.start.unwrap_or_else(|| Zoned::now().date()),
        discount: args.discount.map(|percent| Percentage::from(percent / 100.0)),
        free_shipping: args.free_shipping,
    })
    .map_err(|error| format!("invalid subscription: {error}"))?;

    let each = subscription
        .discounted_price(price.clone())
        .map_err(|error| format!("failed to price subscription: {error}"))?;

    let mut out = io::stdout().lock();

    writeln!(out, "subscription: {}", subscription.uuid()).map_err(write_failed)?;
    writeln!(out, "frequency: {}", subscription.frequency()).map_err(write_failed)?;
    writeln!(out, "start: {}", subscription.start_date()).map_err(write_failed)?;
    writeln!(out, "price per delivery: {each} (list {price})").map_err(write_failed)?;
    writeln!(
        out,
        "shipping: {}",
        if subscription.free_shipping() { "free" } else { "standard" }
    )
    .map_err(write_failed)?;

    for delivery in 1..=args.deliveries {
        writeln!(out, "delivery {delivery}: {}", subscription.next_delivery_date())
            .map_err(write_failed)?;

        subscription
            .advance()
            .map_err(|error| format!("failed to schedule delivery: {error}"))?;
    }

    Ok(())
}
