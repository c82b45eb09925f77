//! Subscriptions
//!
//! Recurring-order records: which user receives which product, how often,
//! and where the subscription is in its lifecycle.

use std::fmt;

use decimal_percentage::Percentage;
use jiff::{Span, ToSpan, civil::Date};
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::uuids::TypedUuid;

/// Subscriber
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Subscribed product
#[derive(Debug)]
pub struct SubscribedProduct;

/// Subscribed product UUID
pub type ProductUuid = TypedUuid<SubscribedProduct>;

/// Subscription UUID
pub type SubscriptionUuid = TypedUuid<Subscription>;

/// Subscription errors
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// Discount outside 0% to 100%.
    #[error("discount must be between 0% and 100%")]
    InvalidDiscount,

    /// The requested status change is not allowed.
    #[error("cannot move subscription from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: SubscriptionStatus,
        /// Requested status
        to: SubscriptionStatus,
    },

    /// Deliveries only advance while active.
    #[error("subscription is {0}, deliveries only advance while active")]
    NotActive(SubscriptionStatus),

    /// Delivery date arithmetic left the supported calendar range.
    #[error("delivery date out of range: {0}")]
    DateOutOfRange(#[from] jiff::Error),

    /// Discount arithmetic overflowed.
    #[error("discount calculation overflowed")]
    DiscountOverflow,
}

/// Delivery cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryFrequency {
    /// Every week
    Weekly,

    /// Every two weeks
    Fortnightly,

    /// Every month
    Monthly,

    /// Every two months
    Bimonthly,

    /// Every three months
    Quarterly,
}

impl DeliveryFrequency {
    /// Span covering `cycles` deliveries at this cadence.
    pub fn span(self, cycles: i64) -> Span {
        match self {
            DeliveryFrequency::Weekly => cycles.weeks(),
            DeliveryFrequency::Fortnightly => (cycles * 2).weeks(),
            DeliveryFrequency::Monthly => cycles.months(),
            DeliveryFrequency::Bimonthly => (cycles * 2).months(),
            DeliveryFrequency::Quarterly => (cycles * 3).months(),
        }
    }
}

impl fmt::Display for DeliveryFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeliveryFrequency::Weekly => "weekly",
            DeliveryFrequency::Fortnightly => "fortnightly",
            DeliveryFrequency::Monthly => "monthly",
            DeliveryFrequency::Bimonthly => "bimonthly",
            DeliveryFrequency::Quarterly => "quarterly",
        };

        f.write_str(label)
    }
}

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    /// Delivering on schedule
    Active,

    /// Deliveries on hold
    Paused,

    /// Stopped by the customer; terminal
    Cancelled,

    /// Ran its course; terminal
    Completed,
}

impl SubscriptionStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Cancelled | SubscriptionStatus::Completed
        )
    }

    /// Returns true if moving to `to` is allowed.
    pub fn can_transition_to(self, to: SubscriptionStatus) -> bool {
        use SubscriptionStatus::{Active, Cancelled, Completed, Paused};

        matches!(
            (self, to),
            (Active, Paused | Cancelled | Completed) | (Paused, Active | Cancelled)
        )
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Paused => "Paused",
            SubscriptionStatus::Cancelled => "Cancelled",
            SubscriptionStatus::Completed => "Completed",
        };

        f.write_str(label)
    }
}

/// New subscription data, validated on conversion into a [`Subscription`].
#[derive(Debug, Clone)]
pub struct NewSubscription {
    /// Subscriber
    pub user: UserUuid,

    /// Product delivered
    pub product: ProductUuid,

    /// Delivery cadence
    pub frequency: DeliveryFrequency,

    /// Signup date
    pub start_date: Date,

    /// Optional discount applied to every delivery
    pub discount: Option<Percentage>,

    /// Whether deliveries ship free
    pub free_shipping: bool,
}

/// Subscription record
#[derive(Debug, Clone)]
pub struct Subscription {
    uuid: SubscriptionUuid,
    user: UserUuid,
    product: ProductUuid,
    frequency: DeliveryFrequency,
    start_date: Date,
    next_delivery_date: Date,
    cycle: i64,
    status: SubscriptionStatus,
    discount: Option<Percentage>,
    free_shipping: bool,
}

impl TryFrom<NewSubscription> for Subscription {
    type Error = SubscriptionError;

    fn try_from(new: NewSubscription) -> Result<Self, Self::Error> {
        if let Some(discount) = new.discount {
            let fraction = discount * Decimal::ONE;

            if fraction < Decimal::ZERO || fraction > Decimal::ONE {
                return Err(SubscriptionError::InvalidDiscount);
            }
        }

        let next_delivery_date = new.start_date.checked_add(new.frequency.span(1))?;

        Ok(Subscription {
            uuid: SubscriptionUuid::new(),
            user: new.user,
            product: new.product,
            frequency: new.frequency,
            start_date: new.start_date,
            next_delivery_date,
            cycle: 1,
            status: SubscriptionStatus::Active,
            discount: new.discount,
            free_shipping: new.free_shipping,
        })
    }
}

impl Subscription {
    /// Subscription id
    pub fn uuid(&self) -> SubscriptionUuid {
        self.uuid
    }

    /// Subscriber
    pub fn user(&self) -> UserUuid {
        self.user
    }

    /// Product delivered
    pub fn product(&self) -> ProductUuid {
        self.product
    }

    /// Delivery cadence
    pub fn frequency(&self) -> DeliveryFrequency {
        self.frequency
    }

    /// Signup date
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Date of the next scheduled delivery; never before the start date.
    pub fn next_delivery_date(&self) -> Date {
        self.next_delivery_date
    }

    /// Current status
    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    /// Discount, if any
    pub fn discount(&self) -> Option<Percentage> {
        self.discount
    }

    /// Whether deliveries ship free
    pub fn free_shipping(&self) -> bool {
        self.free_shipping
    }

    /// Move to the next billing cycle, returning the new delivery date.
    ///
    /// Dates are always computed from the start date, so month-end starts do
    /// not drift (Jan 31 -> Feb 28 -> Mar 31).
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NotActive`] unless the subscription is active.
    pub fn advance(&mut self) -> Result<Date, SubscriptionError> {
        if self.status != SubscriptionStatus::Active {
            return Err(SubscriptionError::NotActive(self.status));
        }

        self.step()
    }

    fn step(&mut self) -> Result<Date, SubscriptionError> {
        let cycle = self.cycle + 1;
        let next = self.delivery(cycle)?;

        self.cycle = cycle;
        self.next_delivery_date = next;

        Ok(next)
    }

    fn delivery(&self, cycle: i64) -> Result<Date, SubscriptionError> {
        Ok(self.start_date.checked_add(self.frequency.span(cycle))?)
    }

    /// Put deliveries on hold.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidTransition`] unless active.
    pub fn pause(&mut self) -> Result<(), SubscriptionError> {
        self.transition(SubscriptionStatus::Paused)
    }

    /// Resume a paused subscription. Deliveries missed while paused are
    /// skipped, so the next delivery lands on or after `today`.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidTransition`] unless paused, or
    /// [`SubscriptionError::DateOutOfRange`] if catching up overflows
    /// the calendar; the subscription then stays paused.
    pub fn resume(&mut self, today: Date) -> Result<Date, SubscriptionError> {
        self.check_transition(SubscriptionStatus::Active)?;

        let mut cycle = self.cycle;
        let mut next = self.next_delivery_date;

        while next < today {
            cycle += 1;
            next = self.delivery(cycle)?;
        }

        self.transition(SubscriptionStatus::Active)?;
        self.cycle = cycle;
        self.next_delivery_date = next;

        Ok(next)
    }

    /// Cancel the subscription.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidTransition`] if already terminal.
    pub fn cancel(&mut self) -> Result<(), SubscriptionError> {
        self.transition(SubscriptionStatus::Cancelled)
    }

    /// Mark the subscription as completed.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidTransition`] unless active.
    pub fn complete(&mut self) -> Result<(), SubscriptionError> {
        self.transition(SubscriptionStatus::Completed)
    }

    fn check_transition(&self, to: SubscriptionStatus) -> Result<(), SubscriptionError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(SubscriptionError::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }

    fn transition(&mut self, to: SubscriptionStatus) -> Result<(), SubscriptionError> {
        self.check_transition(to)?;

        info!(
            subscription = %self.uuid,
            from = %self.status,
            %to,
            "subscription status changed"
        );

        self.status = to;

        Ok(())
    }

    /// Price of one delivery after the subscription discount.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::DiscountOverflow`] if the arithmetic overflows.
    pub fn discounted_price<'a>(
        &self,
        price: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, SubscriptionError> {
        let Some(discount) = self.discount else {
            return Ok(price);
        };

        let minor = price.to_minor_units();

        let off = Decimal::from_i64(minor)
            .and_then(|minor| (discount * Decimal::ONE).checked_mul(minor))
            .map(|off| off.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|off| off.to_i64())
            .ok_or(SubscriptionError::DiscountOverflow)?;

        Ok(Money::from_minor(minor.saturating_sub(off).max(0), price.currency()))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn new_subscription(frequency: DeliveryFrequency, start_date: Date) -> NewSubscription {
        NewSubscription {
            user: UserUuid::new(),
            product: ProductUuid::new(),
            frequency,
            start_date,
            discount: None,
            free_shipping: true,
        }
    }

    #[test]
    fn signup_schedules_first_delivery_one_cycle_out() -> TestResult {
        let subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Fortnightly,
            date(2026, 3, 1),
        ))?;

        assert_eq!(subscription.status(), SubscriptionStatus::Active);
        assert_eq!(subscription.next_delivery_date(), date(2026, 3, 15));
        assert!(subscription.next_delivery_date() >= subscription.start_date());

        Ok(())
    }

    #[test]
    fn monthly_advance_does_not_drift_from_month_end() -> TestResult {
        let mut subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Monthly,
            date(2026, 1, 31),
        ))?;

        assert_eq!(subscription.next_delivery_date(), date(2026, 2, 28));
        assert_eq!(subscription.advance()?, date(2026, 3, 31));
        assert_eq!(subscription.advance()?, date(2026, 4, 30));

        Ok(())
    }

    #[test]
    fn quarterly_advance_moves_three_months() -> TestResult {
        let mut subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Quarterly,
            date(2026, 1, 15),
        ))?;

        assert_eq!(subscription.next_delivery_date(), date(2026, 4, 15));
        assert_eq!(subscription.advance()?, date(2026, 7, 15));

        Ok(())
    }

    #[test]
    fn paused_subscription_does_not_advance() -> TestResult {
        let mut subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Weekly,
            date(2026, 5, 4),
        ))?;

        subscription.pause()?;

        assert!(matches!(
            subscription.advance(),
            Err(SubscriptionError::NotActive(SubscriptionStatus::Paused))
        ));

        Ok(())
    }

    #[test]
    fn resume_skips_missed_deliveries() -> TestResult {
        let mut subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Weekly,
            date(2026, 5, 4),
        ))?;

        subscription.pause()?;

        let next = subscription.resume(date(2026, 6, 2))?;

        assert_eq!(next, date(2026, 6, 8));
        assert_eq!(subscription.status(), SubscriptionStatus::Active);

        Ok(())
    }

    #[test]
    fn failed_catch_up_leaves_subscription_paused() -> TestResult {
        let mut subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Quarterly,
            date(9999, 6, 1),
        ))?;

        subscription.pause()?;

        assert!(matches!(
            subscription.resume(date(9999, 12, 31)),
            Err(SubscriptionError::DateOutOfRange(_))
        ));
        assert_eq!(subscription.status(), SubscriptionStatus::Paused);
        assert_eq!(subscription.next_delivery_date(), date(9999, 9, 1));

        Ok(())
    }

    #[test]
    fn terminal_states_reject_transitions() -> TestResult {
        let mut subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Weekly,
            date(2026, 5, 4),
        ))?;

        subscription.cancel()?;

        assert!(matches!(
            subscription.pause(),
            Err(SubscriptionError::InvalidTransition {
                from: SubscriptionStatus::Cancelled,
                to: SubscriptionStatus::Paused,
            })
        ));
        assert!(subscription.complete().is_err());
        assert!(subscription.status().is_terminal());

        Ok(())
    }

    #[test]
    fn paused_subscription_cannot_complete() -> TestResult {
        let mut subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Monthly,
            date(2026, 5, 4),
        ))?;

        subscription.pause()?;

        assert!(subscription.complete().is_err());
        assert!(subscription.cancel().is_ok());

        Ok(())
    }

    #[test]
    fn discount_out_of_range_is_rejected() {
        let mut new = new_subscription(DeliveryFrequency::Monthly, date(2026, 5, 4));

        new.discount = Some(Percentage::from(1.5));

        assert!(matches!(
            Subscription::try_from(new),
            Err(SubscriptionError::InvalidDiscount)
        ));
    }

    #[test]
    fn discounted_price_applies_percentage() -> TestResult {
        let mut new = new_subscription(DeliveryFrequency::Monthly, date(2026, 5, 4));

        new.discount = Some(Percentage::from(0.1));

        let subscription = Subscription::try_from(new)?;
        let price = subscription.discounted_price(Money::from_minor(4599, USD))?;

        assert_eq!(price, Money::from_minor(4139, USD));

        Ok(())
    }

    #[test]
    fn no_discount_keeps_price() -> TestResult {
        let subscription = Subscription::try_from(new_subscription(
            DeliveryFrequency::Monthly,
            date(2026, 5, 4),
        ))?;

        assert_eq!(
            subscription.discounted_price(Money::from_minor(999, USD))?,
            Money::from_minor(999, USD)
        );

        Ok(())
    }
}
