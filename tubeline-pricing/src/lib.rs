//! Pricing calculator (§4.6): a pure, deterministic function from a
//! material/quantity/gauge/geometry tuple to a fully itemized quote.
//!
//! Intermediate arithmetic stays in `f64` full precision; only the values
//! that actually reach [`QuoteBreakdown`] are rounded to cents, and each is
//! rounded from its own unrounded figure rather than from an
//! already-rounded predecessor, so `total` and `price_per_part` don't drift
//! apart from compounding rounding error.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

use rust_decimal::prelude::*;
use serde::Serialize;

const BENDING_COST_PER_BEND: f64 = 15.00;
const CUTTING_COST_PER_CUT: f64 = 8.00;
const SETUP_COST: f64 = 75.00;
const LABOR_RATE_PER_HOUR: f64 = 65.00;
const BASE_TIME_PER_PART_HOURS: f64 = 0.25;
const TIME_PER_BEND_HOURS: f64 = 0.15;
const TIME_PER_CUT_HOURS: f64 = 0.08;
const TAX_RATE: f64 = 0.08875;

/// The material a part is quoted in; only its per-pound price feeds the
/// calculation, but id/name are carried through for the caller's records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub price_per_lb: f64,
}

/// Everything the calculator needs for one quote.
#[derive(Clone, Debug, PartialEq)]
pub struct PricingInputs {
    pub material: Material,
    pub quantity: u32,
    pub gauge: String,
    pub length_in: f64,
    pub bends: u32,
    pub cuts: u32,
}

/// Non-monetary figures behind the quote, useful for an itemized receipt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuoteDetails {
    pub material_weight: f64,
    pub bending_rate: f64,
    pub cutting_rate: f64,
    pub setup_rate: f64,
    pub labor_hours: f64,
    pub labor_rate: f64,
}

/// The assembled, itemized quote.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuoteBreakdown {
    pub material_cost: Decimal,
    pub bending_cost: Decimal,
    pub cutting_cost: Decimal,
    pub setup_cost: Decimal,
    pub labor_cost: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub price_per_part: Decimal,
    pub details: QuoteDetails,
}

/// Weight per linear inch for a gauge code, defaulting to 14 AWG for any
/// code outside the fixed table.
fn weight_per_in(gauge: &str) -> f64 {
    let normalized: String = gauge.chars().filter(|c| !c.is_whitespace()).collect();
    match normalized.to_uppercase().as_str() {
        "16AWG" => 0.15,
        "14AWG" => 0.19,
        "12AWG" => 0.25,
        "10AWG" => 0.32,
        "8AWG" => 0.41,
        _ => 0.19,
    }
}

/// Fraction discounted off the pre-tax subtotal based on order quantity.
fn quantity_discount(quantity: u32) -> f64 {
    match quantity {
        0..=10 => 0.0,
        11..=50 => 0.05,
        51..=100 => 0.10,
        _ => 0.15,
    }
}

fn cents(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp(2)
}

/// Computes a full quote. Never fails: every input is treated as valid by
/// construction (the caller is expected to validate quantity/gauge/length
/// before calling in), matching the pricing contract's "fully
/// deterministic, no randomness" requirement.
pub fn quote(inputs: &PricingInputs) -> QuoteBreakdown {
    let quantity = inputs.quantity as f64;
    let weight_rate = weight_per_in(&inputs.gauge);
    let material_weight = inputs.length_in * weight_rate;

    let material_cost = material_weight * inputs.material.price_per_lb * quantity;
    let bending_cost = BENDING_COST_PER_BEND * inputs.bends as f64 * quantity;
    let cutting_cost = CUTTING_COST_PER_CUT * inputs.cuts as f64 * quantity;
    let labor_hours = quantity
        * (BASE_TIME_PER_PART_HOURS
            + inputs.bends as f64 * TIME_PER_BEND_HOURS
            + inputs.cuts as f64 * TIME_PER_CUT_HOURS);
    let labor_cost = labor_hours * LABOR_RATE_PER_HOUR;
    let setup_cost = SETUP_COST;

    let pre_discount_subtotal = material_cost + bending_cost + cutting_cost + labor_cost + setup_cost;
    let discount = quantity_discount(inputs.quantity);
    let subtotal = pre_discount_subtotal * (1.0 - discount);

    let tax = subtotal * TAX_RATE;
    let total = subtotal + tax;
    let price_per_part = total / quantity;

    QuoteBreakdown {
        material_cost: cents(material_cost),
        bending_cost: cents(bending_cost),
        cutting_cost: cents(cutting_cost),
        setup_cost: cents(setup_cost),
        labor_cost: cents(labor_cost),
        subtotal: cents(subtotal),
        tax: cents(tax),
        total: cents(total),
        price_per_part: cents(price_per_part),
        details: QuoteDetails {
            material_weight,
            bending_rate: BENDING_COST_PER_BEND,
            cutting_rate: CUTTING_COST_PER_CUT,
            setup_rate: SETUP_COST,
            labor_hours,
            labor_rate: LABOR_RATE_PER_HOUR,
        },
    }
}
