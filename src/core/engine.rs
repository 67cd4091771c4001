//! The price composition engine.
//!
//! Builds the cost breakdown from the purchase price and then solves the sale
//! price, which is self-referential: every charge in the sale breakdown is a
//! percentage of the very price being solved for. The engine is a pure
//! function of its inputs and performs no I/O.

use crate::core::breakdown::{CostBreakdown, SaleBreakdown};
use crate::core::defaults::{PRICE_AFTER_DISCOUNT, REAL_COST};
use crate::core::error::{CompositionError, Result, ensure_non_negative};
use crate::core::item::Operation;
use serde::{Deserialize, Serialize};

pub const MAX_ITERATIONS: u32 = 20;
/// Currency units.
pub const TOLERANCE: f64 = 0.01;

/// Stopping rules of the sale price iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solver {
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Solver {
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE,
        }
    }
}

/// How the sale price iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Convergence {
    pub iterations: u32,
    pub sale_price: f64,
    pub converged: bool,
}

/// Both breakdowns with every amount computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub purchase_price: f64,
    pub cost: CostBreakdown,
    pub sale: SaleBreakdown,
    pub convergence: Convergence,
}

/// Recomputes both breakdowns with the default solver settings.
pub fn recompute(
    purchase_price: f64,
    cost: &CostBreakdown,
    sale: &SaleBreakdown,
) -> Result<Composition> {
    Solver::default().recompute(purchase_price, cost, sale)
}

impl Solver {
    pub fn new(max_iterations: u32, tolerance: f64) -> Result<Self> {
        let solver = Solver {
            max_iterations,
            tolerance,
        };
        solver.validate()?;
        Ok(solver)
    }

    fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(CompositionError::InvalidInput(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CompositionError::InvalidInput(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Computes every amount of both breakdowns from the purchase price and
    /// the rows' percentages. The inputs are not modified; all amounts in the
    /// result are freshly computed.
    pub fn recompute(
        &self,
        purchase_price: f64,
        cost: &CostBreakdown,
        sale: &SaleBreakdown,
    ) -> Result<Composition> {
        self.validate()?;
        ensure_non_negative("purchase price", purchase_price)?;
        // Subtotals and the purchase-price row carry no rate.
        let rates = cost
            .discounts
            .iter()
            .chain(&cost.adjustments)
            .chain(&sale.charges)
            .chain([&sale.margin, &sale.discount]);
        for item in rates {
            ensure_non_negative(&format!("percentage of '{}'", item.name), item.percentage)?;
        }
        if let Some(item) = sale.charges.iter().find(|i| i.operation != Operation::Add) {
            return Err(CompositionError::MalformedBreakdown(format!(
                "sale charge '{}' must be an add row",
                item.name
            )));
        }

        let mut cost = cost.clone();
        let real_cost = build_cost(purchase_price, &mut cost)?;

        let mut sale = sale.clone();
        let convergence = self.build_sale(real_cost, &mut sale)?;

        for item in cost.rows().into_iter().chain(sale.rows()) {
            ensure_finite(&item.name, item.amount)?;
        }

        Ok(Composition {
            purchase_price,
            cost,
            sale,
            convergence,
        })
    }

    fn build_sale(&self, real_cost: f64, sale: &mut SaleBreakdown) -> Result<Convergence> {
        let margin = sale.margin.percentage;
        let charges = sale.charges_percentage();
        let convergence = self.solve_sale_price(real_cost, charges, margin)?;
        let price = convergence.sale_price;

        let mut floor_price = real_cost;
        for item in &mut sale.charges {
            item.amount = price * item.percentage / 100.0;
            floor_price += item.amount;
        }
        sale.floor_price.amount = floor_price;
        sale.margin.amount = price * margin / 100.0;
        sale.final_price.amount = price;
        sale.discount.amount = price * sale.discount.percentage / 100.0;

        let sale_price = price - sale.discount.amount;
        if sale_price < 0.0 {
            return Err(CompositionError::InvalidInput(format!(
                "discount of {}% leaves a negative sale price",
                sale.discount.percentage
            )));
        }
        sale.sale_price.amount = sale_price;
        Ok(convergence)
    }

    /// Solves `price = real_cost + price * (charges + margin) / 100`.
    ///
    /// The update is the closed-form solution of that equation, so the loop
    /// settles on the second round (the first when the seed is already
    /// exact). It stays bounded by `max_iterations` either way.
    fn solve_sale_price(&self, real_cost: f64, charges: f64, margin: f64) -> Result<Convergence> {
        if charges + margin >= 100.0 {
            return Err(CompositionError::InvalidComposition { charges, margin });
        }
        let share = (charges + margin) / 100.0;

        let mut estimate = real_cost * (1.0 + margin / 100.0);
        for iteration in 1..=self.max_iterations {
            let next = real_cost / (1.0 - share);
            ensure_finite("sale price", next)?;
            let delta = (next - estimate).abs();
            estimate = next;
            if delta <= self.tolerance {
                return Ok(Convergence {
                    iterations: iteration,
                    sale_price: estimate,
                    converged: true,
                });
            }
        }

        Ok(Convergence {
            iterations: self.max_iterations,
            sale_price: estimate,
            converged: false,
        })
    }
}

/// Fills the cost breakdown and returns the real cost. Discounts are all
/// taken over the original purchase price, not compounded.
fn build_cost(purchase_price: f64, cost: &mut CostBreakdown) -> Result<f64> {
    cost.purchase_price.amount = purchase_price;

    let mut price_after_discount = purchase_price;
    for item in &mut cost.discounts {
        item.amount = purchase_price * item.percentage / 100.0;
        price_after_discount -= item.amount;
    }
    if price_after_discount < 0.0 {
        return Err(CompositionError::InvalidInput(
            "discounts exceed the purchase price".to_string(),
        ));
    }
    ensure_finite(PRICE_AFTER_DISCOUNT, price_after_discount)?;
    cost.price_after_discount.amount = price_after_discount;

    let mut real_cost = price_after_discount;
    for item in &mut cost.adjustments {
        item.amount = price_after_discount * item.percentage / 100.0;
        real_cost += item.signed_amount();
    }
    if real_cost < 0.0 {
        return Err(CompositionError::InvalidInput(
            "cost credits exceed the discounted price".to_string(),
        ));
    }
    ensure_finite(REAL_COST, real_cost)?;
    cost.real_cost.amount = real_cost;
    Ok(real_cost)
}

/// Finite inputs can still overflow once multiplied out.
fn ensure_finite(what: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        return Ok(());
    }
    Err(CompositionError::InvalidInput(format!("{what} overflows to {value}")))
}
