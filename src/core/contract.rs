//! JSON request/response contract with flat, ordered item lists.
//!
//! A request carries everything needed to price one product, so each call is
//! handled independently of any other.

use crate::core::breakdown::{CostBreakdown, SaleBreakdown};
use crate::core::engine::{Composition, Convergence, Solver};
use crate::core::error::{CompositionError, Result};
use crate::core::item::{LineItem, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub purchase_price: f64,
    pub cost_items: Vec<LineItem>,
    pub sale_items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub purchase_price: f64,
    pub cost_items: Vec<LineItem>,
    pub sale_items: Vec<LineItem>,
    pub convergence: Convergence,
}

impl PricingRequest {
    pub fn from_breakdowns(
        purchase_price: f64,
        cost: &CostBreakdown,
        sale: &SaleBreakdown,
    ) -> Self {
        PricingRequest {
            purchase_price,
            cost_items: cost.rows().into_iter().cloned().collect(),
            sale_items: sale.rows().into_iter().cloned().collect(),
        }
    }

    pub fn solve(&self, solver: &Solver) -> Result<PricingResponse> {
        let cost = parse_cost(&self.cost_items)?;
        let sale = parse_sale(&self.sale_items)?;
        let composition = solver.recompute(self.purchase_price, &cost, &sale)?;
        Ok(PricingResponse::from(composition))
    }
}

impl From<Composition> for PricingResponse {
    fn from(composition: Composition) -> Self {
        PricingResponse {
            purchase_price: composition.purchase_price,
            cost_items: composition.cost.rows().into_iter().cloned().collect(),
            sale_items: composition.sale.rows().into_iter().cloned().collect(),
            convergence: composition.convergence,
        }
    }
}

/// Walks a flat item list, handing out rows in order.
struct Rows<'a> {
    side: &'static str,
    items: std::iter::Peekable<std::slice::Iter<'a, LineItem>>,
}

impl<'a> Rows<'a> {
    fn new(side: &'static str, items: &'a [LineItem]) -> Self {
        Rows {
            side,
            items: items.iter().peekable(),
        }
    }

    fn malformed(&self, msg: String) -> CompositionError {
        CompositionError::MalformedBreakdown(format!("{} items: {msg}", self.side))
    }

    fn next(&mut self, what: &str, allowed: &[Operation]) -> Result<LineItem> {
        let item = self
            .items
            .next()
            .ok_or_else(|| self.malformed(format!("missing {what} row")))?;
        if !allowed.contains(&item.operation) {
            return Err(self.malformed(format!(
                "expected {what} row, found '{}' with operation {:?}",
                item.name, item.operation
            )));
        }
        Ok(item.clone())
    }

    fn subtotal(&mut self, what: &str) -> Result<LineItem> {
        let mut item = self.next(what, &[Operation::Equals])?;
        item.editable = false;
        Ok(item)
    }

    /// Takes rows until the next subtotal.
    fn run(&mut self, what: &str, allowed: &[Operation]) -> Result<Vec<LineItem>> {
        let mut run = Vec::new();
        while let Some(item) = self.items.peek() {
            if item.operation == Operation::Equals {
                break;
            }
            run.push(self.next(what, allowed)?);
        }
        Ok(run)
    }

    fn finish(mut self) -> Result<()> {
        match self.items.next() {
            Some(item) => Err(self.malformed(format!(
                "unexpected row '{}' after the last subtotal",
                item.name
            ))),
            None => Ok(()),
        }
    }
}

/// Purchase price, discounts, subtotal, adjustments, subtotal.
pub fn parse_cost(items: &[LineItem]) -> Result<CostBreakdown> {
    let mut rows = Rows::new("cost", items);
    let mut purchase_price = rows.next("purchase price", &[Operation::Add])?;
    purchase_price.editable = false;
    let discounts = rows.run("discount", &[Operation::Subtract])?;
    let price_after_discount = rows.subtotal("price after discount")?;
    let adjustments = rows.run("cost adjustment", &[Operation::Add, Operation::Subtract])?;
    let real_cost = rows.subtotal("real cost")?;
    rows.finish()?;

    Ok(CostBreakdown {
        purchase_price,
        discounts,
        price_after_discount,
        adjustments,
        real_cost,
    })
}

/// Charges, subtotal, margin, subtotal, discount, subtotal.
pub fn parse_sale(items: &[LineItem]) -> Result<SaleBreakdown> {
    let mut rows = Rows::new("sale", items);
    let charges = rows.run("charge", &[Operation::Add])?;
    let floor_price = rows.subtotal("floor price")?;
    let margin = rows.next("profit margin", &[Operation::Add])?;
    let final_price = rows.subtotal("final price")?;
    let discount = rows.next("discount", &[Operation::Subtract])?;
    let sale_price = rows.subtotal("sale price")?;
    rows.finish()?;

    Ok(SaleBreakdown {
        charges,
        floor_price,
        margin,
        final_price,
        discount,
        sale_price,
    })
}
