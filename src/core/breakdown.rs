//! Named phases of the cost and sale breakdowns.
//!
//! Each breakdown keeps its subtotal rows in dedicated fields so the
//! computation never depends on a row's position in a list. `rows()` gives
//! the flat, ordered view used for display and for the JSON contract.

use crate::core::item::{LineItem, Operation};
use serde::{Deserialize, Serialize};

/// Purchase price down to real cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub purchase_price: LineItem,
    /// Discounts over the purchase price (`subtract`).
    pub discounts: Vec<LineItem>,
    pub price_after_discount: LineItem,
    /// Taxes added to or credits taken from the discounted price.
    pub adjustments: Vec<LineItem>,
    pub real_cost: LineItem,
}

/// Real cost up to the final sale price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleBreakdown {
    /// Taxes, commissions and expenses charged as a share of the sale price.
    pub charges: Vec<LineItem>,
    pub floor_price: LineItem,
    pub margin: LineItem,
    pub final_price: LineItem,
    pub discount: LineItem,
    pub sale_price: LineItem,
}

impl CostBreakdown {
    pub fn rows(&self) -> Vec<&LineItem> {
        let mut rows = vec![&self.purchase_price];
        rows.extend(self.discounts.iter());
        rows.push(&self.price_after_discount);
        rows.extend(self.adjustments.iter());
        rows.push(&self.real_cost);
        rows
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        std::iter::once(&mut self.purchase_price)
            .chain(self.discounts.iter_mut())
            .chain(std::iter::once(&mut self.price_after_discount))
            .chain(self.adjustments.iter_mut())
            .chain(std::iter::once(&mut self.real_cost))
            .find(|item| item.name == name)
    }
}

impl SaleBreakdown {
    pub fn rows(&self) -> Vec<&LineItem> {
        let mut rows: Vec<&LineItem> = self.charges.iter().collect();
        rows.extend([
            &self.floor_price,
            &self.margin,
            &self.final_price,
            &self.discount,
            &self.sale_price,
        ]);
        rows
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.charges
            .iter_mut()
            .chain([
                &mut self.floor_price,
                &mut self.margin,
                &mut self.final_price,
                &mut self.discount,
                &mut self.sale_price,
            ])
            .find(|item| item.name == name)
    }

    /// Sum of the percentages charged over the sale price.
    pub fn charges_percentage(&self) -> f64 {
        self.charges
            .iter()
            .filter(|item| item.operation == Operation::Add)
            .map(|item| item.percentage)
            .sum()
    }
}
