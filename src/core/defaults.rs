//! The fixed schema of both breakdowns and their default percentages.

use crate::core::breakdown::{CostBreakdown, SaleBreakdown};
use crate::core::error::{CompositionError, Result, ensure_non_negative};
use crate::core::item::{LineItem, Operation};
use std::collections::BTreeMap;

pub const PURCHASE_PRICE: &str = "Preço de Compra";
pub const PRICE_AFTER_DISCOUNT: &str = "Preço com Desconto";
pub const REAL_COST: &str = "Custo Real";
pub const FLOOR_PRICE: &str = "Preço Mínimo";
pub const MARGIN: &str = "Margem de Lucro";
pub const FINAL_PRICE: &str = "Preço Final";
pub const SALE_DISCOUNT: &str = "Desconto";
pub const SALE_PRICE: &str = "Preço de Venda";

const COST_DISCOUNTS: [(&str, f64); 3] = [
    ("Desconto 1", 0.0),
    ("Desconto 2", 0.0),
    ("Desconto 3", 0.0),
];

const COST_ADJUSTMENTS: [(&str, Operation, f64); 5] = [
    ("IPI", Operation::Add, 0.0),
    ("Frete", Operation::Add, 0.0),
    ("Substituição Tributária", Operation::Add, 0.0),
    ("Crédito ICMS", Operation::Subtract, 0.0),
    ("Crédito PIS/COFINS", Operation::Subtract, 0.0),
];

const SALE_CHARGES: [(&str, f64); 10] = [
    ("PIS", 1.65),
    ("COFINS", 7.6),
    ("ICMS", 21.0),
    ("Contribuição Social", 2.9),
    ("Super Simples", 0.0),
    ("Imposto de Renda", 0.0),
    ("Comissão", 0.0),
    ("Despesas Comerciais", 0.0),
    ("Despesas Financeiras", 0.0),
    ("Despesas Administrativas", 0.0),
];

const DEFAULT_MARGIN: f64 = 18.12;
const DEFAULT_SALE_DISCOUNT: f64 = 0.0;

/// Default percentage for every editable row, keyed by row name.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTable {
    percentages: BTreeMap<String, f64>,
}

impl DefaultTable {
    pub fn standard() -> Self {
        let mut percentages = BTreeMap::new();
        for (name, pct) in COST_DISCOUNTS {
            percentages.insert(name.to_string(), pct);
        }
        for (name, _, pct) in COST_ADJUSTMENTS {
            percentages.insert(name.to_string(), pct);
        }
        for (name, pct) in SALE_CHARGES {
            percentages.insert(name.to_string(), pct);
        }
        percentages.insert(MARGIN.to_string(), DEFAULT_MARGIN);
        percentages.insert(SALE_DISCOUNT.to_string(), DEFAULT_SALE_DISCOUNT);
        DefaultTable { percentages }
    }

    /// Applies per-row overrides on top of the standard table. Only editable
    /// rows can be overridden.
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let mut table = Self::standard();
        for (name, pct) in overrides {
            ensure_non_negative(name, *pct)?;
            match table.percentages.get_mut(name) {
                Some(slot) => *slot = *pct,
                None if is_fixed_row(name) => {
                    return Err(CompositionError::NotEditable(name.clone()));
                }
                None => return Err(CompositionError::UnknownItem(name.clone())),
            }
        }
        Ok(table)
    }

    pub fn percentage(&self, name: &str) -> Option<f64> {
        self.percentages.get(name).copied()
    }

    /// Fresh breakdowns in schema order with this table's percentages and
    /// every amount at zero.
    pub fn breakdowns(&self) -> (CostBreakdown, SaleBreakdown) {
        let pct = |name: &str| self.percentage(name).unwrap_or(0.0);

        let cost = CostBreakdown {
            purchase_price: LineItem::fixed(PURCHASE_PRICE),
            discounts: COST_DISCOUNTS
                .iter()
                .map(|(name, _)| LineItem::rate(name, Operation::Subtract, pct(name)))
                .collect(),
            price_after_discount: LineItem::subtotal(PRICE_AFTER_DISCOUNT),
            adjustments: COST_ADJUSTMENTS
                .iter()
                .map(|(name, op, _)| LineItem::rate(name, *op, pct(name)))
                .collect(),
            real_cost: LineItem::subtotal(REAL_COST),
        };

        let sale = SaleBreakdown {
            charges: SALE_CHARGES
                .iter()
                .map(|(name, _)| LineItem::rate(name, Operation::Add, pct(name)))
                .collect(),
            floor_price: LineItem::subtotal(FLOOR_PRICE),
            margin: LineItem::rate(MARGIN, Operation::Add, pct(MARGIN)),
            final_price: LineItem::subtotal(FINAL_PRICE),
            discount: LineItem::rate(SALE_DISCOUNT, Operation::Subtract, pct(SALE_DISCOUNT)),
            sale_price: LineItem::subtotal(SALE_PRICE),
        };

        (cost, sale)
    }
}

impl Default for DefaultTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_fixed_row(name: &str) -> bool {
    [
        PURCHASE_PRICE,
        PRICE_AFTER_DISCOUNT,
        REAL_COST,
        FLOOR_PRICE,
        FINAL_PRICE,
        SALE_PRICE,
    ]
    .contains(&name)
}
