//! An editable calculator session over the engine.

use crate::core::breakdown::{CostBreakdown, SaleBreakdown};
use crate::core::defaults::DefaultTable;
use crate::core::engine::{Composition, Convergence, Solver};
use crate::core::error::{CompositionError, Result};

/// Holds the purchase price and both breakdowns of one pricing session.
///
/// Every edit triggers a full recomputation from the current rows. An edit
/// that fails to recompute is rolled back, so the session always holds the
/// last valid composition.
#[derive(Debug, Clone)]
pub struct Calculator {
    defaults: DefaultTable,
    solver: Solver,
    state: Composition,
}

impl Calculator {
    pub fn new(defaults: DefaultTable, solver: Solver) -> Result<Self> {
        let (cost, sale) = defaults.breakdowns();
        let state = solver.recompute(0.0, &cost, &sale)?;
        Ok(Calculator {
            defaults,
            solver,
            state,
        })
    }

    pub fn purchase_price(&self) -> f64 {
        self.state.purchase_price
    }

    pub fn cost(&self) -> &CostBreakdown {
        &self.state.cost
    }

    pub fn sale(&self) -> &SaleBreakdown {
        &self.state.sale
    }

    pub fn convergence(&self) -> Convergence {
        self.state.convergence
    }

    pub fn composition(&self) -> &Composition {
        &self.state
    }

    pub fn set_purchase_price(&mut self, purchase_price: f64) -> Result<()> {
        self.state = self
            .solver
            .recompute(purchase_price, &self.state.cost, &self.state.sale)?;
        Ok(())
    }

    /// Changes the percentage of an editable row, found by name in either
    /// breakdown.
    pub fn set_percentage(&mut self, name: &str, percentage: f64) -> Result<()> {
        let mut cost = self.state.cost.clone();
        let mut sale = self.state.sale.clone();
        let item = match cost.find_mut(name) {
            Some(item) => item,
            None => sale
                .find_mut(name)
                .ok_or_else(|| CompositionError::UnknownItem(name.to_string()))?,
        };
        if !item.editable {
            return Err(CompositionError::NotEditable(name.to_string()));
        }
        item.percentage = percentage;

        self.state = self
            .solver
            .recompute(self.state.purchase_price, &cost, &sale)?;
        Ok(())
    }

    /// Restores the default percentages and a zero purchase price.
    pub fn reset(&mut self) -> Result<()> {
        let (cost, sale) = self.defaults.breakdowns();
        self.state = self.solver.recompute(0.0, &cost, &sale)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::defaults::{MARGIN, REAL_COST};
    use crate::core::engine;

    fn calculator() -> Calculator {
        Calculator::new(DefaultTable::standard(), Solver::default()).unwrap()
    }

    #[test]
    fn new_session_starts_at_zero() {
        let calc = calculator();
        assert_eq!(calc.purchase_price(), 0.0);
        assert!(calc.cost().rows().iter().all(|i| i.amount == 0.0));
        assert!(calc.sale().rows().iter().all(|i| i.amount == 0.0));
    }

    #[test]
    fn edits_trigger_full_recompute() {
        let mut calc = calculator();
        calc.set_purchase_price(100.0).unwrap();
        calc.set_percentage("Desconto 1", 10.0).unwrap();
        calc.set_percentage("Desconto 2", 4.5).unwrap();
        calc.set_percentage("IPI", 5.0).unwrap();
        calc.set_percentage("Crédito ICMS", 12.0).unwrap();

        assert!((calc.cost().price_after_discount.amount - 85.5).abs() < 1e-9);
        assert!((calc.cost().real_cost.amount - 79.515).abs() < 1e-9);

        let direct = engine::recompute(100.0, calc.cost(), calc.sale()).unwrap();
        assert_eq!(&direct, calc.composition());
    }

    #[test]
    fn rejected_edits_leave_the_session_unchanged() {
        let mut calc = calculator();
        calc.set_purchase_price(50.0).unwrap();
        let before = calc.composition().clone();

        assert_eq!(
            calc.set_percentage(MARGIN, 80.0),
            Err(CompositionError::InvalidComposition {
                charges: calc.sale().charges_percentage(),
                margin: 80.0
            })
        );
        assert!(matches!(
            calc.set_purchase_price(-5.0),
            Err(CompositionError::InvalidInput(_))
        ));
        assert_eq!(calc.composition(), &before);
    }

    #[test]
    fn subtotals_and_unknown_rows_cannot_be_edited() {
        let mut calc = calculator();
        assert_eq!(
            calc.set_percentage(REAL_COST, 3.0),
            Err(CompositionError::NotEditable(REAL_COST.to_string()))
        );
        assert_eq!(
            calc.set_percentage("Royalties", 3.0),
            Err(CompositionError::UnknownItem("Royalties".to_string()))
        );
    }

    #[test]
    fn reset_restores_defaults_and_is_idempotent() {
        let fresh = calculator();
        let mut calc = calculator();
        calc.set_purchase_price(250.0).unwrap();
        calc.set_percentage("ICMS", 12.0).unwrap();
        calc.set_percentage("Desconto 3", 7.0).unwrap();

        calc.reset().unwrap();
        assert_eq!(calc.composition(), fresh.composition());

        calc.reset().unwrap();
        assert_eq!(calc.composition(), fresh.composition());
        assert_eq!(calc.sale().charges[2].percentage, 21.0);
    }

    #[test]
    fn reset_uses_configured_defaults() {
        let overrides = std::collections::HashMap::from([("ICMS".to_string(), 18.0)]);
        let table = DefaultTable::with_overrides(&overrides).unwrap();
        let mut calc = Calculator::new(table, Solver::default()).unwrap();
        calc.set_percentage("ICMS", 7.0).unwrap();
        calc.reset().unwrap();
        assert_eq!(calc.sale().charges[2].percentage, 18.0);
    }
}
