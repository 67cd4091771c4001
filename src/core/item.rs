//! Line items shared by the cost and sale breakdowns

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    /// Subtotal row; its amount is a running total, not `base * percentage`.
    Equals,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Operation::Add => "+",
                Operation::Subtract => "-",
                Operation::Equals => "=",
            }
        )
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "-" => Ok(Operation::Subtract),
            "equals" | "=" => Ok(Operation::Equals),
            _ => Err(anyhow::anyhow!("Invalid operation: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub percentage: f64,
    #[serde(default)]
    pub amount: f64,
    pub operation: Operation,
    pub editable: bool,
}

impl LineItem {
    /// An editable row whose amount is `base * percentage / 100`.
    pub fn rate(name: &str, operation: Operation, percentage: f64) -> Self {
        LineItem {
            name: name.to_string(),
            percentage,
            amount: 0.0,
            operation,
            editable: true,
        }
    }

    pub fn subtotal(name: &str) -> Self {
        LineItem {
            name: name.to_string(),
            percentage: 0.0,
            amount: 0.0,
            operation: Operation::Equals,
            editable: false,
        }
    }

    /// The fixed starting row of the cost breakdown.
    pub fn fixed(name: &str) -> Self {
        LineItem {
            name: name.to_string(),
            percentage: 0.0,
            amount: 0.0,
            operation: Operation::Add,
            editable: false,
        }
    }

    /// Signed amount as it contributes to a running total.
    pub fn signed_amount(&self) -> f64 {
        match self.operation {
            Operation::Subtract => -self.amount,
            _ => self.amount,
        }
    }
}
