//! Static banking reference data: storage growth by year and per-customer
//! product recommendations.

use crate::CliResult;

/// Relative data growth for one year, 2020 = 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPoint {
    pub year: u16,
    pub rdbms: f64,
    pub nosql: f64,
}

pub const GROWTH: [GrowthPoint; 6] = [
    GrowthPoint { year: 2020, rdbms: 1.0, nosql: 1.0 },
    GrowthPoint { year: 2021, rdbms: 1.2, nosql: 1.4 },
    GrowthPoint { year: 2022, rdbms: 1.4, nosql: 2.0 },
    GrowthPoint { year: 2023, rdbms: 1.5, nosql: 2.7 },
    GrowthPoint { year: 2024, rdbms: 1.6, nosql: 3.5 },
    GrowthPoint { year: 2025, rdbms: 1.7, nosql: 4.5 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub customer: &'static str,
    pub purchase_history: &'static str,
    pub recommended: &'static str,
}

pub const RECOMMENDATIONS: [Recommendation; 5] = [
    Recommendation {
        customer: "Alice",
        purchase_history: "Loan, Credit Card",
        recommended: "Investments",
    },
    Recommendation {
        customer: "Bob",
        purchase_history: "Savings, Loan",
        recommended: "Credit Card",
    },
    Recommendation {
        customer: "Charlie",
        purchase_history: "Credit Card, Investments",
        recommended: "Insurance",
    },
    Recommendation {
        customer: "Diana",
        purchase_history: "Savings, Insurance",
        recommended: "Savings",
    },
    Recommendation {
        customer: "Eve",
        purchase_history: "Insurance, Investments",
        recommended: "Loan",
    },
];

/// Recommendations for one customer (case-insensitive), or all of them.
pub fn recommendations_for(customer: Option<&str>) -> CliResult<Vec<Recommendation>> {
    match customer {
        None => Ok(RECOMMENDATIONS.to_vec()),
        Some(name) => RECOMMENDATIONS
            .iter()
            .find(|r| r.customer.eq_ignore_ascii_case(name.trim()))
            .map(|r| vec![*r])
            .ok_or_else(|| format!("Unknown customer '{}'", name)),
    }
}
