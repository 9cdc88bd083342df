use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed asset groupings of the dashboard basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetCategory {
    TechStocks,
    Cryptocurrencies,
    Commodities,
    MarketIndices,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::TechStocks,
        AssetCategory::Cryptocurrencies,
        AssetCategory::Commodities,
        AssetCategory::MarketIndices,
    ];

    /// Human-readable label, as shown in the category selector.
    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::TechStocks => "Tech Stocks",
            AssetCategory::Cryptocurrencies => "Cryptocurrencies",
            AssetCategory::Commodities => "Commodities",
            AssetCategory::MarketIndices => "Market Indices",
        }
    }

    /// Member columns of this category in the source table.
    ///
    /// Members missing from a loaded table are skipped by consumers rather
    /// than treated as errors.
    pub fn members(&self) -> &'static [&'static str] {
        match self {
            AssetCategory::TechStocks => &[
                "Apple_Price",
                "Tesla_Price",
                "Microsoft_Price",
                "Google_Price",
                "Nvidia_Price",
                "Netflix_Price",
                "Amazon_Price",
                "Meta_Price",
            ],
            AssetCategory::Cryptocurrencies => &["Bitcoin_Price", "Ethereum_Price"],
            AssetCategory::Commodities => &[
                "Natural_Gas_Price",
                "Crude_oil_Price",
                "Copper_Price",
                "Silver_Price",
                "Gold_Price",
                "Platinum_Price",
            ],
            AssetCategory::MarketIndices => {
                &["S&P_500_Price", "Nasdaq_100_Price", "Berkshire_Price"]
            }
        }
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tech" | "tech-stocks" => Ok(AssetCategory::TechStocks),
            "crypto" | "cryptocurrencies" => Ok(AssetCategory::Cryptocurrencies),
            "commodities" => Ok(AssetCategory::Commodities),
            "indices" | "market-indices" => Ok(AssetCategory::MarketIndices),
            other => Err(format!(
                "unknown category '{other}' (expected tech, crypto, commodities or indices)"
            )),
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Letter grade assigned to an asset from its total return percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    C,
    DMinus,
}

impl Grade {
    pub fn from_total_return(total_return_pct: f64) -> Self {
        match total_return_pct {
            r if r >= 80.0 => Grade::APlus,
            r if r >= 60.0 => Grade::A,
            r if r >= 40.0 => Grade::AMinus,
            r if r >= 20.0 => Grade::BPlus,
            r if r >= 0.0 => Grade::B,
            r if r >= -10.0 => Grade::C,
            _ => Grade::DMinus,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::DMinus => "D-",
        };
        f.write_str(label)
    }
}

/// Strength bucket for a correlation coefficient, by absolute value.
///
/// The sign stays with the coefficient itself; the bucket only encodes how
/// tight the relationship is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl CorrelationStrength {
    pub fn classify(coefficient: f64) -> Self {
        match coefficient.abs() {
            r if r >= 0.8 => CorrelationStrength::VeryStrong,
            r if r >= 0.6 => CorrelationStrength::Strong,
            r if r >= 0.3 => CorrelationStrength::Moderate,
            r if r >= 0.1 => CorrelationStrength::Weak,
            _ => CorrelationStrength::Negligible,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorrelationStrength::VeryStrong => "very strong",
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Negligible => "negligible",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_cutoffs() {
        assert_eq!(Grade::from_total_return(80.0), Grade::APlus);
        assert_eq!(Grade::from_total_return(79.9), Grade::A);
        assert_eq!(Grade::from_total_return(60.0), Grade::A);
        assert_eq!(Grade::from_total_return(40.0), Grade::AMinus);
        assert_eq!(Grade::from_total_return(20.0), Grade::BPlus);
        assert_eq!(Grade::from_total_return(0.0), Grade::B);
        assert_eq!(Grade::from_total_return(-10.0), Grade::C);
        assert_eq!(Grade::from_total_return(-10.1), Grade::DMinus);
    }

    #[test]
    fn strength_buckets_use_absolute_value() {
        assert_eq!(
            CorrelationStrength::classify(0.85),
            CorrelationStrength::VeryStrong
        );
        assert_eq!(
            CorrelationStrength::classify(-0.85),
            CorrelationStrength::VeryStrong
        );
        assert_eq!(
            CorrelationStrength::classify(0.6),
            CorrelationStrength::Strong
        );
        assert_eq!(
            CorrelationStrength::classify(-0.45),
            CorrelationStrength::Moderate
        );
        assert_eq!(CorrelationStrength::classify(0.1), CorrelationStrength::Weak);
        assert_eq!(
            CorrelationStrength::classify(0.05),
            CorrelationStrength::Negligible
        );
    }

    #[test]
    fn category_parsing_and_members() {
        let category: AssetCategory = "crypto".parse().unwrap();
        assert_eq!(category, AssetCategory::Cryptocurrencies);
        assert_eq!(category.members(), ["Bitcoin_Price", "Ethereum_Price"]);
        assert!("bonds".parse::<AssetCategory>().is_err());
    }
}
