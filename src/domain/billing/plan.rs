//! Checkout plan selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing interval chosen at checkout; each maps to a configured price id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Monthly,
    Yearly,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Monthly => "monthly",
            PlanType::Yearly => "yearly",
        }
    }
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(PlanType::Monthly),
            "yearly" | "annual" => Ok(PlanType::Yearly),
            other => Err(format!("unknown plan type '{}'", other)),
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_plans() {
        assert_eq!("monthly".parse::<PlanType>(), Ok(PlanType::Monthly));
        assert_eq!("yearly".parse::<PlanType>(), Ok(PlanType::Yearly));
        assert_eq!(" Yearly ".parse::<PlanType>(), Ok(PlanType::Yearly));
        assert_eq!("annual".parse::<PlanType>(), Ok(PlanType::Yearly));
    }

    #[test]
    fn rejects_unknown_plan() {
        assert!("weekly".parse::<PlanType>().is_err());
        assert!("".parse::<PlanType>().is_err());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(PlanType::Yearly.to_string(), "yearly");
    }
}
