use crate::error::CatalogError;
use crate::PlanId;
use serde::{Deserialize, Serialize};

/// Maximum playback quality a plan allows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Sd,
    Hd,
    FullHd,
    UltraHd,
}

/// A subscription tier. Construction validates price and screen count;
/// the mutators do not re-validate (matching how tiers are edited in place
/// during catalog maintenance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    id: PlanId,
    name: String,
    monthly_price: f64,
    screen_limit: u32,
    quality: Quality,
}

impl Plan {
    pub fn new(
        id: PlanId,
        name: impl Into<String>,
        monthly_price: f64,
        screen_limit: u32,
        quality: Quality,
    ) -> Result<Self, CatalogError> {
        if monthly_price < 0.0 {
            return Err(CatalogError::InvalidPrice(monthly_price));
        }
        if screen_limit == 0 {
            return Err(CatalogError::InvalidScreenLimit);
        }
        Ok(Self {
            id,
            name: name.into(),
            monthly_price,
            screen_limit,
            quality,
        })
    }

    pub fn id(&self) -> PlanId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn monthly_price(&self) -> f64 {
        self.monthly_price
    }

    pub fn screen_limit(&self) -> u32 {
        self.screen_limit
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_monthly_price(&mut self, monthly_price: f64) {
        self.monthly_price = monthly_price;
    }

    pub fn set_screen_limit(&mut self, screen_limit: u32) {
        self.screen_limit = screen_limit;
    }

    pub fn set_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_plan_valid() {
        let plan = Plan::new(1, "Premium", 799.0, 4, Quality::UltraHd).unwrap();
        assert_eq!(plan.id(), 1);
        assert_eq!(plan.name(), "Premium");
        assert_eq!(plan.monthly_price(), 799.0);
        assert_eq!(plan.screen_limit(), 4);
        assert_eq!(plan.quality(), Quality::UltraHd);
    }

    #[test]
    fn test_new_plan_rejects_negative_price() {
        let err = Plan::new(1, "Broken", -1.0, 1, Quality::Sd).unwrap_err();
        assert_eq!(err, CatalogError::InvalidPrice(-1.0));
    }

    #[test]
    fn test_new_plan_rejects_zero_screens() {
        let err = Plan::new(1, "Broken", 99.0, 0, Quality::Sd).unwrap_err();
        assert_eq!(err, CatalogError::InvalidScreenLimit);
    }

    #[test]
    fn test_mutators_do_not_validate() {
        let mut plan = Plan::new(1, "Basic", 199.0, 1, Quality::Sd).unwrap();
        plan.set_monthly_price(-5.0);
        plan.set_name("Renamed");
        assert_eq!(plan.monthly_price(), -5.0);
        assert_eq!(plan.name(), "Renamed");
    }
}
