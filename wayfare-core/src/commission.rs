use std::collections::HashMap;

use wayfare_domain::ServiceCategory;

use crate::{CoreError, CoreResult};

pub const DEFAULT_COMMISSION_RATE: f64 = 0.10;

/// Share of booking revenue the platform keeps.
///
/// Injected from configuration; a category override wins over the default rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionPolicy {
    default_rate: f64,
    category_rates: HashMap<ServiceCategory, f64>,
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_COMMISSION_RATE,
            category_rates: HashMap::new(),
        }
    }
}

impl CommissionPolicy {
    pub fn flat(rate: f64) -> CoreResult<Self> {
        check_rate("default", rate)?;
        Ok(Self {
            default_rate: rate,
            category_rates: HashMap::new(),
        })
    }

    pub fn with_category_rate(mut self, category: ServiceCategory, rate: f64) -> CoreResult<Self> {
        check_rate(category.as_str(), rate)?;
        self.category_rates.insert(category, rate);
        Ok(self)
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    pub fn rate_for(&self, category: Option<ServiceCategory>) -> f64 {
        category
            .and_then(|c| self.category_rates.get(&c).copied())
            .unwrap_or(self.default_rate)
    }

    pub fn commission_on(&self, amount: f64, category: Option<ServiceCategory>) -> f64 {
        amount * self.rate_for(category)
    }
}

fn check_rate(scope: &str, rate: f64) -> CoreResult<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(CoreError::InvalidCommissionRate {
            scope: scope.to_string(),
            rate,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_percent() {
        let policy = CommissionPolicy::default();
        assert_eq!(policy.rate_for(None), 0.10);
        assert_eq!(policy.rate_for(Some(ServiceCategory::Hotel)), 0.10);
    }

    #[test]
    fn test_category_override() {
        let policy = CommissionPolicy::flat(0.1)
            .unwrap()
            .with_category_rate(ServiceCategory::Flight, 0.02)
            .unwrap();
        assert_eq!(policy.rate_for(Some(ServiceCategory::Flight)), 0.02);
        assert_eq!(policy.rate_for(Some(ServiceCategory::Vehicle)), 0.1);
        assert!((policy.commission_on(1000.0, Some(ServiceCategory::Flight)) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        assert!(CommissionPolicy::flat(1.5).is_err());
        assert!(CommissionPolicy::flat(-0.1).is_err());
        assert!(CommissionPolicy::flat(f64::NAN).is_err());
        let err = CommissionPolicy::default()
            .with_category_rate(ServiceCategory::Hotel, 2.0)
            .unwrap_err();
        assert!(err.to_string().contains("hotel"));
    }
}
