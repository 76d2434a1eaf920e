use serde::{Deserialize, Serialize};

/// Cost breakdown computed by a tariff for one billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffBreakdown {
    pub kwh: f64,
    pub subtotal: f64,
    pub charges: f64,
    pub tax: f64,
    pub total: f64,
}

/// Pricing strategy applied to a client's monthly consumption.
#[derive(Debug, Clone, PartialEq)]
pub enum Tariff {
    Residential {
        fixed_charge: f64,
        price_per_kwh: f64,
        tax_rate: f64,
    },
    Commercial {
        fixed_charge: f64,
        price_per_kwh: f64,
        surcharge: f64,
        tax_rate: f64,
    },
}

impl Tariff {
    pub fn name(&self) -> &'static str {
        match self {
            Tariff::Residential { .. } => "residential",
            Tariff::Commercial { .. } => "commercial",
        }
    }

    /// subtotal = kwh * unit price; charges = fixed charge (+ commercial
    /// surcharge); tax over subtotal + charges; total is the sum of all three.
    pub fn compute(&self, kwh: f64) -> TariffBreakdown {
        let (subtotal, charges, tax_rate) = match self {
            Tariff::Residential {
                fixed_charge,
                price_per_kwh,
                tax_rate,
            } => (kwh * price_per_kwh, *fixed_charge, *tax_rate),
            Tariff::Commercial {
                fixed_charge,
                price_per_kwh,
                surcharge,
                tax_rate,
            } => (kwh * price_per_kwh, fixed_charge + surcharge, *tax_rate),
        };

        let tax = (subtotal + charges) * tax_rate;
        TariffBreakdown {
            kwh,
            subtotal,
            charges,
            tax,
            total: subtotal + charges + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residential_breakdown() {
        let tariff = Tariff::Residential {
            fixed_charge: 1200.0,
            price_per_kwh: 120.0,
            tax_rate: 0.19,
        };
        let detail = tariff.compute(100.0);
        assert_eq!(detail.subtotal, 12000.0);
        assert_eq!(detail.charges, 1200.0);
        assert_eq!(detail.tax, 2508.0);
        assert_eq!(detail.total, 15708.0);
    }

    #[test]
    fn test_commercial_breakdown_includes_surcharge() {
        let tariff = Tariff::Commercial {
            fixed_charge: 5000.0,
            price_per_kwh: 150.0,
            surcharge: 2500.0,
            tax_rate: 0.19,
        };
        let detail = tariff.compute(10.0);
        assert_eq!(detail.subtotal, 1500.0);
        assert_eq!(detail.charges, 7500.0);
        assert_eq!(detail.tax, (1500.0 + 7500.0) * 0.19);
        assert_eq!(detail.total, detail.subtotal + detail.charges + detail.tax);
    }

    #[test]
    fn test_zero_consumption_still_pays_charges() {
        let tariff = Tariff::Residential {
            fixed_charge: 1200.0,
            price_per_kwh: 120.0,
            tax_rate: 0.19,
        };
        let detail = tariff.compute(0.0);
        assert_eq!(detail.subtotal, 0.0);
        assert_eq!(detail.charges, 1200.0);
        assert_eq!(detail.total, 1200.0 * 1.19);
    }
}
