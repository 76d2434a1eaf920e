use crate::app::config::TariffConfig;
use crate::domain::{Client, Tariff};

/// Selects the pricing strategy for a client.
pub struct TariffService {
    config: TariffConfig,
}

impl TariffService {
    pub fn new(config: TariffConfig) -> Self {
        Self { config }
    }

    /// A client whose billing address mentions "empresa" or "local"
    /// (case-insensitive) is billed commercially; everyone else is
    /// residential.
    pub fn tariff_for(&self, client: &Client) -> Tariff {
        let address = client.billing_address.to_lowercase();
        if address.contains("empresa") || address.contains("local") {
            Tariff::Commercial {
                fixed_charge: self.config.commercial_fixed_charge,
                price_per_kwh: self.config.commercial_price_per_kwh,
                surcharge: self.config.commercial_surcharge,
                tax_rate: self.config.tax_rate,
            }
        } else {
            Tariff::Residential {
                fixed_charge: self.config.residential_fixed_charge,
                price_per_kwh: self.config.residential_price_per_kwh,
                tax_rate: self.config.tax_rate,
            }
        }
    }
}
