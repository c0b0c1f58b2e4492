//! Positions ledger: units held and cost-basis running mean per ETF.

use std::collections::BTreeMap;

/// Round to two decimal places, the ledger's money precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub units: u32,
    pub average_price: f64,
}

impl Holding {
    pub fn flat() -> Self {
        Holding {
            units: 0,
            average_price: 0.0,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.units == 0
    }
}

/// Holdings keyed by ETF name. Ordered so that full-table rewrites are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsBook {
    entries: BTreeMap<String, Holding>,
}

impl HoldingsBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// All-zero book covering the given ETF names. Used as the fallback when
    /// the persisted holdings table cannot be read.
    pub fn zeroed(names: &[String]) -> Self {
        let entries = names
            .iter()
            .map(|name| (name.clone(), Holding::flat()))
            .collect();
        HoldingsBook { entries }
    }

    pub fn get(&self, etf: &str) -> Option<&Holding> {
        self.entries.get(etf)
    }

    pub fn units(&self, etf: &str) -> u32 {
        self.entries.get(etf).map_or(0, |h| h.units)
    }

    pub fn set(&mut self, etf: &str, holding: Holding) {
        self.entries.insert(etf.to_string(), holding);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Holding)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Buy one unit at `price`: increment units and fold the fill into the
    /// cost-basis running mean, rounded to 2 dp.
    pub fn buy(&mut self, etf: &str, price: f64) {
        let holding = self
            .entries
            .entry(etf.to_string())
            .or_insert_with(Holding::flat);
        let new_units = holding.units + 1;
        holding.average_price =
            round2((holding.average_price * holding.units as f64 + price) / new_units as f64);
        holding.units = new_units;
    }

    /// Sell one unit if any are held. Returns false when the position is flat,
    /// so units can never go negative. The average price resets to 0 when the
    /// last unit is sold.
    pub fn sell(&mut self, etf: &str) -> bool {
        match self.entries.get_mut(etf) {
            Some(holding) if holding.units > 0 => {
                holding.units -= 1;
                if holding.units == 0 {
                    holding.average_price = 0.0;
                }
                true
            }
            _ => false,
        }
    }
}
