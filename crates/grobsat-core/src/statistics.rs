//! Named counters for reporting.

use std::fmt;

/// A statistic value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatValue {
    /// An event count or size.
    Count(u64),
    /// A measured quantity.
    Real(f64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{n}"),
            StatValue::Real(x) => write!(f, "{x:.2}"),
        }
    }
}

/// An ordered collection of named statistics.
///
/// Updating an existing key accumulates: counts are summed, reals too.
/// Several engines can therefore report into one collector.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    entries: Vec<(&'static str, StatValue)>,
}

impl Statistics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, key: &'static str) -> Option<&mut StatValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Adds `n` to the counter `key`.
    pub fn update(&mut self, key: &'static str, n: u64) {
        match self.slot(key) {
            Some(StatValue::Count(c)) => *c += n,
            Some(StatValue::Real(x)) => *x += n as f64,
            None => self.entries.push((key, StatValue::Count(n))),
        }
    }

    /// Adds `x` to the real-valued statistic `key`.
    pub fn update_real(&mut self, key: &'static str, x: f64) {
        match self.slot(key) {
            Some(v) => {
                let base = match *v {
                    StatValue::Count(c) => c as f64,
                    StatValue::Real(r) => r,
                };
                *v = StatValue::Real(base + x);
            }
            None => self.entries.push((key, StatValue::Real(x))),
        }
    }

    /// Looks up a statistic.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<StatValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Looks up a counter, treating a missing key as zero.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        match self.get(key) {
            Some(StatValue::Count(n)) => n,
            Some(StatValue::Real(x)) => x as u64,
            None => 0,
        }
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, StatValue)> + '_ {
        self.entries.iter().copied()
    }

    /// Removes every entry.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_accumulates() {
        let mut st = Statistics::new();
        st.update("steps", 3);
        st.update("steps", 4);
        st.update_real("size", 1.5);

        assert_eq!(st.count("steps"), 7);
        assert_eq!(st.get("size"), Some(StatValue::Real(1.5)));
        assert_eq!(st.count("missing"), 0);
        assert_eq!(st.to_string(), "steps: 7\nsize: 1.50\n");
    }
}
