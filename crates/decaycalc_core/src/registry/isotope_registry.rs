//! Immutable label -> isotope registry.

use crate::model::isotope::{HalfLifeUnit, Isotope, IsotopeError};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static BUILTIN_REGISTRY: Lazy<IsotopeRegistry> = Lazy::new(|| {
    builtin_isotopes()
        .and_then(IsotopeRegistry::from_isotopes)
        .expect("valid built-in isotope table")
});

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry construction and lookup errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    DuplicateLabel(String),
    InvalidIsotope(IsotopeError),
    UnknownIsotope(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateLabel(label) => write!(f, "isotope label already registered: {label}"),
            Self::InvalidIsotope(err) => write!(f, "{err}"),
            Self::UnknownIsotope(label) => write!(f, "unknown isotope: {label}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidIsotope(err) => Some(err),
            Self::DuplicateLabel(_) | Self::UnknownIsotope(_) => None,
        }
    }
}

impl From<IsotopeError> for RegistryError {
    fn from(value: IsotopeError) -> Self {
        Self::InvalidIsotope(value)
    }
}

/// The fixed isotope table shipped with the calculator.
pub fn builtin_isotopes() -> RegistryResult<Vec<Isotope>> {
    Ok(vec![
        Isotope::new(18, "F", 109.771, HalfLifeUnit::Minutes)?,
        Isotope::with_label(99, "mTc", 6.00718, HalfLifeUnit::Hours, "99m-Tc")?,
        Isotope::new(68, "Ge", 270.95, HalfLifeUnit::Days)?,
        Isotope::new(166, "Ho", 26.8, HalfLifeUnit::Hours)?,
        Isotope::new(123, "I", 13.22, HalfLifeUnit::Hours)?,
    ])
}

/// Read-only isotope catalog keyed by label.
#[derive(Debug, Clone, Default)]
pub struct IsotopeRegistry {
    isotopes: BTreeMap<String, Isotope>,
}

impl IsotopeRegistry {
    /// Builds a registry, rejecting duplicate labels.
    pub fn from_isotopes(isotopes: Vec<Isotope>) -> RegistryResult<Self> {
        let mut map = BTreeMap::new();
        for isotope in isotopes {
            if map.contains_key(isotope.label.as_str()) {
                return Err(RegistryError::DuplicateLabel(isotope.label));
            }
            map.insert(isotope.label.clone(), isotope);
        }
        debug!(
            "event=registry_build module=registry status=ok isotopes={}",
            map.len()
        );
        Ok(Self { isotopes: map })
    }

    /// Process-wide registry over [`builtin_isotopes`].
    pub fn builtin() -> &'static IsotopeRegistry {
        &BUILTIN_REGISTRY
    }

    /// Resolves a label (surrounding whitespace ignored).
    pub fn lookup(&self, label: &str) -> RegistryResult<&Isotope> {
        let label = label.trim();
        self.isotopes
            .get(label)
            .ok_or_else(|| RegistryError::UnknownIsotope(label.to_string()))
    }

    /// Isotopes ordered by mass, ties broken by label.
    pub fn list(&self) -> Vec<&Isotope> {
        let mut isotopes: Vec<&Isotope> = self.isotopes.values().collect();
        isotopes.sort_by(|a, b| a.mass.cmp(&b.mass).then_with(|| a.label.cmp(&b.label)));
        isotopes
    }

    pub fn len(&self) -> usize {
        self.isotopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.isotopes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{IsotopeRegistry, RegistryError};
    use crate::model::isotope::{HalfLifeUnit, Isotope};

    #[test]
    fn builtin_lookup_trims_label() {
        let registry = IsotopeRegistry::builtin();
        let isotope = registry.lookup(" 99m-Tc ").unwrap();
        assert_eq!(isotope.name, "mTc");
        assert!((isotope.halflife_seconds() - 6.00718 * 3_600.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_label_is_reported() {
        let err = IsotopeRegistry::builtin().lookup("99-Tc").unwrap_err();
        assert_eq!(err, RegistryError::UnknownIsotope("99-Tc".to_string()));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = IsotopeRegistry::from_isotopes(vec![
            Isotope::new(18, "F", 109.771, HalfLifeUnit::Minutes).unwrap(),
            Isotope::new(18, "F", 110.0, HalfLifeUnit::Minutes).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateLabel("18-F".to_string()));
    }

    #[test]
    fn equal_mass_orders_by_label() {
        let registry = IsotopeRegistry::from_isotopes(vec![
            Isotope::with_label(99, "mTc", 6.00718, HalfLifeUnit::Hours, "99m-Tc").unwrap(),
            Isotope::new(99, "Mo", 65.94, HalfLifeUnit::Hours).unwrap(),
            Isotope::new(18, "F", 109.771, HalfLifeUnit::Minutes).unwrap(),
        ])
        .unwrap();
        let labels: Vec<&str> = registry.list().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["18-F", "99-Mo", "99m-Tc"]);
    }
}
