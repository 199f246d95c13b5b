use crate::RegistryError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Execution backend a workflow can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BackendType {
    /// Cloud job service
    Jes,
    /// Local process execution
    Local,
    /// Grid engine cluster queue
    Sge,
}

impl BackendType {
    /// Every backend, in declaration order
    pub const ALL: [BackendType; 3] = [BackendType::Jes, BackendType::Local, BackendType::Sge];

    pub const fn as_str(self) -> &'static str {
        match self {
            BackendType::Jes => "JES",
            BackendType::Local => "LOCAL",
            BackendType::Sge => "SGE",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendType::ALL
            .into_iter()
            .find(|backend| backend.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RegistryError::UnknownBackend(s.to_string()))
    }
}

/// Unordered set of backends without duplicates.
///
/// Stored as a bitmask so tables of sets can be built in `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BackendSet(u8);

impl BackendSet {
    pub const EMPTY: BackendSet = BackendSet(0);

    /// Build a set from a list; repeated entries collapse.
    pub const fn of(backends: &[BackendType]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < backends.len() {
            bits |= backends[i].bit();
            i += 1;
        }
        BackendSet(bits)
    }

    pub const fn contains(self, backend: BackendType) -> bool {
        self.0 & backend.bit() != 0
    }

    pub const fn is_disjoint(self, other: BackendSet) -> bool {
        self.0 & other.0 == 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: BackendSet) -> BackendSet {
        BackendSet(self.0 | other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in declaration order of [`BackendType`]
    pub fn iter(self) -> impl Iterator<Item = BackendType> {
        BackendType::ALL
            .into_iter()
            .filter(move |backend| self.contains(*backend))
    }
}

impl FromIterator<BackendType> for BackendSet {
    fn from_iter<I: IntoIterator<Item = BackendType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(BackendSet::EMPTY, |set, backend| BackendSet(set.0 | backend.bit()))
    }
}

impl Serialize for BackendSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for BackendSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let backends = Vec::<BackendType>::deserialize(deserializer)?;
        Ok(backends.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_membership() {
        let set = BackendSet::of(&[BackendType::Jes, BackendType::Sge]);

        assert!(set.contains(BackendType::Jes));
        assert!(!set.contains(BackendType::Local));
        assert!(set.contains(BackendType::Sge));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = BackendSet::of(&[BackendType::Local, BackendType::Local]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![BackendType::Local]);
    }

    #[test]
    fn test_empty_set() {
        assert!(BackendSet::EMPTY.is_empty());
        assert_eq!(BackendSet::EMPTY.iter().count(), 0);
        assert_eq!(BackendSet::default(), BackendSet::EMPTY);
    }

    #[test]
    fn test_disjoint_and_union() {
        let jes = BackendSet::of(&[BackendType::Jes]);
        let rest = BackendSet::of(&[BackendType::Local, BackendType::Sge]);

        assert!(jes.is_disjoint(rest));
        assert!(!jes.is_disjoint(jes.union(rest)));
        assert_eq!(jes.union(rest).len(), BackendType::ALL.len());
    }

    #[test]
    fn test_backend_parse_ignores_case() {
        assert_eq!("JES".parse::<BackendType>(), Ok(BackendType::Jes));
        assert_eq!("local".parse::<BackendType>(), Ok(BackendType::Local));
        assert_eq!("Sge".parse::<BackendType>(), Ok(BackendType::Sge));
        assert_eq!(
            "kubernetes".parse::<BackendType>(),
            Err(RegistryError::UnknownBackend("kubernetes".to_string()))
        );
    }
}
