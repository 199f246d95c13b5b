use crate::{BackendSet, BackendType, RegistryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use BackendType::{Jes, Local, Sge};

/// Runtime attribute a workflow author may attach to a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuntimeKey {
    Cpu,
    DefaultDisks,
    DefaultZones,
    Docker,
    FailOnStderr,
    FailOnRc,
    Memory,
    Preemptible,
}

/// Per-key support record: where the key must appear, and where it may.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySupport {
    pub key: RuntimeKey,
    /// Identifier matched against workflow text, case-sensitive
    pub name: &'static str,
    pub mandatory: BackendSet,
    pub optional: BackendSet,
}

impl KeySupport {
    const fn new(
        key: RuntimeKey,
        name: &'static str,
        mandatory: &[BackendType],
        optional: &[BackendType],
    ) -> Self {
        Self {
            key,
            name,
            mandatory: BackendSet::of(mandatory),
            optional: BackendSet::of(optional),
        }
    }

    const fn optional(key: RuntimeKey, name: &'static str, optional: &[BackendType]) -> Self {
        Self::new(key, name, &[], optional)
    }
}

const DEFINITIONS: [KeySupport; 8] = [
    KeySupport::optional(RuntimeKey::Cpu, "cpu", &[Jes]),
    KeySupport::optional(RuntimeKey::DefaultDisks, "defaultDisks", &[Jes]),
    KeySupport::optional(RuntimeKey::DefaultZones, "defaultZones", &[Jes]),
    KeySupport::new(RuntimeKey::Docker, "docker", &[Jes], &[Local]),
    KeySupport::optional(RuntimeKey::FailOnStderr, "failOnStderr", &[Jes, Local, Sge]),
    KeySupport::optional(RuntimeKey::FailOnRc, "failOnRc", &[Local, Sge]),
    KeySupport::optional(RuntimeKey::Memory, "memory", &[Jes]),
    KeySupport::optional(RuntimeKey::Preemptible, "preemptible", &[Jes]),
];

/// Indexed by `RuntimeKey as usize`.
pub(crate) static TABLE: [KeySupport; 8] = DEFINITIONS;

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

// A malformed table fails the build rather than surfacing at runtime.
const _: () = {
    assert!(DEFINITIONS.len() == RuntimeKey::ALL.len());
    let mut i = 0;
    while i < DEFINITIONS.len() {
        let entry = &DEFINITIONS[i];
        assert!(entry.key as usize == i, "runtime key table out of declaration order");
        assert!(
            entry.mandatory.is_disjoint(entry.optional),
            "runtime key is both mandatory and optional on one backend"
        );
        let mut j = i + 1;
        while j < DEFINITIONS.len() {
            assert!(!str_eq(entry.name, DEFINITIONS[j].name), "duplicate runtime key name");
            j += 1;
        }
        i += 1;
    }
};

impl RuntimeKey {
    /// Every key, in declaration order
    pub const ALL: [RuntimeKey; 8] = [
        RuntimeKey::Cpu,
        RuntimeKey::DefaultDisks,
        RuntimeKey::DefaultZones,
        RuntimeKey::Docker,
        RuntimeKey::FailOnStderr,
        RuntimeKey::FailOnRc,
        RuntimeKey::Memory,
        RuntimeKey::Preemptible,
    ];

    pub fn definition(self) -> &'static KeySupport {
        &TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Backends on which this key must be supplied
    pub fn mandatory(self) -> BackendSet {
        self.definition().mandatory
    }

    /// Backends on which this key may be supplied
    pub fn optional(self) -> BackendSet {
        self.definition().optional
    }

    pub fn is_mandatory(self, backend: BackendType) -> bool {
        self.definition().mandatory.contains(backend)
    }

    pub fn is_optional(self, backend: BackendType) -> bool {
        self.definition().optional.contains(backend)
    }

    /// True if the key is mandatory or optional on `backend`.
    ///
    /// A key that is not supported must be rejected when a workflow assigns
    /// it to that backend.
    pub fn supports(self, backend: BackendType) -> bool {
        self.is_mandatory(backend) || self.is_optional(backend)
    }

    pub fn support(self, backend: BackendType) -> Support {
        if self.is_mandatory(backend) {
            Support::Mandatory
        } else if self.is_optional(backend) {
            Support::Optional
        } else {
            Support::Unsupported
        }
    }

    /// Exact, case-sensitive match against the key name
    pub fn from_name(name: &str) -> Option<RuntimeKey> {
        RuntimeKey::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for RuntimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuntimeKey {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuntimeKey::from_name(s).ok_or_else(|| {
            tracing::debug!(name = s, "unrecognized runtime key");
            RegistryError::UnknownKey(s.to_string())
        })
    }
}

/// How a backend treats a runtime key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    Mandatory,
    Optional,
    Unsupported,
}

impl Support {
    pub fn is_supported(self) -> bool {
        !matches!(self, Support::Unsupported)
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Support::Mandatory => write!(f, "mandatory"),
            Support::Optional => write!(f, "optional"),
            Support::Unsupported => write!(f, "unsupported"),
        }
    }
}
