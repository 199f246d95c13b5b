use crate::key::TABLE;
use crate::{BackendSet, BackendType, KeySupport, Result, RuntimeKey, Support};
use serde::{Deserialize, Serialize};

static GLOBAL: RuntimeKeyRegistry = RuntimeKeyRegistry {
    definitions: &TABLE,
};

/// Serializable row describing one runtime key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub key: RuntimeKey,
    pub mandatory: BackendSet,
    pub optional: BackendSet,
}

impl From<&KeySupport> for KeyEntry {
    fn from(definition: &KeySupport) -> Self {
        Self {
            key: definition.key,
            mandatory: definition.mandatory,
            optional: definition.optional,
        }
    }
}

/// Read-only table of runtime keys and the backends that recognize them
#[derive(Debug, Clone, Copy)]
pub struct RuntimeKeyRegistry {
    definitions: &'static [KeySupport],
}

impl RuntimeKeyRegistry {
    pub fn new() -> Self {
        *Self::global()
    }

    /// The process-wide registry
    pub fn global() -> &'static RuntimeKeyRegistry {
        &GLOBAL
    }

    pub fn is_mandatory(&self, key: RuntimeKey, backend: BackendType) -> bool {
        self.definition(key).mandatory.contains(backend)
    }

    pub fn is_optional(&self, key: RuntimeKey, backend: BackendType) -> bool {
        self.definition(key).optional.contains(backend)
    }

    /// Whether `key` means anything at all on `backend`
    pub fn supports(&self, key: RuntimeKey, backend: BackendType) -> bool {
        self.is_mandatory(key, backend) || self.is_optional(key, backend)
    }

    pub fn support(&self, key: RuntimeKey, backend: BackendType) -> Support {
        if self.is_mandatory(key, backend) {
            Support::Mandatory
        } else if self.is_optional(key, backend) {
            Support::Optional
        } else {
            Support::Unsupported
        }
    }

    pub fn definition(&self, key: RuntimeKey) -> &'static KeySupport {
        &self.definitions[key as usize]
    }

    /// Resolve a key name as written in a workflow
    pub fn lookup(&self, name: &str) -> Result<RuntimeKey> {
        name.parse()
    }

    /// All keys, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = RuntimeKey> + 'static {
        let definitions = self.definitions;
        definitions.iter().map(|definition| definition.key)
    }

    pub fn entries(&self) -> Vec<KeyEntry> {
        self.definitions.iter().map(KeyEntry::from).collect()
    }

    /// Keys a workflow must supply when targeting `backend`
    pub fn mandatory_keys(&self, backend: BackendType) -> impl Iterator<Item = RuntimeKey> + 'static {
        let definitions = self.definitions;
        definitions
            .iter()
            .filter(move |definition| definition.mandatory.contains(backend))
            .map(|definition| definition.key)
    }

    /// Keys a workflow may supply when targeting `backend`
    pub fn supported_keys(&self, backend: BackendType) -> impl Iterator<Item = RuntimeKey> + 'static {
        let definitions = self.definitions;
        definitions
            .iter()
            .filter(move |definition| definition.mandatory.union(definition.optional).contains(backend))
            .map(|definition| definition.key)
    }
}

impl Default for RuntimeKeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
