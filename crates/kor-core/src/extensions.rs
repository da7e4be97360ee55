//! Optional external extensions
//!
//! The registry can patch the arguments of separately-developed processing
//! steps, but only ones it explicitly knows about. The known-extension table
//! is static and typed: discovery matches discovered module names exactly
//! against it and resolves each hit into an [`ExtensionBinding`] once at
//! startup. Unrecognized modules are silently skipped. No live module
//! registry is introspected.
//!
//! Each binding carries a [`SlotContract`] — the extension's own description
//! of its argument layout by slot name — so the core never hardcodes raw
//! numeric offsets at call sites.

use indexmap::IndexMap;
use kor_host::ScriptModule;

/// Logical name of the additional-networks extension
pub const ADDITIONAL_NETWORKS: &str = "additional_networks";

/// Module name the additional-networks extension registers under
const ADDITIONAL_NETWORKS_MODULE: &str = "additional_networks.py";

/// Number of repeatable network sub-blocks in the additional-networks layout
const ADDNET_BLOCKS: usize = 5;

/// Named description of an extension's argument layout
///
/// Maps slot names to logical offsets within the extension's argument range.
/// The absolute slot is `step.args_range.start + logical_offset`.
#[derive(Debug, Clone, Default)]
pub struct SlotContract {
    slots: IndexMap<String, usize>,
}

impl SlotContract {
    /// Create an empty contract
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named slot at a logical offset
    #[must_use]
    pub fn with_slot(mut self, name: impl Into<String>, logical_offset: usize) -> Self {
        self.slots.insert(name.into(), logical_offset);
        self
    }

    /// Logical offset of a named slot
    #[inline]
    #[must_use]
    pub fn offset(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// Number of declared slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the contract declares no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Argument layout of the additional-networks extension
///
/// Slot 0 is the enabled flag; sub-block `k` (1-based) owns the model name
/// at `4(k-1)+3`, the unet weight at `4(k-1)+4` and the text-encoder weight
/// at `4(k-1)+5`.
#[must_use]
fn additional_networks_contract() -> SlotContract {
    let mut contract = SlotContract::new().with_slot("enabled", 0);
    for block in 1..=ADDNET_BLOCKS {
        let base = 4 * (block - 1);
        contract = contract
            .with_slot(format!("model_{block}"), base + 3)
            .with_slot(format!("unet_weight_{block}"), base + 4)
            .with_slot(format!("te_weight_{block}"), base + 5);
    }
    contract
}

/// Statically declared optional dependency
#[derive(Debug, Clone, Copy)]
struct KnownExtension {
    logical_name: &'static str,
    module_name: &'static str,
    contract: fn() -> SlotContract,
}

/// All extensions the registry knows how to patch
const KNOWN_EXTENSIONS: &[KnownExtension] = &[KnownExtension {
    logical_name: ADDITIONAL_NETWORKS,
    module_name: ADDITIONAL_NETWORKS_MODULE,
    contract: additional_networks_contract,
}];

/// A discovered optional extension, resolved once at startup
#[derive(Debug, Clone)]
pub struct ExtensionBinding {
    /// Logical name handlers refer to
    pub logical_name: &'static str,
    /// Module name its processing step registers under
    pub module_name: &'static str,
    /// The extension's argument layout
    pub contract: SlotContract,
    /// Model names the extension advertises, for best-effort lookup
    pub models: Vec<String>,
}

impl ExtensionBinding {
    /// Best-effort model name lookup, supplied by the extension's own list
    ///
    /// Case-insensitive substring match; the shortest matching name wins so
    /// an exact short name beats a longer one containing the query.
    #[must_use]
    pub fn resolve_model(&self, query: &str) -> Option<String> {
        let query = query.to_lowercase();
        self.models
            .iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .min_by_key(|name| name.len())
            .cloned()
    }
}

/// Set of extensions discovered at startup
#[derive(Debug, Clone, Default)]
pub struct ExtensionSet {
    bindings: IndexMap<&'static str, ExtensionBinding>,
}

impl ExtensionSet {
    /// Empty set (no optional extensions installed)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve discovered script modules against the known-extension table
    ///
    /// Exact module-name matches become typed bindings; everything else is
    /// silently skipped.
    #[must_use]
    pub fn discover(modules: &[ScriptModule]) -> Self {
        let mut bindings = IndexMap::new();
        for module in modules {
            let Some(known) = KNOWN_EXTENSIONS
                .iter()
                .find(|known| known.module_name == module.module_name)
            else {
                continue;
            };
            tracing::debug!(
                extension = known.logical_name,
                module = known.module_name,
                models = module.models.len(),
                "extension discovered"
            );
            bindings.insert(
                known.logical_name,
                ExtensionBinding {
                    logical_name: known.logical_name,
                    module_name: known.module_name,
                    contract: (known.contract)(),
                    models: module.models.clone(),
                },
            );
        }
        Self { bindings }
    }

    /// Binding for a logical extension name, if discovered
    #[inline]
    #[must_use]
    pub fn get(&self, logical_name: &str) -> Option<&ExtensionBinding> {
        self.bindings.get(logical_name)
    }

    /// Number of discovered extensions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no extensions were discovered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
