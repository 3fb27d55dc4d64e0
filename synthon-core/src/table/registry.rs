use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::debug;

use crate::constants::GENETIC_CODES;
use crate::table::GeneticCodeTable;
use crate::types::SynthonError;

/// Every supported genetic code, built on first access and never mutated
static REGISTRY: LazyLock<BTreeMap<u8, GeneticCodeTable>> = LazyLock::new(|| {
    let tables: BTreeMap<u8, GeneticCodeTable> = GENETIC_CODES
        .iter()
        .filter_map(|definition| {
            GeneticCodeTable::build(definition.id)
                .ok()
                .map(|table| (definition.id, table))
        })
        .collect();
    debug!("Built {} genetic code tables", tables.len());
    tables
});

/// Shared read-only table for a numbered genetic code.
///
/// The returned reference is the same instance on every call, so hot paths
/// can look tables up repeatedly without rebuilding them.
///
/// # Errors
///
/// Returns [`SynthonError::UnknownTableId`] for unsupported ids.
pub fn lookup(table_id: u8) -> Result<&'static GeneticCodeTable, SynthonError> {
    REGISTRY
        .get(&table_id)
        .ok_or(SynthonError::UnknownTableId(table_id))
}

/// Ids and names of the supported genetic codes, in id order
pub fn supported_tables() -> impl Iterator<Item = (u8, &'static str)> {
    GENETIC_CODES
        .iter()
        .map(|definition| (definition.id, definition.name))
}
