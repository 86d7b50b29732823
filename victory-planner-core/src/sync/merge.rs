//! Capturing and applying snapshots.
//!
//! Applying is a whole-dataset replacement: the receiving device takes the
//! snapshot's identity and every table is overwritten. The last import wins;
//! nothing is merged per record. Callers holding records in memory must
//! reload them afterwards.

use super::snapshot::Snapshot;
use crate::identity::IdentityProvider;
use crate::storage::KeyValueStorage;
use crate::store::TableStore;
use crate::table::Table;

/// Reads the identity and the full content of every domain table.
pub fn capture_snapshot<S: KeyValueStorage>(
    identity: &IdentityProvider<S>,
    store: &TableStore<S>,
) -> Snapshot {
    let mut snapshot = Snapshot::new(identity.get_identity());

    for table in Table::ALL {
        *snapshot.table_mut(table) = store.rows(table);
    }

    tracing::info!(
        "Captured snapshot with {} record(s) for {}",
        snapshot.record_count(),
        snapshot.user_id
    );
    snapshot
}

/// Replaces the local identity and every domain table with the snapshot's.
pub fn apply_snapshot<S: KeyValueStorage>(
    identity: &IdentityProvider<S>,
    store: &TableStore<S>,
    snapshot: &Snapshot,
) {
    identity.set_identity(&snapshot.user_id);

    for table in Table::ALL {
        store.replace(table, snapshot.table(table));
    }

    tracing::info!(
        "Applied snapshot with {} record(s) for {}",
        snapshot.record_count(),
        snapshot.user_id
    );
}
