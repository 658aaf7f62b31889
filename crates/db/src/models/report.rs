//! Row shape consumed by the settlement report aggregation.

use sqlx::FromRow;
use tripkeep_core::settlement::LedgerEntry;
use tripkeep_core::types::DbId;

/// One sender or payer row reduced to (user, amount) for aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntryRow {
    pub user_id: DbId,
    pub amount: f64,
}

impl From<LedgerEntryRow> for LedgerEntry {
    fn from(row: LedgerEntryRow) -> Self {
        LedgerEntry {
            user_id: row.user_id,
            amount: row.amount,
        }
    }
}
