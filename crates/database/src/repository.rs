use crate::DbError;
use chrono::NaiveDateTime;
use core_types::{CellValue, RawRecordSet};
use normalizer::NormalizedDataset;
use sqlx::FromRow;
use sqlx::sqlite::SqlitePool;

/// Column order of a record set read back from the store.
pub const STORED_COLUMNS: [&str; 11] = [
    "id",
    "date",
    "market",
    "direction",
    "entry",
    "stop_loss",
    "take_profit",
    "exit_price",
    "quantity",
    "pnl",
    "notes",
];

/// A row of the `trades` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StoredTrade {
    pub id: i64,
    pub date: Option<NaiveDateTime>,
    pub market: Option<String>,
    pub direction: Option<String>,
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub exit_price: Option<f64>,
    pub quantity: Option<f64>,
    pub pnl: Option<f64>,
    pub notes: Option<String>,
}

impl StoredTrade {
    fn into_cells(self) -> Vec<CellValue> {
        vec![
            CellValue::Number(self.id as f64),
            self.date.map_or(CellValue::Empty, CellValue::Timestamp),
            self.market.as_deref().map_or(CellValue::Empty, CellValue::from_text),
            self.direction.as_deref().map_or(CellValue::Empty, CellValue::from_text),
            self.entry.into(),
            self.stop_loss.into(),
            self.take_profit.into(),
            self.exit_price.into(),
            self.quantity.into(),
            self.pnl.into(),
            self.notes.as_deref().map_or(CellValue::Empty, CellValue::from_text),
        ]
    }
}

/// The `TradeStore` encapsulates all SQL for the trade history.
#[derive(Debug, Clone)]
pub struct TradeStore {
    pool: SqlitePool,
}

impl TradeStore {
    /// Creates a new `TradeStore` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends every trade of the dataset within a single transaction.
    ///
    /// Missing market/direction are stored as `"Unknown"` (the `TradeRecord`
    /// default), missing prices and PnL as `0`, a missing quantity as `1` and
    /// missing notes as empty. An unparsed date is stored as NULL. Returns the
    /// number of rows inserted.
    pub async fn save_trades(&self, dataset: &NormalizedDataset) -> Result<u64, DbError> {
        let trades = dataset.trades();
        let mut tx = self.pool.begin().await?;

        let mut inserted = 0u64;
        for trade in &trades {
            let result = sqlx::query(
                r#"
                INSERT INTO trades (
                    date, market, direction, entry, stop_loss, take_profit,
                    exit_price, quantity, pnl, notes
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(trade.date)
            .bind(trade.market.as_str())
            .bind(trade.direction.as_str())
            .bind(trade.entry.unwrap_or(0.0))
            .bind(trade.stop_loss.unwrap_or(0.0))
            .bind(trade.take_profit.unwrap_or(0.0))
            .bind(trade.exit_price.unwrap_or(0.0))
            .bind(trade.quantity.unwrap_or(1.0))
            .bind(trade.pnl.unwrap_or(0.0))
            .bind(trade.notes.as_str())
            .execute(&mut *tx) // Note: must use the transaction object `tx` here
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        tracing::info!(inserted, "Saved trades to history");
        Ok(inserted)
    }

    /// Fetches every stored trade in insertion order.
    pub async fn fetch_all(&self) -> Result<Vec<StoredTrade>, DbError> {
        let trades = sqlx::query_as::<_, StoredTrade>(
            "SELECT id, date, market, direction, entry, stop_loss, take_profit, \
             exit_price, quantity, pnl, notes FROM trades ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(trades)
    }

    /// Reads the whole table back as a raw record set, ready for normalization.
    pub async fn load_trades(&self) -> Result<RawRecordSet, DbError> {
        let columns = STORED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = self
            .fetch_all()
            .await?
            .into_iter()
            .map(StoredTrade::into_cells)
            .collect();
        Ok(RawRecordSet::from_rows(columns, rows)?)
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trades")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
