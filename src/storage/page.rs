use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::error::Result;

/// Keyset page request over primary keys. `after` and `before` are
/// exclusive bounds; without `first` or `last` the whole range is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub first: Option<usize>,
    pub last: Option<usize>,
}

impl PageRequest {
    pub fn first(n: usize) -> Self {
        Self {
            first: Some(n),
            ..Self::default()
        }
    }

    pub fn after(mut self, id: i64) -> Self {
        self.after = Some(id);
        self
    }

    pub fn before(mut self, id: i64) -> Self {
        self.before = Some(id);
        self
    }

    pub fn with_last(mut self, n: usize) -> Self {
        self.last = Some(n);
        self
    }
}

/// One page of rows in ascending primary-key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Where a page is taken from: a table, its columns, and an optional
/// equality filter on one column.
pub(crate) struct Source<'a> {
    pub table: &'static str,
    pub columns: &'static str,
    pub scope: Option<(&'static str, i64)>,
    pub pool: &'a SqlitePool,
}

impl Source<'_> {
    fn select(&self, what: &str) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM {} WHERE 1 = 1", what, self.table));
        if let Some((column, value)) = self.scope {
            qb.push(format!(" AND {} = ", column)).push_bind(value);
        }
        qb
    }

    pub async fn count(&self) -> Result<i64> {
        let count = self
            .select("COUNT(*)")
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Whether any row satisfies `id <op> bound` within the scope.
    async fn any_beyond(&self, op: &str, bound: i64) -> Result<bool> {
        let mut qb = self.select("COUNT(*)");
        qb.push(format!(" AND id {} ", op)).push_bind(bound);
        let count = qb.build_query_scalar::<i64>().fetch_one(self.pool).await?;
        Ok(count > 0)
    }

    pub async fn page<T>(&self, req: &PageRequest) -> Result<Page<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let (first, last) = (req.first, req.last);

        let mut qb = self.select(self.columns);
        if let Some(after) = req.after {
            qb.push(" AND id > ").push_bind(after);
        }
        if let Some(before) = req.before {
            qb.push(" AND id < ").push_bind(before);
        }

        // `first` slices from the front of the range, `last` from the back
        // (of what `first` left, when both are given).
        let (mut items, mut has_next_page, mut has_previous_page) = match (first, last) {
            (Some(n), _) => {
                qb.push(" ORDER BY id ASC LIMIT ").push_bind((n + 1) as i64);
                let mut rows: Vec<T> = qb.build_query_as::<T>().fetch_all(self.pool).await?;
                let more = rows.len() > n;
                rows.truncate(n);
                (rows, more, false)
            }
            (None, Some(n)) => {
                qb.push(" ORDER BY id DESC LIMIT ").push_bind((n + 1) as i64);
                let mut rows: Vec<T> = qb.build_query_as::<T>().fetch_all(self.pool).await?;
                let more = rows.len() > n;
                rows.truncate(n);
                rows.reverse();
                (rows, false, more)
            }
            (None, None) => {
                qb.push(" ORDER BY id ASC");
                let rows: Vec<T> = qb.build_query_as::<T>().fetch_all(self.pool).await?;
                (rows, false, false)
            }
        };

        if let (Some(_), Some(n)) = (first, last) {
            if items.len() > n {
                items.drain(..items.len() - n);
                has_previous_page = true;
            }
        }

        if !has_previous_page {
            if let Some(after) = req.after {
                has_previous_page = self.any_beyond("<=", after).await?;
            }
        }
        if !has_next_page {
            if let Some(before) = req.before {
                has_next_page = self.any_beyond(">=", before).await?;
            }
        }

        Ok(Page {
            items,
            has_previous_page,
            has_next_page,
        })
    }
}
