//! Deterministic QA lookups.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Global QA table instance.
static QA_TABLE: OnceLock<QaTable> = OnceLock::new();

/// (category, service, origin zip, destination zip, days)
const QA_ENTRIES: [(i32, i32, i32, i32, i64); 52] = [
    (37908, 19, 95126, 90067, 2),
    (37908, 20, 95126, 90067, 1),
    (37908, 21, 95126, 90067, 1),
    (37908, 3, 95126, 90067, 3),
    (37908, 7, 95126, 90067, 2),
    (37908, 9, 95126, 90067, 11),
    (37908, 22, 95126, 90067, 3),
    (37908, 23, 95126, 90067, 4),
    (37908, 24, 95126, 90067, 5),
    (37908, 4, 95126, 90067, 5),
    (37908, 5, 95126, 90067, 3),
    (37908, 1, 95126, 90067, 7),
    (162917, 1, 95126, 10002, 3),
    (162917, 3, 95126, 10002, 2),
    (162917, 7, 95126, 10002, 1),
    (162917, 8, 95126, 10002, 4),
    (162917, 10, 95126, 10002, 6),
    (162917, 11, 95126, 10002, 2),
    (43304, 1, 95126, 96125, 7),
    (43304, 3, 95126, 96125, 1),
    (43304, 7, 95126, 96125, 4),
    (43304, 8, 95126, 96125, 3),
    (43304, 9, 95126, 96125, 3),
    (43304, 10, 95126, 96125, 9),
    (43304, 14, 95126, 96125, 1),
    (43304, 19, 95126, 96125, 1),
    (43304, 22, 95126, 96125, 3),
    (42428, 1, 95126, 89412, 6),
    (42428, 3, 95126, 89412, 4),
    (42428, 7, 95126, 89412, 2),
    (42428, 8, 95126, 89412, 3),
    (42428, 10, 95126, 89412, 8),
    (42428, 14, 95126, 89412, 10),
    (42428, 19, 95126, 89412, 4),
    (42428, 22, 95126, 89412, 3),
    (169323, 1, 95126, 90067, 6),
    (169323, 3, 95126, 90067, 4),
    (169323, 7, 95126, 90067, 2),
    (169323, 8, 95126, 90067, 3),
    (169323, 10, 95126, 90067, 8),
    (169323, 14, 95126, 90067, 10),
    (169323, 19, 95126, 90067, 4),
    (169323, 22, 95126, 90067, 3),
    (50460, 1, 95126, 10002, 7),
    (50460, 3, 95126, 10002, 1),
    (50460, 7, 95126, 10002, 4),
    (50460, 8, 95126, 10002, 3),
    (50460, 9, 95126, 10002, 3),
    (50460, 10, 95126, 10002, 9),
    (50460, 14, 95126, 10002, 1),
    (50460, 19, 95126, 10002, 1),
    (50460, 22, 95126, 10002, 3),
];

/// Key of a QA lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QaKey {
    /// Leaf category.
    pub category: i32,
    /// Shipping service.
    pub service: i32,
    /// Full numeric origin postal code.
    pub origin_zip: i32,
    /// Full numeric destination postal code.
    pub dest_zip: i32,
}

/// Fixed day counts for end-to-end test listings.
#[derive(Debug)]
pub struct QaTable {
    entries: HashMap<QaKey, i64>,
}

impl QaTable {
    /// Returns the global QA table.
    #[must_use]
    pub fn global() -> &'static Self {
        QA_TABLE.get_or_init(Self::load)
    }

    fn load() -> Self {
        let entries = QA_ENTRIES
            .iter()
            .map(|&(category, service, origin_zip, dest_zip, days)| {
                (
                    QaKey {
                        category,
                        service,
                        origin_zip,
                        dest_zip,
                    },
                    days,
                )
            })
            .collect();
        Self { entries }
    }

    /// Returns the fixed day count for a key.
    #[must_use]
    pub fn lookup(&self, key: &QaKey) -> Option<i64> {
        self.entries.get(key).copied()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
