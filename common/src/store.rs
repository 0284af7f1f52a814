//! 抽出レコードのストア
//!
//! 新しいレコードは先頭に入る（新しい順）。
//! 存在しないIDへの更新・削除は黙って無視する。

use std::cell::RefCell;

use crate::types::{ExtractionResult, ExtractionStatus, NewRecord, RecordId, RecordUpdate};

/// ステータス別の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub processing: usize,
    pub completed: usize,
    pub error: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    records: Vec<ExtractionResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// processing 状態で先頭に追加し、IDを即座に返す
    pub fn append(&mut self, record: NewRecord) -> RecordId {
        let id = RecordId::next();
        self.records.insert(
            0,
            ExtractionResult {
                id,
                image_source: record.image_source,
                file_name: record.file_name,
                extracted_text: String::new(),
                status: ExtractionStatus::Processing,
                error_message: None,
                timestamp: record.timestamp,
            },
        );
        id
    }

    /// 更新を適用する。
    ///
    /// 対象が無い（削除済み）か、すでに終端状態なら何もせず `false`。
    pub fn update(&mut self, id: RecordId, update: RecordUpdate) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if record.status.is_terminal() {
            return false;
        }

        match update {
            RecordUpdate::Complete(text) => {
                record.status = ExtractionStatus::Completed;
                record.extracted_text = text;
            }
            RecordUpdate::Fail(message) => {
                record.status = ExtractionStatus::Error;
                record.error_message = Some(message);
            }
        }
        true
    }

    /// 削除したレコードを返す（image_source の解放用）
    pub fn remove(&mut self, id: RecordId) -> Option<ExtractionResult> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// 全件削除
    pub fn clear(&mut self) -> Vec<ExtractionResult> {
        std::mem::take(&mut self.records)
    }

    /// 確認が取れたときだけ全件削除する
    ///
    /// `confirm` には現在の件数が渡される。
    pub fn clear_confirmed<F>(&mut self, confirm: F) -> Vec<ExtractionResult>
    where
        F: FnOnce(usize) -> bool,
    {
        if confirm(self.records.len()) {
            self.clear()
        } else {
            Vec::new()
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&ExtractionResult> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[ExtractionResult] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        self.records
            .iter()
            .fold(StatusCounts::default(), |mut acc, r| {
                match r.status {
                    ExtractionStatus::Processing => acc.processing += 1,
                    ExtractionStatus::Completed => acc.completed += 1,
                    ExtractionStatus::Error => acc.error += 1,
                }
                acc
            })
    }
}

/// パイプラインから見たストア
///
/// 各操作は同期的に完結するので、途中状態が見えることはない。
pub trait RecordSink {
    fn append(&self, record: NewRecord) -> RecordId;

    /// `ResultStore::update` と同じく、対象が無ければ `false`
    fn settle(&self, id: RecordId, update: RecordUpdate) -> bool;
}

impl RecordSink for RefCell<ResultStore> {
    fn append(&self, record: NewRecord) -> RecordId {
        self.borrow_mut().append(record)
    }

    fn settle(&self, id: RecordId, update: RecordUpdate) -> bool {
        self.borrow_mut().update(id, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(name: &str) -> NewRecord {
        NewRecord {
            file_name: name.to_string(),
            image_source: format!("blob:{}", name),
            timestamp: 1_000,
        }
    }

    #[test]
    fn test_append_inserts_processing_at_front() {
        let mut store = ResultStore::new();
        let first = store.append(new_record("a.jpg"));
        let second = store.append(new_record("b.jpg"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id, second);
        assert_eq!(store.records()[1].id, first);
        assert!(store
            .records()
            .iter()
            .all(|r| r.status == ExtractionStatus::Processing));
        assert!(store.records().iter().all(|r| r.extracted_text.is_empty()));
    }

    #[test]
    fn test_update_complete() {
        let mut store = ResultStore::new();
        let id = store.append(new_record("a.jpg"));

        assert!(store.update(id, RecordUpdate::Complete("Hello".to_string())));

        let record = store.get(id).unwrap();
        assert_eq!(record.status, ExtractionStatus::Completed);
        assert_eq!(record.extracted_text, "Hello");
        assert_eq!(record.error_message, None);
    }

    #[test]
    fn test_update_fail() {
        let mut store = ResultStore::new();
        let id = store.append(new_record("a.jpg"));

        assert!(store.update(id, RecordUpdate::Fail("SYSTEM_FAILURE: boom".to_string())));

        let record = store.get(id).unwrap();
        assert_eq!(record.status, ExtractionStatus::Error);
        assert_eq!(record.error_message.as_deref(), Some("SYSTEM_FAILURE: boom"));
        assert!(record.extracted_text.is_empty());
    }

    #[test]
    fn test_terminal_status_is_not_reversed() {
        let mut store = ResultStore::new();
        let id = store.append(new_record("a.jpg"));
        store.update(id, RecordUpdate::Complete("first".to_string()));

        assert!(!store.update(id, RecordUpdate::Fail("late".to_string())));
        assert!(!store.update(id, RecordUpdate::Complete("second".to_string())));

        let record = store.get(id).unwrap();
        assert_eq!(record.status, ExtractionStatus::Completed);
        assert_eq!(record.extracted_text, "first");
        assert_eq!(record.error_message, None);
    }

    #[test]
    fn test_update_after_remove_is_noop() {
        let mut store = ResultStore::new();
        let keep = store.append(new_record("keep.jpg"));
        let gone = store.append(new_record("gone.jpg"));

        let removed = store.remove(gone).unwrap();
        assert_eq!(removed.image_source, "blob:gone.jpg");

        assert!(!store.update(gone, RecordUpdate::Complete("late".to_string())));
        assert_eq!(store.len(), 1);
        assert!(store.get(gone).is_none());
        assert_eq!(store.records()[0].id, keep);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = ResultStore::new();
        let id = store.append(new_record("a.jpg"));
        store.remove(id);

        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_confirmed() {
        let mut store = ResultStore::new();
        store.append(new_record("a.jpg"));
        store.append(new_record("b.jpg"));

        let mut asked_with = None;
        let removed = store.clear_confirmed(|n| {
            asked_with = Some(n);
            true
        });

        assert_eq!(asked_with, Some(2));
        assert_eq!(removed.len(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_cancelled_leaves_store_unchanged() {
        let mut store = ResultStore::new();
        store.append(new_record("a.jpg"));
        store.append(new_record("b.jpg"));
        let before = store.clone();

        let removed = store.clear_confirmed(|_| false);

        assert!(removed.is_empty());
        assert_eq!(store, before);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut store = ResultStore::new();
        let before = store.append(new_record("a.jpg"));
        store.clear();
        let after = store.append(new_record("a.jpg"));

        assert_ne!(before, after);
    }

    #[test]
    fn test_counts() {
        let mut store = ResultStore::new();
        let a = store.append(new_record("a.jpg"));
        let b = store.append(new_record("b.jpg"));
        store.append(new_record("c.jpg"));
        store.update(a, RecordUpdate::Complete("ok".to_string()));
        store.update(b, RecordUpdate::Fail("ng".to_string()));

        assert_eq!(
            store.counts(),
            StatusCounts { processing: 1, completed: 1, error: 1 }
        );
    }

    #[test]
    fn test_refcell_sink() {
        let store = RefCell::new(ResultStore::new());
        let id = RecordSink::append(&store, new_record("a.jpg"));

        assert!(store.settle(id, RecordUpdate::Complete("done".to_string())));
        assert!(!store.settle(id, RecordUpdate::Complete("again".to_string())));
        assert_eq!(store.borrow().get(id).unwrap().extracted_text, "done");
    }
}
