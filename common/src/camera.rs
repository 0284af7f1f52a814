//! カメラセッションの状態管理
//!
//! 状態遷移: Inactive → Active → Capturing → Inactive
//!
//! ストリームは `StreamGuard` が保持し、停止・撮影完了・セッション破棄の
//! いずれの経路でも全トラックが一度だけ停止される。

use crate::error::{Error, Result};

/// 解放可能なメディアストリーム
pub trait MediaStreamHandle {
    /// 全トラックを停止
    fn stop_all_tracks(&self);
}

/// スコープを抜けるとストリームを解放するハンドル
pub struct StreamGuard<H: MediaStreamHandle> {
    handle: H,
}

impl<H: MediaStreamHandle> StreamGuard<H> {
    pub fn new(handle: H) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}

impl<H: MediaStreamHandle> Drop for StreamGuard<H> {
    fn drop(&mut self) {
        self.handle.stop_all_tracks();
    }
}

/// カメラの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    Inactive,
    Active,
    Capturing,
}

/// カメラセッション（同時に1つだけ）
pub struct CameraSession<H: MediaStreamHandle> {
    phase: CameraPhase,
    guard: Option<StreamGuard<H>>,
}

impl<H: MediaStreamHandle> Default for CameraSession<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MediaStreamHandle> CameraSession<H> {
    pub fn new() -> Self {
        Self {
            phase: CameraPhase::Inactive,
            guard: None,
        }
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != CameraPhase::Inactive
    }

    /// 取得済みストリーム（プレビュー表示用）
    pub fn handle(&self) -> Option<&H> {
        self.guard.as_ref().map(StreamGuard::handle)
    }

    /// Inactive → Active
    ///
    /// 既に起動中なら渡されたストリームはその場で解放してエラーを返す。
    pub fn activate(&mut self, handle: H) -> Result<()> {
        let guard = StreamGuard::new(handle);
        if self.phase != CameraPhase::Inactive {
            drop(guard);
            return Err(Error::Camera("カメラは既に起動しています".to_string()));
        }

        self.guard = Some(guard);
        self.phase = CameraPhase::Active;
        tracing::debug!("camera session active");
        Ok(())
    }

    /// Active → Capturing → Inactive
    ///
    /// `grab` で現在のフレームを取り込んだ後、結果に関わらずストリームを解放する。
    pub fn capture<T, F>(&mut self, grab: F) -> Result<T>
    where
        F: FnOnce(&H) -> Result<T>,
    {
        if self.phase != CameraPhase::Active {
            return Err(Error::Camera("カメラが起動していません".to_string()));
        }
        let Some(guard) = self.guard.take() else {
            self.phase = CameraPhase::Inactive;
            return Err(Error::Camera("ストリームがありません".to_string()));
        };

        self.phase = CameraPhase::Capturing;
        let frame = grab(guard.handle());
        drop(guard);
        self.phase = CameraPhase::Inactive;
        tracing::debug!(ok = frame.is_ok(), "camera capture finished");
        frame
    }

    /// Active → Inactive（撮影せずに解放）
    ///
    /// 解放したストリームがあれば `true`。
    pub fn stop(&mut self) -> bool {
        self.phase = CameraPhase::Inactive;
        let released = self.guard.take().is_some();
        if released {
            tracing::debug!("camera session stopped");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeStream {
        stops: Rc<Cell<usize>>,
    }

    impl MediaStreamHandle for FakeStream {
        fn stop_all_tracks(&self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    fn fake() -> (FakeStream, Rc<Cell<usize>>) {
        let stops = Rc::new(Cell::new(0));
        (FakeStream { stops: stops.clone() }, stops)
    }

    #[test]
    fn test_activate_then_stop_releases_once() {
        let (stream, stops) = fake();
        let mut session = CameraSession::new();

        session.activate(stream).unwrap();
        assert_eq!(session.phase(), CameraPhase::Active);
        assert!(session.handle().is_some());
        assert_eq!(stops.get(), 0);

        assert!(session.stop());
        assert_eq!(session.phase(), CameraPhase::Inactive);
        assert_eq!(stops.get(), 1);

        assert!(!session.stop());
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_capture_releases_stream() {
        let (stream, stops) = fake();
        let mut session = CameraSession::new();
        session.activate(stream).unwrap();

        let mut stops_during_grab = None;
        let frame = session
            .capture(|s| {
                stops_during_grab = Some(s.stops.get());
                Ok("frame")
            })
            .unwrap();

        assert_eq!(frame, "frame");
        assert_eq!(stops_during_grab, Some(0));
        assert_eq!(stops.get(), 1);
        assert_eq!(session.phase(), CameraPhase::Inactive);
        assert!(session.handle().is_none());
    }

    #[test]
    fn test_failed_capture_still_releases_stream() {
        let (stream, stops) = fake();
        let mut session = CameraSession::new();
        session.activate(stream).unwrap();

        let result: Result<()> =
            session.capture(|_| Err(Error::Camera("2dコンテキスト取得失敗".to_string())));

        assert!(result.is_err());
        assert_eq!(stops.get(), 1);
        assert_eq!(session.phase(), CameraPhase::Inactive);
    }

    #[test]
    fn test_capture_while_inactive_is_rejected() {
        let mut session: CameraSession<FakeStream> = CameraSession::new();
        let result = session.capture(|_| Ok(()));
        assert!(matches!(result, Err(Error::Camera(_))));
    }

    #[test]
    fn test_second_activate_releases_surplus_stream() {
        let (first, first_stops) = fake();
        let (second, second_stops) = fake();
        let mut session = CameraSession::new();

        session.activate(first).unwrap();
        let result = session.activate(second);

        assert!(matches!(result, Err(Error::Camera(_))));
        assert_eq!(second_stops.get(), 1);
        assert_eq!(first_stops.get(), 0);
        assert_eq!(session.phase(), CameraPhase::Active);
    }

    #[test]
    fn test_drop_session_releases_stream() {
        let (stream, stops) = fake();
        {
            let mut session = CameraSession::new();
            session.activate(stream).unwrap();
        }
        assert_eq!(stops.get(), 1);
    }
}
