use crate::psychro::PsychroState;
use crate::tracker::{PlottedPoint, ProcessKind, ProcessTracker};

/// 애플리케이션 최상위 컨트롤러가 소유하는 세션 상태.
///
/// 입력 처리기와 차트 렌더러에 참조로 전달된다. 프로그램을 다시 시작해야만 초기화된다.
#[derive(Debug, Clone, Default)]
pub struct Session {
    tracker: ProcessTracker,
    last_state: Option<PsychroState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, state: PsychroState, point: PlottedPoint) -> ProcessKind {
        self.last_state = Some(state);
        self.tracker.push(point)
    }

    pub fn tracker(&self) -> &ProcessTracker {
        &self.tracker
    }

    pub fn last_state(&self) -> Option<&PsychroState> {
        self.last_state.as_ref()
    }

    pub fn process(&self) -> ProcessKind {
        self.tracker.process()
    }

    pub fn history(&self) -> &[PlottedPoint] {
        self.tracker.history()
    }

    pub fn latest(&self) -> Option<PlottedPoint> {
        self.tracker.latest()
    }
}
