//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 와 GUI 가 같은 규칙을 쓰도록 한다.

pub mod app;
pub mod chart;
pub mod config;
pub mod form;
pub mod i18n;
pub mod logging;
pub mod psychro;
pub mod resolver;
pub mod session;
pub mod tracker;
pub mod ui_cli;
pub mod units;
