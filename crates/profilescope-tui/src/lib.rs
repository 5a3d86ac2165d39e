// Terminal UI implementation using ratatui
// The presentation surface of profilescope

pub mod app;
pub mod capture;
pub mod runner;
pub mod sparkline;
pub mod ui;

pub use app::{App, InputMode, SessionState};
pub use capture::{SnapshotWriter, SurfaceCapture};
pub use runner::run_tui;
