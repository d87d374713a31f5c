use crate::app::event::TimerKind;
use crate::engine::SessionToken;
use std::path::PathBuf;
use std::time::Duration;

/// Side effects requested by the handler and carried out by the main loop.
#[derive(Debug, PartialEq)]
pub enum Action {
    Schedule { kind: TimerKind, token: SessionToken, delay: Duration },
    ImportFile { path: PathBuf },
    ExportTemplate { dir: PathBuf },
    SaveConfig,
    Quit,
}
