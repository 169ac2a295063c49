use std::time::Duration;

use chrono::NaiveDateTime;

use crate::panels::ChartPanel;
use crate::task::TaskDescriptor;

/// Status banner shown above the chart panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub last_success: Option<NaiveDateTime>,
    pub status: BannerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerStatus {
    /// The builder is running right now.
    Updating,
    /// Finished; the server's next scheduled run, when it reported one.
    NextUpdate(Option<NaiveDateTime>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub task: Option<TaskDescriptor>,
    pub banner: Option<BannerView>,
    pub panels: Vec<ChartPanel>,
    pub prompt_open: bool,
    pub timer_period: Option<Duration>,
    pub polling: bool,
    pub dirty: bool,
}
