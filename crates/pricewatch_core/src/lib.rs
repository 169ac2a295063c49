//! Pricewatch core: pure polling state machine, task resolution and view-model helpers.
mod effect;
mod msg;
mod panels;
mod state;
mod task;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, PromptAnswer};
pub use panels::{ChartPanel, ChartPanels, LoadMarker};
pub use state::{
    AppState, JobState, JobStatus, PromptId, RequestId, PROMPT_DURATION, STARTED_POLL_PERIOD,
    SUCCESS_POLL_PERIOD,
};
pub use task::{
    resolve_task, resolve_with, Crumb, TaskDescriptor, TaskRule, TaskSpec, CATTLE, CHICKEN, CROP,
    DUCK, FEED, FLOWER, FRUIT, GOOSE, HOG, NAIF_CHICKENS, ORIGIN_SEAFOOD, RAM, RICE, TASK_RULES,
    WHOLESALE_SEAFOOD,
};
pub use update::update;
pub use view_model::{AppViewModel, BannerStatus, BannerView};
