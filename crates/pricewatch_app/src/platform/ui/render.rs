use chrono::NaiveDateTime;
use pricewatch_core::{AppViewModel, BannerStatus, BannerView, ChartPanel, LoadMarker};

const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const PROMPT_PENDING: &str = "等待回覆: 是否刷新頁面? 是 (y) / 否 (n)";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);

    lines.push(match &view.task {
        Some(task) => format!("任務: {} ({})", task.task_name, task.task_key),
        None => "任務: 此頁面無排程任務".to_string(),
    });

    if !view.panels.is_empty() {
        lines.push(format!("圖表: {}", render_panels(&view.panels)));
    }

    if let Some(banner) = &view.banner {
        lines.push(render_banner(banner));
    }

    if view.prompt_open {
        lines.push(PROMPT_PENDING.to_string());
    }

    lines
}

/// Two-column banner: last success on the left, progress or next run on the right.
pub fn render_banner(banner: &BannerView) -> String {
    let right = match &banner.status {
        BannerStatus::Updating => "資料更新中...".to_string(),
        BannerStatus::NextUpdate(next) => format!("資料下次更新時間: {}", format_time(*next)),
    };
    format!(
        "資料上次更新時間: {}    {}",
        format_time(banner.last_success),
        right
    )
}

pub fn render_prompt() -> Vec<String> {
    vec![
        "資料更新完成，是否刷新頁面?".to_string(),
        "是 (y)　•　否 (n)".to_string(),
    ]
}

fn render_panels(panels: &[ChartPanel]) -> String {
    panels
        .iter()
        .map(|panel| {
            let stale = if panel.load == Some(LoadMarker::NeedsReload) {
                "*"
            } else {
                ""
            };
            if panel.active {
                format!("[{}{}]", panel.id, stale)
            } else {
                format!("{}{}", panel.id, stale)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}
