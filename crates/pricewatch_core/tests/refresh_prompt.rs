use pricewatch_core::{
    update, AppState, ChartPanel, Effect, JobState, JobStatus, LoadMarker, Msg, PromptAnswer,
};

fn init_logging() {
    pricewatch_logging::initialize_for_tests();
}

fn job(state: JobState) -> JobStatus {
    JobStatus {
        state: Some(state),
        ..JobStatus::default()
    }
}

/// Drive a hog page through STARTED -> SUCCESS so the refresh prompt is open.
fn state_with_open_prompt() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::PageOpened {
            breadcrumb: vec!["畜禽產品".to_string(), "毛豬".to_string()],
            panels: vec![
                ChartPanel::new("chart-1", true, true),
                ChartPanel::new("chart-2", false, true),
                ChartPanel::new("chart-3", false, false),
            ],
        },
    );
    let mut state = state;
    for job_state in [JobState::Started, JobState::Success] {
        let request_id = state.in_flight().expect("request in flight");
        let (next, _) = update(
            state,
            Msg::ScheduleReceived {
                request_id,
                status: job(job_state),
            },
        );
        let (next, _) = update(next, Msg::TimerFired);
        state = next;
    }
    assert!(state.view().prompt_open);
    state
}

#[test]
fn yes_dismisses_and_reloads_the_active_panel() {
    init_logging();
    let state = state_with_open_prompt();

    let (state, effects) = update(state, Msg::PromptAnswered(PromptAnswer::Yes));

    assert_eq!(
        effects,
        vec![
            Effect::DismissPrompt { prompt_id: 1 },
            Effect::ReloadPanel {
                id: "chart-1".to_string()
            },
        ]
    );
    let view = state.view();
    assert!(!view.prompt_open);
    assert!(view.panels[0].active);
    assert_eq!(view.panels[0].load, Some(LoadMarker::Loaded));
    assert_eq!(view.panels[1].load, Some(LoadMarker::NeedsReload));
    assert_eq!(view.panels[2].load, None);
}

#[test]
fn no_only_dismisses() {
    init_logging();
    let state = state_with_open_prompt();
    let panels_before = state.view().panels;

    let (state, effects) = update(state, Msg::PromptAnswered(PromptAnswer::No));

    assert_eq!(effects, vec![Effect::DismissPrompt { prompt_id: 1 }]);
    assert!(!state.view().prompt_open);
    assert_eq!(state.view().panels, panels_before);
}

#[test]
fn answers_without_open_prompt_are_ignored() {
    init_logging();
    let state = state_with_open_prompt();
    let (state, _) = update(state, Msg::PromptAnswered(PromptAnswer::No));

    let (_state, effects) = update(state, Msg::PromptAnswered(PromptAnswer::Yes));
    assert!(effects.is_empty());
}

#[test]
fn expiry_closes_only_the_matching_prompt() {
    init_logging();
    let state = state_with_open_prompt();

    let (state, effects) = update(state, Msg::PromptExpired { prompt_id: 7 });
    assert!(effects.is_empty());
    assert!(state.view().prompt_open);

    let (state, effects) = update(state, Msg::PromptExpired { prompt_id: 1 });
    assert!(effects.is_empty());
    assert!(!state.view().prompt_open);
}

#[test]
fn activating_a_pending_panel_requests_a_reload() {
    init_logging();
    let state = state_with_open_prompt();

    let (state, effects) = update(
        state,
        Msg::PanelActivated {
            id: "chart-2".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ReloadPanel {
            id: "chart-2".to_string()
        }]
    );

    // Switching back to an already loaded panel renders from cache.
    let (state, effects) = update(
        state,
        Msg::PanelActivated {
            id: "chart-1".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().panels[0].active);

    let (_state, effects) = update(
        state,
        Msg::PanelActivated {
            id: "missing".to_string(),
        },
    );
    assert!(effects.is_empty());
}
