//! Togglable chart panels on a detail page.

/// Load marker carried by panels whose chart is fetched lazily on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMarker {
    Loaded,
    NeedsReload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPanel {
    pub id: String,
    pub active: bool,
    /// `None` for panels that are rendered eagerly and never reload.
    pub load: Option<LoadMarker>,
    /// False while the chart shows its "no data" placeholder.
    pub has_data: bool,
}

impl ChartPanel {
    pub fn new(id: impl Into<String>, active: bool, lazy: bool) -> Self {
        let load = match (lazy, active) {
            (false, _) => None,
            (true, true) => Some(LoadMarker::Loaded),
            (true, false) => Some(LoadMarker::NeedsReload),
        };
        Self {
            id: id.into(),
            active,
            load,
            has_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartPanels {
    panels: Vec<ChartPanel>,
}

impl ChartPanels {
    pub fn new(panels: Vec<ChartPanel>) -> Self {
        Self { panels }
    }

    pub fn as_slice(&self) -> &[ChartPanel] {
        &self.panels
    }

    pub fn active(&self) -> Option<&ChartPanel> {
        self.panels.iter().find(|panel| panel.active)
    }

    /// Make `id` the only active panel.
    ///
    /// Returns `Some(true)` when the panel has to (re)load its chart, `Some(false)`
    /// when it is already loaded or eager, and `None` for an unknown id.
    pub fn activate(&mut self, id: &str) -> Option<bool> {
        let index = self.panels.iter().position(|panel| panel.id == id)?;
        for panel in &mut self.panels {
            panel.active = false;
        }
        let panel = &mut self.panels[index];
        panel.active = true;
        let needs_reload = panel.load == Some(LoadMarker::NeedsReload);
        if needs_reload {
            panel.load = Some(LoadMarker::Loaded);
        }
        Some(needs_reload)
    }

    /// Re-render the active, loaded panel.
    ///
    /// Every lazy panel is marked for reload so the siblings refetch on their next
    /// activation, then the active one is re-activated. Returns the id of the
    /// panel that reloads, or `None` when no loaded panel is active.
    pub fn refresh_active(&mut self) -> Option<String> {
        let id = self
            .panels
            .iter()
            .find(|panel| panel.active && panel.load == Some(LoadMarker::Loaded))?
            .id
            .clone();

        for panel in &mut self.panels {
            if panel.load.is_some() {
                panel.load = Some(LoadMarker::NeedsReload);
            }
            if panel.id == id {
                panel.active = false;
            }
        }

        match self.activate(&id) {
            Some(true) => Some(id),
            _ => None,
        }
    }

    /// Returns false for an unknown id.
    pub fn set_has_data(&mut self, id: &str, has_data: bool) -> bool {
        match self.panels.iter_mut().find(|panel| panel.id == id) {
            Some(panel) => {
                panel.has_data = has_data;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChartPanels {
        ChartPanels::new(vec![
            ChartPanel::new("chart-1", false, false),
            ChartPanel::new("chart-2", true, true),
            ChartPanel::new("chart-3", false, true),
        ])
    }

    #[test]
    fn refresh_marks_siblings_and_reloads_active() {
        let mut panels = sample();
        // Load chart-3 once so it is no longer pending, then go back to chart-2.
        assert_eq!(panels.activate("chart-3"), Some(true));
        assert_eq!(panels.activate("chart-2"), Some(false));

        assert_eq!(panels.refresh_active(), Some("chart-2".to_string()));

        let slice = panels.as_slice();
        assert_eq!(slice[0].load, None);
        assert!(slice[1].active);
        assert_eq!(slice[1].load, Some(LoadMarker::Loaded));
        assert!(!slice[2].active);
        assert_eq!(slice[2].load, Some(LoadMarker::NeedsReload));
    }

    #[test]
    fn refresh_without_loaded_active_panel_is_noop() {
        let mut panels = ChartPanels::new(vec![
            ChartPanel::new("chart-1", true, false),
            ChartPanel::new("chart-2", false, true),
        ]);
        let before = panels.clone();
        assert_eq!(panels.refresh_active(), None);
        assert_eq!(panels, before);
    }

    #[test]
    fn activate_unknown_panel_keeps_selection() {
        let mut panels = sample();
        assert_eq!(panels.activate("chart-9"), None);
        assert_eq!(panels.active().map(|p| p.id.as_str()), Some("chart-2"));
    }
}
