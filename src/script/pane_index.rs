//! Window → pane-name → 1-based pane index lookup.

/// Pane names declared per window, resolved to tmux pane indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneIndex {
    windows: Vec<(String, Vec<(String, usize)>)>,
}

impl PaneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `pane` with `index` inside `window`. Re-registering a name
    /// replaces its index; window order follows first registration.
    pub fn register(&mut self, window: &str, pane: &str, index: usize) {
        let pos = match self.windows.iter().position(|(name, _)| name == window) {
            Some(pos) => pos,
            None => {
                self.windows.push((window.to_string(), Vec::new()));
                self.windows.len() - 1
            }
        };
        let panes = &mut self.windows[pos].1;
        match panes.iter_mut().find(|(name, _)| name == pane) {
            Some(entry) => entry.1 = index,
            None => panes.push((pane.to_string(), index)),
        }
    }

    /// Register `panes` under `window` as 1, 2, 3… in slice order.
    pub fn register_layout<'a>(&mut self, window: &str, panes: impl IntoIterator<Item = &'a str>) {
        for (offset, pane) in panes.into_iter().enumerate() {
            self.register(window, pane, offset + 1);
        }
    }

    pub fn get(&self, window: &str, pane: &str) -> Option<usize> {
        self.windows
            .iter()
            .find(|(name, _)| name == window)
            .and_then(|(_, panes)| panes.iter().find(|(name, _)| name == pane))
            .map(|(_, idx)| *idx)
    }

    /// Window names in registration order.
    pub fn windows(&self) -> impl Iterator<Item = &str> {
        self.windows.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_indices_start_at_one_in_declaration_order() {
        let mut index = PaneIndex::new();
        index.register_layout("build", ["left", "right", "bottom"]);
        assert_eq!(index.get("build", "left"), Some(1));
        assert_eq!(index.get("build", "right"), Some(2));
        assert_eq!(index.get("build", "bottom"), Some(3));
        assert_eq!(index.get("build", "missing"), None);
        assert_eq!(index.get("other", "left"), None);
    }

    #[test]
    fn windows_keep_first_registration_order() {
        let mut index = PaneIndex::new();
        index.register_layout("zeta", ["a"]);
        index.register_layout("alpha", ["b"]);
        index.register("zeta", "c", 2);
        assert_eq!(index.windows().collect::<Vec<_>>(), ["zeta", "alpha"]);
        assert_eq!(index.get("zeta", "c"), Some(2));
    }

    #[test]
    fn re_registering_a_pane_replaces_its_index() {
        let mut index = PaneIndex::new();
        index.register("w", "log", 1);
        index.register("w", "log", 3);
        assert_eq!(index.get("w", "log"), Some(3));
    }
}
