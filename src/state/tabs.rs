// src/state/tabs.rs

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Calendar,
    Latest,
    Chat,
}

/// Remote list a tab is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Upcoming,
    Latest,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Calendar, Tab::Latest, Tab::Chat];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Calendar => "📅 Results Calendar",
            Tab::Latest => "📊 Latest Results",
            Tab::Chat => "💬 Ask AI",
        }
    }

    pub fn resource(self) -> Option<ResourceKey> {
        match self {
            Tab::Calendar => Some(ResourceKey::Upcoming),
            Tab::Latest => Some(ResourceKey::Latest),
            Tab::Chat => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Activates `tab`. Returns the resource to load when this is an entry,
    /// i.e. the tab was not already active.
    pub fn select(&mut self, tab: Tab) -> Option<ResourceKey> {
        if self.active == tab {
            return None;
        }
        self.active = tab;
        tab.resource()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_calendar() {
        assert_eq!(TabController::default().active(), Tab::Calendar);
    }

    #[test]
    fn test_entry_reports_bound_resource() {
        let mut tabs = TabController::default();
        assert_eq!(tabs.select(Tab::Latest), Some(ResourceKey::Latest));
        assert_eq!(tabs.select(Tab::Chat), None);
        assert_eq!(tabs.active(), Tab::Chat);
        assert_eq!(tabs.select(Tab::Calendar), Some(ResourceKey::Upcoming));
    }

    #[test]
    fn test_reselecting_active_tab_is_not_an_entry() {
        let mut tabs = TabController::default();
        assert_eq!(tabs.select(Tab::Calendar), None);
        tabs.select(Tab::Latest);
        assert_eq!(tabs.select(Tab::Latest), None);
    }
}
