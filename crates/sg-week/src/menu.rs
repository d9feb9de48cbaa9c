// menu.rs — Header progress menu: My Week, Share Progress, Weekly Statistics.
//
// Wide layouts show captioned buttons; narrow layouts show icon buttons
// whose accessible labels differ slightly ("Export Progress").

use serde::{Deserialize, Serialize};

pub const WEEK_ROUTE: &str = "/";
pub const STATISTICS_ROUTE: &str = "/statistics";

/// One entry of the header menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    MyWeek,
    ShareProgress,
    WeeklyStatistics,
}

impl MenuAction {
    /// Menu entries in display order.
    pub const ALL: [MenuAction; 3] = [
        MenuAction::MyWeek,
        MenuAction::ShareProgress,
        MenuAction::WeeklyStatistics,
    ];

    pub fn caption(self, wide_layout: bool) -> &'static str {
        match (self, wide_layout) {
            (MenuAction::MyWeek, _) => "My Week",
            (MenuAction::ShareProgress, true) => "Share Progress",
            (MenuAction::ShareProgress, false) => "Export Progress",
            (MenuAction::WeeklyStatistics, _) => "Weekly Statistics",
        }
    }

    /// Route the action navigates to. Sharing opens a modal instead.
    pub fn route(self) -> Option<&'static str> {
        match self {
            MenuAction::MyWeek => Some(WEEK_ROUTE),
            MenuAction::ShareProgress => None,
            MenuAction::WeeklyStatistics => Some(STATISTICS_ROUTE),
        }
    }
}

/// What activating a menu entry did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Navigate(&'static str),
    ShareModalOpened,
}

/// Menu state: the layout it renders for and whether the share modal is up.
#[derive(Debug, Clone, Default)]
pub struct ProgressMenu {
    wide_layout: bool,
    share_modal_open: bool,
}

impl ProgressMenu {
    pub fn new(wide_layout: bool) -> Self {
        Self {
            wide_layout,
            share_modal_open: false,
        }
    }

    /// Entries with their captions for the current layout.
    pub fn entries(&self) -> Vec<(MenuAction, &'static str)> {
        MenuAction::ALL
            .iter()
            .map(|action| (*action, action.caption(self.wide_layout)))
            .collect()
    }

    pub fn activate(&mut self, action: MenuAction) -> MenuOutcome {
        match action.route() {
            Some(route) => MenuOutcome::Navigate(route),
            None => {
                self.share_modal_open = true;
                MenuOutcome::ShareModalOpened
            }
        }
    }

    pub fn close_share_modal(&mut self) {
        self.share_modal_open = false;
    }

    pub fn is_share_modal_open(&self) -> bool {
        self.share_modal_open
    }

    pub fn set_wide_layout(&mut self, wide: bool) {
        self.wide_layout = wide;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captions_follow_layout() {
        let wide: Vec<_> = ProgressMenu::new(true).entries().into_iter().map(|(_, c)| c).collect();
        assert_eq!(wide, vec!["My Week", "Share Progress", "Weekly Statistics"]);

        let narrow: Vec<_> = ProgressMenu::new(false).entries().into_iter().map(|(_, c)| c).collect();
        assert_eq!(narrow, vec!["My Week", "Export Progress", "Weekly Statistics"]);
    }

    #[test]
    fn share_opens_modal_and_close_hides_it() {
        let mut menu = ProgressMenu::new(true);
        assert!(!menu.is_share_modal_open());
        assert_eq!(menu.activate(MenuAction::ShareProgress), MenuOutcome::ShareModalOpened);
        assert!(menu.is_share_modal_open());
        menu.close_share_modal();
        assert!(!menu.is_share_modal_open());
    }

    #[test]
    fn navigation_entries_return_routes() {
        let mut menu = ProgressMenu::new(false);
        assert_eq!(menu.activate(MenuAction::MyWeek), MenuOutcome::Navigate("/"));
        assert_eq!(
            menu.activate(MenuAction::WeeklyStatistics),
            MenuOutcome::Navigate("/statistics")
        );
        assert!(!menu.is_share_modal_open());
    }
}
