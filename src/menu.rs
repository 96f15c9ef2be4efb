/*
 * This file is part of Envdash.
 *
 * Copyright (C) 2025 Envdash contributors
 *
 * Envdash is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Envdash is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Envdash. If not, see <https://www.gnu.org/licenses/>.
 */

use crate::app::Section;

/// Sidebar entries in display order: (target, label, shortcut)
pub const MENU_ITEMS: [(Section, &str, char); 3] = [
    (Section::Dashboard, "Dashboard", 'd'),
    (Section::Registration, "Registration", 'r'),
    (Section::History, "History", 'h'),
];

/// Sidebar overlay state. The sidebar, the dimmed overlay and the toggle
/// marker are all drawn from `is_open()`.
#[derive(Debug, Clone, Default)]
pub struct MenuController {
    open: bool,
    selected: usize,
}

impl MenuController {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < MENU_ITEMS.len() {
            self.selected += 1;
        }
    }

    pub fn selected_section(&self) -> Section {
        MENU_ITEMS[self.selected.min(MENU_ITEMS.len() - 1)].0
    }

    pub fn section_for_shortcut(c: char) -> Option<Section> {
        MENU_ITEMS
            .iter()
            .find(|(_, _, key)| *key == c.to_ascii_lowercase())
            .map(|(section, _, _)| *section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let mut menu = MenuController::default();
        assert!(!menu.is_open());
        menu.toggle();
        assert!(menu.is_open());
        menu.toggle();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut menu = MenuController::default();
        menu.close();
        assert!(!menu.is_open());
        menu.toggle();
        menu.close();
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut menu = MenuController::default();
        menu.select_prev();
        assert_eq!(menu.selected_section(), Section::Dashboard);
        for _ in 0..10 {
            menu.select_next();
        }
        assert_eq!(menu.selected_section(), Section::History);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(MenuController::section_for_shortcut('r'), Some(Section::Registration));
        assert_eq!(MenuController::section_for_shortcut('H'), Some(Section::History));
        assert_eq!(MenuController::section_for_shortcut('x'), None);
    }
}
