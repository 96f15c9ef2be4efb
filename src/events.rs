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

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Section;
use crate::controller::ViewController;
use crate::menu::MenuController;

/// Main event handler that processes keyboard input.
/// Returns `Ok(true)` when the application should quit.
pub fn handle_key_event(vc: &mut ViewController, key_event: KeyEvent) -> anyhow::Result<bool> {
    let KeyEvent { code, modifiers, kind, .. } = key_event;
    if kind == KeyEventKind::Release {
        return Ok(false);
    }
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(true);
    }

    // Notice popup swallows everything until dismissed
    if vc.app().notice.is_some() {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            vc.dismiss_notice();
        }
        return Ok(false);
    }

    let Some(section) = vc.app().section else {
        return handle_landing_events(vc, code);
    };

    if vc.app().menu.is_open() {
        return handle_menu_events(vc, code);
    }

    if code == KeyCode::F(2) {
        vc.toggle_menu();
        return Ok(false);
    }

    match section {
        Section::Registration => handle_registration_events(vc, code, modifiers),
        Section::Dashboard | Section::History => handle_global_events(vc, section, code),
    }
}

fn handle_landing_events(vc: &mut ViewController, code: KeyCode) -> anyhow::Result<bool> {
    match code {
        KeyCode::Enter => vc.enter_dashboard()?,
        KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

fn handle_menu_events(vc: &mut ViewController, code: KeyCode) -> anyhow::Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::F(2) | KeyCode::Char('m') => vc.close_menu(),
        KeyCode::Up => vc.menu_up(),
        KeyCode::Down => vc.menu_down(),
        KeyCode::Enter => {
            let target = vc.app().menu.selected_section();
            vc.navigate(target)?;
        }
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char(c) => {
            if let Some(target) = MenuController::section_for_shortcut(c) {
                vc.navigate(target)?;
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_registration_events(
    vc: &mut ViewController,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> anyhow::Result<bool> {
    match code {
        KeyCode::Esc => vc.navigate(Section::Dashboard)?,
        KeyCode::Enter => vc.submit_registration(),
        KeyCode::F(3) => vc.alternate_sign_in(),
        KeyCode::Tab | KeyCode::Down => vc.registration_next_field(),
        KeyCode::BackTab | KeyCode::Up => vc.registration_prev_field(),
        KeyCode::Backspace => vc.registration_backspace(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            vc.registration_input(c)
        }
        _ => {}
    }
    Ok(false)
}

/// Dashboard and history share the same single-key bindings
fn handle_global_events(vc: &mut ViewController, section: Section, code: KeyCode) -> anyhow::Result<bool> {
    match code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('m') => vc.toggle_menu(),
        KeyCode::Esc if section == Section::History => vc.navigate(Section::Dashboard)?,
        KeyCode::Char(c) => {
            if let Some(target) = MenuController::section_for_shortcut(c) {
                vc.navigate(target)?;
            }
        }
        _ => {}
    }
    Ok(false)
}
