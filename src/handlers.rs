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

use crate::app::{App, RegistrationField};

const MAX_FIELD_LEN: usize = 64;

// ===== Registration form =====
pub fn registration_input(app: &mut App, c: char) {
    if c.is_control() {
        return;
    }
    // Names may hold spaces, the other fields may not
    if c == ' ' && app.registration.focus != RegistrationField::Name {
        return;
    }
    let field = app.registration.focused_mut();
    if field.chars().count() < MAX_FIELD_LEN {
        field.push(c);
    }
}

pub fn registration_backspace(app: &mut App) {
    app.registration.focused_mut().pop();
}

pub fn registration_next_field(app: &mut App) {
    app.registration.focus = app.registration.focus.next();
}

pub fn registration_prev_field(app: &mut App) {
    app.registration.focus = app.registration.focus.next().next();
}

// ===== Sidebar selection =====
pub fn menu_up(app: &mut App) {
    app.menu.select_prev();
}

pub fn menu_down(app: &mut App) {
    app.menu.select_next();
}
