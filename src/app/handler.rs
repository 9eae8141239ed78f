//! Input handling — maps key/mouse events to scroll movements.
//!
//! Keys step one poster at a time; the wheel and mouse drags scroll freely
//! and the animator snaps once input goes idle.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollLeft => step(state, -1),
        Action::ScrollRight => step(state, 1),
        Action::JumpFirst => jump_to_entry(state, 1),
        Action::JumpLast => jump_to_entry(state, state.entries.len().saturating_sub(2)),
    }
}

/// Move the rest target by `delta` posters.
fn step(state: &mut AppState, delta: isize) {
    let len = state.entries.len();
    let geometry = state.layout.geometry();
    let Some(current) = geometry.centred_index(state.animator.target(), len) else {
        return;
    };
    let next = current.saturating_add_signed(delta).clamp(1, len - 2);
    jump_to_entry(state, next);
}

/// Animate to the rest position that centres list index `index`.
fn jump_to_entry(state: &mut AppState, index: usize) {
    if state.entries.len() <= 2 || index == 0 {
        return;
    }
    let Some(entry) = state.entries.get(index) else {
        return;
    };
    let target = state.layout.geometry().offset_for_index(index);
    tracing::debug!("scroll to {entry} at {target}");
    state.animator.scroll_to(target);
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let now = Instant::now();
    let step = state.config.wheel_step;

    match mouse.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            state.animator.scroll_by(-step, now);
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            state.animator.scroll_by(step, now);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            state.drag_column = Some(mouse.column);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(prev) = state.drag_column {
                // Content follows the pointer.
                let delta = f64::from(prev) - f64::from(mouse.column);
                state.animator.scroll_by(delta, now);
            }
            state.drag_column = Some(mouse.column);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.drag_column = None;
        }
        _ => {}
    }
}
