//! Selection state machine for the menu, kept independent of the GTK
//! front end so the navigation and submit semantics are testable without
//! a display.

use crate::types::Entry;

/// Input events the front end feeds into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    MoveUp,
    MoveDown,
    Submit,
    Cancel,
}

/// What the front end must do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do (menu already closed, or empty).
    Idle,
    /// Selection moved; re-highlight.
    Moved { from: usize, to: usize },
    /// Spawn the entry at `index`; when `close` is set, also tear down.
    Launched { index: usize, close: bool },
    /// Tear down the window.
    Closed,
}

#[derive(Debug)]
pub struct MenuState {
    current: usize,
    close_flags: Vec<bool>,
    open: bool,
}

impl MenuState {
    pub fn new(entries: &[Entry]) -> Self {
        Self {
            current: 0,
            close_flags: entries.iter().map(|entry| entry.close).collect(),
            open: true,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Move the selection straight to `index` (pointer clicks).
    pub fn select(&mut self, index: usize) -> Transition {
        if !self.open || index >= self.close_flags.len() || index == self.current {
            return Transition::Idle;
        }
        let from = self.current;
        self.current = index;
        Transition::Moved { from, to: index }
    }

    pub fn handle(&mut self, event: MenuEvent) -> Transition {
        if !self.open {
            return Transition::Idle;
        }
        let count = self.close_flags.len();
        match event {
            MenuEvent::MoveUp => {
                if count == 0 {
                    return Transition::Idle;
                }
                let from = self.current;
                self.current = if self.current == 0 {
                    count - 1
                } else {
                    self.current - 1
                };
                Transition::Moved {
                    from,
                    to: self.current,
                }
            }
            MenuEvent::MoveDown => {
                if count == 0 {
                    return Transition::Idle;
                }
                let from = self.current;
                self.current = (self.current + 1) % count;
                Transition::Moved {
                    from,
                    to: self.current,
                }
            }
            MenuEvent::Submit => {
                if count == 0 {
                    return Transition::Idle;
                }
                let close = self.close_flags[self.current];
                if close {
                    self.open = false;
                }
                Transition::Launched {
                    index: self.current,
                    close,
                }
            }
            MenuEvent::Cancel => {
                self.open = false;
                Transition::Closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(close_flags: &[bool]) -> Vec<Entry> {
        close_flags
            .iter()
            .enumerate()
            .map(|(i, &close)| Entry {
                name: format!("entry{i}"),
                command: vec![format!("cmd{i}")],
                close,
            })
            .collect()
    }

    #[test]
    fn starts_at_first_entry() {
        let state = MenuState::new(&entries(&[false, false]));
        assert_eq!(state.current(), 0);
        assert!(state.is_open());
    }

    #[test]
    fn down_wraps_to_first() {
        let mut state = MenuState::new(&entries(&[false, false, false]));
        assert_eq!(
            state.handle(MenuEvent::MoveDown),
            Transition::Moved { from: 0, to: 1 }
        );
        state.handle(MenuEvent::MoveDown);
        assert_eq!(state.current(), 2);
        assert_eq!(
            state.handle(MenuEvent::MoveDown),
            Transition::Moved { from: 2, to: 0 }
        );
    }

    #[test]
    fn up_wraps_to_last() {
        let mut state = MenuState::new(&entries(&[false, false, false]));
        assert_eq!(
            state.handle(MenuEvent::MoveUp),
            Transition::Moved { from: 0, to: 2 }
        );
        assert_eq!(
            state.handle(MenuEvent::MoveUp),
            Transition::Moved { from: 2, to: 1 }
        );
    }

    #[test]
    fn submit_without_close_flag_stays_open() {
        let mut state = MenuState::new(&entries(&[false, true]));
        assert_eq!(
            state.handle(MenuEvent::Submit),
            Transition::Launched {
                index: 0,
                close: false
            }
        );
        assert!(state.is_open());
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn submit_with_close_flag_closes() {
        let mut state = MenuState::new(&entries(&[false, true]));
        state.handle(MenuEvent::MoveDown);
        assert_eq!(
            state.handle(MenuEvent::Submit),
            Transition::Launched {
                index: 1,
                close: true
            }
        );
        assert!(!state.is_open());
    }

    #[test]
    fn cancel_closes_regardless_of_flags() {
        let mut state = MenuState::new(&entries(&[false, false]));
        assert_eq!(state.handle(MenuEvent::Cancel), Transition::Closed);
        assert!(!state.is_open());
    }

    #[test]
    fn events_after_close_are_inert() {
        let mut state = MenuState::new(&entries(&[true]));
        state.handle(MenuEvent::Submit);
        assert_eq!(state.handle(MenuEvent::MoveDown), Transition::Idle);
        assert_eq!(state.handle(MenuEvent::Submit), Transition::Idle);
        assert_eq!(state.select(0), Transition::Idle);
    }

    #[test]
    fn empty_menu_only_cancels() {
        let mut state = MenuState::new(&[]);
        assert_eq!(state.handle(MenuEvent::MoveDown), Transition::Idle);
        assert_eq!(state.handle(MenuEvent::MoveUp), Transition::Idle);
        assert_eq!(state.handle(MenuEvent::Submit), Transition::Idle);
        assert_eq!(state.handle(MenuEvent::Cancel), Transition::Closed);
    }

    #[test]
    fn select_jumps_to_clicked_row() {
        let mut state = MenuState::new(&entries(&[false, false, true]));
        assert_eq!(state.select(2), Transition::Moved { from: 0, to: 2 });
        assert_eq!(state.select(2), Transition::Idle);
        assert_eq!(state.select(9), Transition::Idle);
        assert_eq!(
            state.handle(MenuEvent::Submit),
            Transition::Launched {
                index: 2,
                close: true
            }
        );
    }
}
