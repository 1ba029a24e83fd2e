//! Edge-triggered button state machine.
//!
//! Each button only changes on an observed edge of its raw signal. With no
//! debounce this tracks the latest raw value exactly; the explicit edge
//! checks are where multi-frame confirmation would be added.

use gerbil_model::GestureState;

use crate::gesture::RawGesture;

/// What happened to a single button during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed,
    Released,
    Unchanged,
}

/// Per-button transitions produced by one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdges {
    pub primary: ButtonEdge,
    pub secondary: ButtonEdge,
}

/// Apply one frame of raw signals to the held button state.
///
/// The thumb drives the primary button, the pinky the secondary one.
pub fn update_buttons(state: &mut GestureState, raw: RawGesture) -> ButtonEdges {
    ButtonEdges {
        primary: apply_edge(&mut state.primary_pressed, raw.thumb_shown),
        secondary: apply_edge(&mut state.secondary_pressed, raw.pinky_shown),
    }
}

fn apply_edge(pressed: &mut bool, shown: bool) -> ButtonEdge {
    if !*pressed && shown {
        *pressed = true;
        ButtonEdge::Pressed
    } else if *pressed && !shown {
        *pressed = false;
        ButtonEdge::Released
    } else {
        ButtonEdge::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(thumb: bool, pinky: bool) -> RawGesture {
        RawGesture {
            thumb_shown: thumb,
            pinky_shown: pinky,
        }
    }

    #[test]
    fn test_press_hold_release() {
        let mut state = GestureState::default();

        let edges = update_buttons(&mut state, raw(true, false));
        assert_eq!(edges.primary, ButtonEdge::Pressed);
        assert_eq!(edges.secondary, ButtonEdge::Unchanged);
        assert!(state.primary_pressed);

        let edges = update_buttons(&mut state, raw(true, false));
        assert_eq!(edges.primary, ButtonEdge::Unchanged);
        assert!(state.primary_pressed);

        let edges = update_buttons(&mut state, raw(false, false));
        assert_eq!(edges.primary, ButtonEdge::Released);
        assert!(!state.primary_pressed);
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut state = GestureState {
            primary_pressed: true,
            secondary_pressed: false,
        };

        let edges = update_buttons(&mut state, raw(true, true));
        assert_eq!(edges.primary, ButtonEdge::Unchanged);
        assert_eq!(edges.secondary, ButtonEdge::Pressed);
        assert_eq!(
            state,
            GestureState {
                primary_pressed: true,
                secondary_pressed: true,
            }
        );
    }

    proptest! {
        #[test]
        fn prop_held_state_tracks_latest_signal(
            signals in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..64)
        ) {
            let mut state = GestureState::default();
            for (thumb, pinky) in signals {
                let before = state;
                let edges = update_buttons(&mut state, raw(thumb, pinky));

                prop_assert_eq!(state.primary_pressed, thumb);
                prop_assert_eq!(state.secondary_pressed, pinky);
                prop_assert_eq!(
                    edges.primary == ButtonEdge::Unchanged,
                    before.primary_pressed == thumb
                );
            }
        }
    }
}
