//! Keyboard surface and per-button press latches

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    D,
    L,
    M,
    P,
    R,
    S,
    W,
    Space,
    Enter,
    Left,
    Right,
    Up,
    Down,
}

/// Released, newly pressed, or pressed and already acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Released,
    Pressed,
    Processed,
}

/// Press state for `N` logical buttons of one component
#[derive(Debug, Clone)]
pub struct KeyLatch<const N: usize> {
    states: [KeyState; N],
}

impl<const N: usize> Default for KeyLatch<N> {
    fn default() -> Self {
        Self {
            states: [KeyState::Released; N],
        }
    }
}

impl<const N: usize> KeyLatch<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release; holding a processed key keeps it processed
    pub fn set(&mut self, button: usize, pressed: bool) {
        let state = &mut self.states[button];
        *state = match (pressed, *state) {
            (false, _) => KeyState::Released,
            (true, KeyState::Released) => KeyState::Pressed,
            (true, held) => held,
        };
    }

    pub fn state(&self, button: usize) -> KeyState {
        self.states[button]
    }

    pub fn is_down(&self, button: usize) -> bool {
        self.states[button] != KeyState::Released
    }

    /// Edge-triggered: true once per press
    pub fn take(&mut self, button: usize) -> bool {
        if self.states[button] == KeyState::Pressed {
            self.states[button] = KeyState::Processed;
            true
        } else {
            false
        }
    }

    /// Level-triggered: true every frame the key is down
    pub fn hold(&mut self, button: usize) -> bool {
        if self.is_down(button) {
            self.states[button] = KeyState::Processed;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.states = [KeyState::Released; N];
    }
}
