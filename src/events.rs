/// What happened to a key or button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Press,
    Repeat,
    Release,
}

impl Action {
    /// Only presses and repeats ever have an effect
    pub fn is_active(self) -> bool {
        !matches!(self, Action::Release)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

/// Input as delivered by the host, before any interpretation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawInput {
    Key {
        key: Key,
        action: Action,
    },

    /// `x` and `y` are screen pixels, with `y` growing downwards
    Pointer {
        button: Button,
        action: Action,
        x: f64,
        y: f64,
    },

    /// The host asked to close, e.g. Ctrl-C in a terminal
    CloseRequested,
}

/// Input that the simulation acts on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Exit the application
    Quit,

    TogglePause,

    /// Kill every cell
    ClearGrid,

    /// Flip the cell at grid coordinates `(x, y)`
    ToggleCell { x: usize, y: usize },
}
