//! Text editing commands with key repeat

/// Discrete text editing command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextInputCommand {
    /// Caret one character left
    MoveCaretLeft,
    /// Caret one character right
    MoveCaretRight,
    /// Caret one line up
    MoveCaretUp,
    /// Caret one line down
    MoveCaretDown,
    /// Delete before caret
    Backspace,
    /// Delete after caret
    Delete,
    /// Insert a line break
    BreakLine,
    /// Caret to end of text (Ctrl+End)
    MoveCaretEnd,
    /// Caret to start of text (Ctrl+Home)
    MoveCaretStart,
    /// Caret to end of line (End)
    MoveCaretEndOfLine,
    /// Caret to start of line (Home)
    MoveCaretStartOfLine,
}

/// Keyboard key a command is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextInputKey {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Enter / Return
    Enter,
    /// End
    End,
    /// Home
    Home,
}

impl TextInputCommand {
    /// Every command, in polling order
    pub const ALL: [Self; 11] = [
        Self::MoveCaretLeft,
        Self::MoveCaretRight,
        Self::MoveCaretUp,
        Self::MoveCaretDown,
        Self::Backspace,
        Self::Delete,
        Self::BreakLine,
        Self::MoveCaretEnd,
        Self::MoveCaretStart,
        Self::MoveCaretEndOfLine,
        Self::MoveCaretStartOfLine,
    ];

    /// Key that triggers this command
    pub const fn key(self) -> TextInputKey {
        match self {
            Self::MoveCaretLeft => TextInputKey::Left,
            Self::MoveCaretRight => TextInputKey::Right,
            Self::MoveCaretUp => TextInputKey::Up,
            Self::MoveCaretDown => TextInputKey::Down,
            Self::Backspace => TextInputKey::Backspace,
            Self::Delete => TextInputKey::Delete,
            Self::BreakLine => TextInputKey::Enter,
            Self::MoveCaretEnd | Self::MoveCaretEndOfLine => TextInputKey::End,
            Self::MoveCaretStart | Self::MoveCaretStartOfLine => TextInputKey::Home,
        }
    }

    /// Whether the command applies given the Ctrl modifier
    pub const fn accepts_ctrl(self, ctrl_down: bool) -> bool {
        match self {
            Self::MoveCaretEnd | Self::MoveCaretStart => ctrl_down,
            Self::MoveCaretEndOfLine | Self::MoveCaretStartOfLine => !ctrl_down,
            _ => true,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Delay before a held key starts repeating, in milliseconds
pub const REPEAT_INITIAL_DELAY_MS: i64 = 450;

/// Interval between repeats of a held key, in milliseconds
pub const REPEAT_INTERVAL_MS: i64 = 45;

/// A schedule overdue by at least this much counts as a fresh press
const FRESH_PRESS_THRESHOLD_MS: i64 = 250;

/// Turns held keys into rate-limited [`TextInputCommand`]s
#[derive(Debug, Clone, Default)]
pub struct TextInputRepeater {
    next_allowed_ms: [i64; 11],
}

impl TextInputRepeater {
    /// Fresh repeater with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll every command.
    ///
    /// `now_ms` is a millisecond clock (see [`crate::foundation::time::unix_millis`]),
    /// `is_key_down` reports held keys.
    pub fn poll(
        &mut self,
        now_ms: i64,
        ctrl_down: bool,
        is_key_down: impl Fn(TextInputKey) -> bool,
    ) -> Vec<TextInputCommand> {
        let mut commands = Vec::new();
        for command in TextInputCommand::ALL {
            let slot = &mut self.next_allowed_ms[command.index()];
            if !is_key_down(command.key()) {
                *slot = 0;
                continue;
            }
            let overdue = now_ms - *slot;
            if overdue <= 0 {
                continue;
            }
            *slot = now_ms
                + if overdue >= FRESH_PRESS_THRESHOLD_MS {
                    REPEAT_INITIAL_DELAY_MS
                } else {
                    REPEAT_INTERVAL_MS
                };
            if command.accepts_ctrl(ctrl_down) {
                commands.push(command);
            }
        }
        commands
    }
}
