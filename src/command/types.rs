#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Clicks the first link whose `href` or text matches `target`.
    ClickLink {
        target: String,
    },
    Back,
    Forward,
    /// Loads `path` the way typing it into the address bar would.
    Go {
        path: String,
    },
    FocusNext,
    FocusPrev,
    /// Clicks the focused link.
    Activate,
    State,
    DebugToggle,
    OpenCommandBar,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    ClickLink,
    Back,
    Forward,
    Go,
    FocusNext,
    FocusPrev,
    Activate,
    State,
    DebugToggle,
    CommandBar,
    Cancel,
    Quit,
    Input,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClickLink => "click",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Go => "go",
            Self::FocusNext => "focus-next",
            Self::FocusPrev => "focus-prev",
            Self::Activate => "activate",
            Self::State => "state",
            Self::DebugToggle => "debug-toggle",
            Self::CommandBar => "command-bar",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
            Self::Input => "input",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::ClickLink { .. } => ActionId::ClickLink,
            Self::Back => ActionId::Back,
            Self::Forward => ActionId::Forward,
            Self::Go { .. } => ActionId::Go,
            Self::FocusNext => ActionId::FocusNext,
            Self::FocusPrev => ActionId::FocusPrev,
            Self::Activate => ActionId::Activate,
            Self::State => ActionId::State,
            Self::DebugToggle => ActionId::DebugToggle,
            Self::OpenCommandBar => ActionId::CommandBar,
            Self::Cancel => ActionId::Cancel,
            Self::Quit => ActionId::Quit,
        }
    }

    /// Whether the command can move the tab to another location.
    pub fn navigates(&self) -> bool {
        matches!(
            self,
            Self::ClickLink { .. } | Self::Back | Self::Forward | Self::Go { .. } | Self::Activate
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Path,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub args: &'static [ArgSpec],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}
