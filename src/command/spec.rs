use super::types::{ArgKind, ArgSpec, CommandSpec};

const NO_ARGS: [ArgSpec; 0] = [];
const ARGS_CLICK: [ArgSpec; 1] = [ArgSpec {
    name: "link",
    kind: ArgKind::Text,
    required: true,
}];
const ARGS_GO: [ArgSpec; 1] = [ArgSpec {
    name: "path",
    kind: ArgKind::Path,
    required: true,
}];

const COMMAND_SPECS: [CommandSpec; 12] = [
    CommandSpec {
        id: "click",
        title: "Click Link",
        args: &ARGS_CLICK,
    },
    CommandSpec {
        id: "back",
        title: "History Back",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "forward",
        title: "History Forward",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "go",
        title: "Load Location",
        args: &ARGS_GO,
    },
    CommandSpec {
        id: "focus-next",
        title: "Focus Next Link",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "focus-prev",
        title: "Focus Previous Link",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "activate",
        title: "Activate Focused Link",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "state",
        title: "Show Router State",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "debug-toggle",
        title: "Toggle Debug Status",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "command-bar",
        title: "Open Command Bar",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "cancel",
        title: "Cancel",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "quit",
        title: "Quit",
        args: &NO_ARGS,
    },
];

pub fn command_registry() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

pub fn find_command_spec(id: &str) -> Option<&'static CommandSpec> {
    COMMAND_SPECS.iter().find(|spec| spec.id == id)
}

/// One line per command, e.g. `go <path>`, for help output.
pub fn command_usage() -> Vec<String> {
    COMMAND_SPECS
        .iter()
        .map(|spec| {
            let mut usage = spec.id.to_string();
            for arg in spec.args {
                if arg.required {
                    usage.push_str(&format!(" <{}>", arg.name));
                } else {
                    usage.push_str(&format!(" [{}]", arg.name));
                }
            }
            usage
        })
        .collect()
}
