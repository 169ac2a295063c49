use pricewatch_core::PromptAnswer;

/// A command typed on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Answer(PromptAnswer),
    /// `tab <id>`: switch chart panel.
    Activate(String),
    /// `data <id>` / `nodata <id>`: the panel's chart gained or lost its data.
    DataChanged { id: String, has_data: bool },
    /// `open A > B > C`: navigate to a page with this breadcrumb.
    Open(Vec<String>),
    /// `back`: leave the page.
    Leave,
    Quit,
}

pub fn parse_line(line: &str) -> Option<UserInput> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match (command.to_ascii_lowercase().as_str(), rest) {
        ("y" | "yes" | "是", "") => Some(UserInput::Answer(PromptAnswer::Yes)),
        ("n" | "no" | "否", "") => Some(UserInput::Answer(PromptAnswer::No)),
        ("tab" | "panel", id) if !id.is_empty() => Some(UserInput::Activate(id.to_string())),
        ("data", id) if !id.is_empty() => Some(UserInput::DataChanged {
            id: id.to_string(),
            has_data: true,
        }),
        ("nodata", id) if !id.is_empty() => Some(UserInput::DataChanged {
            id: id.to_string(),
            has_data: false,
        }),
        ("open", trail) if !trail.is_empty() => Some(UserInput::Open(
            trail
                .split('>')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )),
        ("back", "") => Some(UserInput::Leave),
        ("q" | "quit" | "exit", "") => Some(UserInput::Quit),
        _ => None,
    }
}
