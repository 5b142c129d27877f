use catalog_core::{AppViewModel, ButtonAction, Msg, PageView};

pub const HELP: &[&str] = &[
    "Commands:",
    "  <n>            press button [n]",
    "  go <path>      open a location, e.g. go /products",
    "  title <text>   set the title field",
    "  price <text>   set the price field",
    "  submit         submit the form",
    "  help           show this help",
    "  quit           exit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Press(usize),
    Go(String),
    Title(String),
    Price(String),
    Submit,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command {0:?} (type `help`)")]
    Unknown(String),
    #[error("`go` needs a path")]
    MissingPath,
    #[error("no button [{0}] on this page")]
    NoSuchButton(usize),
    #[error("\"{0}\" is disabled")]
    ButtonDisabled(String),
    #[error("this page has no form")]
    NoForm,
}

pub fn parse(line: &str) -> Result<InputCommand, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word {
        "go" => {
            let path = rest.trim();
            if path.is_empty() {
                Err(InputError::MissingPath)
            } else {
                Ok(InputCommand::Go(path.to_string()))
            }
        }
        // Field values are kept verbatim apart from the separating space.
        "title" => Ok(InputCommand::Title(rest.to_string())),
        "price" => Ok(InputCommand::Price(rest.trim().to_string())),
        "submit" => Ok(InputCommand::Submit),
        "help" | "?" => Ok(InputCommand::Help),
        "quit" | "exit" => Ok(InputCommand::Quit),
        other => other
            .parse::<usize>()
            .map(InputCommand::Press)
            .map_err(|_| InputError::Unknown(other.to_string())),
    }
}

/// Resolves a command against what is currently on screen.
pub fn to_msg(command: InputCommand, view: &AppViewModel) -> Result<Msg, InputError> {
    match command {
        InputCommand::Press(number) => {
            let buttons = view.page.buttons();
            let button = number
                .checked_sub(1)
                .and_then(|index| buttons.get(index))
                .ok_or(InputError::NoSuchButton(number))?;
            if !button.enabled {
                return Err(InputError::ButtonDisabled(button.label.clone()));
            }
            Ok(match &button.action {
                ButtonAction::Navigate(path) => Msg::Navigate(path.clone()),
                ButtonAction::Submit => Msg::SubmitClicked,
            })
        }
        InputCommand::Go(path) => Ok(Msg::Navigate(path)),
        InputCommand::Title(text) => form_only(view).map(|()| Msg::TitleChanged(text)),
        InputCommand::Price(text) => form_only(view).map(|()| Msg::PriceChanged(text)),
        InputCommand::Submit => match &view.page {
            PageView::ProductForm(form) if !form.submit.enabled => {
                Err(InputError::ButtonDisabled(form.submit.label.clone()))
            }
            PageView::ProductForm(_) => Ok(Msg::SubmitClicked),
            _ => Err(InputError::NoForm),
        },
        InputCommand::Help | InputCommand::Quit => Ok(Msg::NoOp),
    }
}

fn form_only(view: &AppViewModel) -> Result<(), InputError> {
    match view.page {
        PageView::ProductForm(_) => Ok(()),
        _ => Err(InputError::NoForm),
    }
}
