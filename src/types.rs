/// One launchable item from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display label shown in the menu.
    pub name: String,
    /// Argv to execute: program followed by its arguments.
    pub command: Vec<String>,
    /// Whether selecting this entry closes the menu after launching.
    pub close: bool,
}
