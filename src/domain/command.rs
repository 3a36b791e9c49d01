/// Upper bound on `platform`, in characters. Mirrors the CHECK constraint on
/// the `Commands.Platform` column.
pub const PLATFORM_MAX_LEN: usize = 6;

/// A persisted command line together with its usage text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: i64,
    pub command_line: String,
    pub how_to: String,
    pub platform: String,
}

/// A command that has not been stored yet; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    pub command_line: String,
    pub how_to: String,
    pub platform: String,
}

/// Full replacement of the three text fields of an existing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandChanges {
    pub command_line: String,
    pub how_to: String,
    pub platform: String,
}

impl CommandChanges {
    /// Overwrites every text field of `command`. The id is left untouched.
    pub fn apply_to(self, command: &mut Command) {
        command.command_line = self.command_line;
        command.how_to = self.how_to;
        command.platform = self.platform;
    }
}
