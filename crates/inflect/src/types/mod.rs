mod options;
mod switches;
mod token;

pub use options::{OptionValue, Options};
pub use switches::{SwitchOverrides, Switches};
pub use token::{TokenId, TokenName, is_identifier};
