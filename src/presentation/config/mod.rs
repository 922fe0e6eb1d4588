mod settings;

pub use settings::{AuthSettings, MediaSettings, SarvamSettings, ServerSettings, Settings};
