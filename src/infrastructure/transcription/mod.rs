mod sarvam_client;

pub use sarvam_client::SarvamClient;
