use std::sync::Arc;

use crate::application::ports::{MediaTool, TranscriptionClient};
use crate::application::services::TranscriptionPipeline;
use crate::presentation::config::Settings;

pub struct AppState<M, T>
where
    M: MediaTool,
    T: TranscriptionClient,
{
    pub pipeline: Arc<TranscriptionPipeline<M, T>>,
    pub settings: Settings,
}

impl<M, T> Clone for AppState<M, T>
where
    M: MediaTool,
    T: TranscriptionClient,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            settings: self.settings.clone(),
        }
    }
}
