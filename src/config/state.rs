// Application state module
// Read-only state shared by every request

use std::io;

use super::root::ServedRoot;
use super::types::Config;
use crate::handler::listing::ListingTemplate;
use crate::logger;

/// Application state
///
/// Built once before the listener starts; requests only read it.
pub struct AppState {
    pub config: Config,
    pub root: ServedRoot,
    /// Icon asset directory, `None` when it does not exist
    pub icons: Option<ServedRoot>,
    pub template: ListingTemplate,
}

impl AppState {
    /// Validate the served directory and prepare request-time resources
    pub fn new(config: &Config) -> io::Result<Self> {
        let root = ServedRoot::new(config.served_directory())?;

        let icons = match ServedRoot::new(&config.serve.icons_dir) {
            Ok(icons) => Some(icons),
            Err(e) => {
                logger::log_debug(&format!("Icon route disabled: {e}"));
                None
            }
        };

        let template = config
            .serve
            .template
            .clone()
            .map_or(ListingTemplate::Embedded, ListingTemplate::File);

        Ok(Self {
            config: config.clone(),
            root,
            icons,
            template,
        })
    }
}
