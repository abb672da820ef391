mod headless;

use anyhow::Result;

pub(crate) struct Options {
    pub verbose: bool,
    pub color: bool,
}

pub(crate) trait Frontend {
    fn set_up(&self, options: &Options) -> Result<()>;
}

/// Install the global tracing subscriber. Call once, before any work is done.
pub(crate) fn set_up(options: Options) -> Result<()> {
    let logger = headless::HeadlessLogger {};
    logger.set_up(&options)
}
