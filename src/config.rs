use std::path::PathBuf;

use crate::region::Roi;
use crate::Args;

/// Settings for one extraction run
#[derive(Debug, Clone)]
pub struct Config {
    pub image: PathBuf,
    pub roi: Option<Roi>,
    pub lang: String,
    pub psm: u32,
    pub json: bool,
    pub debug_out: Option<PathBuf>,
    pub tessdata: Option<String>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            image: args.image,
            roi: args.roi,
            lang: args.lang,
            psm: args.psm,
            json: args.json,
            debug_out: args.debug_out,
            tessdata: args.tessdata,
        }
    }
}
