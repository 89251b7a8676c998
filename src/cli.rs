use clap::Parser;

use crate::page::PageKind;

#[derive(Parser, Debug)]
#[command(
    name = "pulsifi",
    version,
    about = "Terminal feed of short-lived pulses with live expiry countdowns"
)]
pub struct Args {
    /// Page to open (overrides `page` in the config file)
    #[arg(short, long, value_enum)]
    pub page: Option<PageKind>,

    /// Stop countdowns at 00:00 instead of starting over
    #[arg(long)]
    pub no_loop: bool,
}
